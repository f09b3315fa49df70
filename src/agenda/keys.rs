use std::fmt;
use thiserror::Error;
use time::{Date, Duration, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: u8 = 7;

pub(crate) trait WeekdayExt {
    /// Index of the weekday in a Monday-first week (Monday = 0, Sunday = 6)
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_monday()
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum InvalidDate {
    #[error("no such date: {year:04}-{month:02}-{day:02}")]
    Malformed { year: i32, month: u8, day: u8 },
    #[error("date is outside the supported calendar range")]
    OutOfRange,
}

/// Identity of a single calendar day
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct DayKey(Date);

impl DayKey {
    pub(crate) fn from_ymd(year: i32, month: u8, day: u8) -> Result<DayKey, InvalidDate> {
        let malformed = InvalidDate::Malformed { year, month, day };
        let m = Month::try_from(month).map_err(|_| malformed)?;
        Date::from_calendar_date(year, m, day)
            .map(DayKey)
            .map_err(|_| malformed)
    }

    pub(crate) fn date(self) -> Date {
        self.0
    }

    pub(crate) fn year(self) -> i32 {
        self.0.year()
    }

    pub(crate) fn month(self) -> Month {
        self.0.month()
    }

    pub(crate) fn day(self) -> u8 {
        self.0.day()
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year(),
            u8::from(self.month()),
            self.day()
        )
    }
}

/// Identity of a calendar week, named by the Monday that starts it.
///
/// Weeks that straddle a month boundary have exactly one key no matter which
/// month's grid is being built.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct WeekKey(Date);

impl WeekKey {
    pub(crate) fn monday(self) -> Date {
        self.0
    }

    pub(crate) fn contains(self, day: DayKey) -> bool {
        week_key_of(day.date()) == Ok(self)
    }

    /// The `n`th day of the week, counting from Monday = 0
    pub(crate) fn nth_day(self, n: u8) -> Option<Date> {
        if n >= DAYS_IN_WEEK {
            return None;
        }
        self.0.checked_add(Duration::days(i64::from(n)))
    }

    pub(crate) fn next(self) -> Option<WeekKey> {
        self.0.checked_add(Duration::weeks(1)).map(WeekKey)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week of {}", DayKey(self.0))
    }
}

pub(crate) fn day_key_of(date: Date) -> DayKey {
    DayKey(date)
}

pub(crate) fn week_key_of(date: Date) -> Result<WeekKey, InvalidDate> {
    let offset = Duration::days(i64::from(date.weekday().index0()));
    date.checked_sub(offset)
        .map(WeekKey)
        .ok_or(InvalidDate::OutOfRange)
}

/// A calendar month, the unit of navigation
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: Month) -> Result<YearMonth, InvalidDate> {
        Date::from_calendar_date(year, month, 1).map_err(|_| InvalidDate::OutOfRange)?;
        Ok(YearMonth { year, month })
    }

    pub(crate) fn containing(date: Date) -> YearMonth {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub(crate) fn days(self) -> u8 {
        self.month.length(self.year)
    }

    pub(crate) fn first_day(self) -> Date {
        self.day(1)
            .expect("the first of a constructed YearMonth should be a valid date")
    }

    pub(crate) fn day(self, day: u8) -> Option<Date> {
        Date::from_calendar_date(self.year, self.month, day).ok()
    }

    pub(crate) fn offset(self, delta_months: i32) -> Result<YearMonth, InvalidDate> {
        let index = i64::from(self.year) * 12 + i64::from(u8::from(self.month)) - 1
            + i64::from(delta_months);
        let year = i32::try_from(index.div_euclid(12)).map_err(|_| InvalidDate::OutOfRange)?;
        let month = u8::try_from(index.rem_euclid(12) + 1)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(InvalidDate::OutOfRange)?;
        YearMonth::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}
