use super::bucket::{DayHighlight, WeekHighlight};
use super::keys::{
    week_key_of, DayKey, InvalidDate, WeekKey, WeekdayExt, YearMonth, DAYS_IN_WEEK,
};
use super::note::Note;
use super::store::CalendarStore;

/// Rendering instructions for one month: a week-summary cell followed by
/// seven day slots (Monday first) for every week that contains at least one
/// day of the month
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    month: YearMonth,
    rows: Vec<GridRow>,
}

impl Grid {
    pub(crate) fn month(&self) -> YearMonth {
        self.month
    }

    pub(crate) fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Returns the row & column of the cell for `date`, if it is in this
    /// month
    #[cfg(test)]
    pub(crate) fn position_of(&self, date: time::Date) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.days
                .iter()
                .position(|cell| cell.as_day().is_some_and(|d| d.key.date() == date))
                .map(|c| (r, c))
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GridRow {
    pub(crate) week: WeekCell,
    pub(crate) days: [Cell; DAYS_IN_WEEK as usize],
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WeekCell {
    pub(crate) key: WeekKey,
    pub(crate) highlight: WeekHighlight,
    pub(crate) notes: Vec<Note>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Cell {
    /// A slot before the first or after the last day of the month
    Blank,
    Day(DayCell),
}

impl Cell {
    pub(crate) fn as_day(&self) -> Option<&DayCell> {
        match self {
            Cell::Blank => None,
            Cell::Day(d) => Some(d),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) key: DayKey,
    pub(crate) day: u8,
    pub(crate) highlight: DayHighlight,
    pub(crate) notes: Vec<Note>,
}

/// Lays out `month` and resolves the bucket behind every visible cell,
/// creating buckets that have not been referenced before.
///
/// The shape of the grid depends only on `month`; notes only affect the
/// highlight and note list of individual cells.
pub(crate) fn build_grid(
    month: YearMonth,
    store: &mut CalendarStore,
) -> Result<Grid, InvalidDate> {
    let first = month.first_day();
    let leading = first.weekday().index0();
    let row_qty = (leading + month.days()).div_ceil(DAYS_IN_WEEK);
    // Work out every week up front so that nothing is created if the month
    // runs off the end of the calendar
    let mut weeks = vec![week_key_of(first)?];
    for _ in 1..row_qty {
        let next = weeks
            .last()
            .and_then(|w| w.next())
            .ok_or(InvalidDate::OutOfRange)?;
        weeks.push(next);
    }
    let mut rows = Vec::with_capacity(weeks.len());
    for week in weeks {
        let bucket = store.resolve_week(week.monday())?;
        let days = std::array::from_fn(|slot| {
            let date = u8::try_from(slot).ok().and_then(|s| week.nth_day(s));
            match date {
                Some(date) if YearMonth::containing(date) == month => {
                    let day = bucket.day_mut(date);
                    let (key, notes) = (day.key(), day.notes().to_vec());
                    Cell::Day(DayCell {
                        key,
                        day: date.day(),
                        highlight: bucket.day_highlight(date),
                        notes,
                    })
                }
                _ => Cell::Blank,
            }
        });
        rows.push(GridRow {
            week: WeekCell {
                key: week,
                highlight: bucket.highlight(),
                notes: bucket.notes().to_vec(),
            },
            days,
        });
    }
    Ok(Grid { month, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::{Date, Month};

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn blank_mask(grid: &Grid) -> Vec<Vec<bool>> {
        grid.rows()
            .iter()
            .map(|row| row.days.iter().map(|c| c.as_day().is_none()).collect())
            .collect()
    }

    fn day_numbers(row: &GridRow) -> Vec<Option<u8>> {
        row.days
            .iter()
            .map(|c| c.as_day().map(|d| d.day))
            .collect()
    }

    #[test]
    fn test_february_2024() {
        let mut store = CalendarStore::new();
        let grid = build_grid(ym(2024, Month::February), &mut store).unwrap();
        assert_eq!(grid.rows().len(), 5);
        assert_eq!(
            day_numbers(&grid.rows()[0]),
            [None, None, None, Some(1), Some(2), Some(3), Some(4)]
        );
        assert_eq!(
            day_numbers(&grid.rows()[4]),
            [Some(26), Some(27), Some(28), Some(29), None, None, None]
        );
        assert_eq!(grid.rows()[0].week.key.monday(), date!(2024 - 01 - 29));
        assert_eq!(grid.rows()[4].week.key.monday(), date!(2024 - 02 - 26));
        assert_eq!(store.week_count(), 5);
        assert_eq!(store.day_count(), 29);
    }

    #[test]
    fn test_row_counts() {
        let mut store = CalendarStore::new();
        // February 2021 starts on a Monday and has exactly four weeks
        let feb = build_grid(ym(2021, Month::February), &mut store).unwrap();
        assert_eq!(feb.rows().len(), 4);
        assert!(blank_mask(&feb).iter().flatten().all(|&b| !b));
        // September 2024 starts on a Sunday
        let sep = build_grid(ym(2024, Month::September), &mut store).unwrap();
        assert_eq!(sep.rows().len(), 6);
        assert_eq!(day_numbers(&sep.rows()[0])[6], Some(1));
        assert_eq!(day_numbers(&sep.rows()[5])[0], Some(30));
    }

    #[test]
    fn test_no_empty_rows() {
        let mut store = CalendarStore::new();
        for year in [2023, 2024, 2025] {
            for m in 1..=12 {
                let month = ym(year, Month::try_from(m).unwrap());
                let grid = build_grid(month, &mut store).unwrap();
                let mut count = 0u8;
                for row in grid.rows() {
                    let in_month = row.days.iter().filter(|c| c.as_day().is_some()).count();
                    assert!(in_month > 0);
                    count += u8::try_from(in_month).unwrap();
                }
                assert_eq!(count, month.days());
            }
        }
    }

    #[test]
    fn test_shape_is_deterministic() {
        let mut store = CalendarStore::new();
        let month = ym(2024, Month::March);
        let before = build_grid(month, &mut store).unwrap();
        store
            .resolve_day(date!(2024 - 03 - 15))
            .unwrap()
            .add_note(Note::new(String::from("Dentist"), None));
        store
            .resolve_week(date!(2024 - 03 - 04))
            .unwrap()
            .add_note(Note::new(String::from("Plan"), None));
        let after = build_grid(month, &mut store).unwrap();
        assert_eq!(before.rows().len(), after.rows().len());
        assert_eq!(blank_mask(&before), blank_mask(&after));
        assert_ne!(before, after);
        let again = build_grid(month, &mut store).unwrap();
        assert_eq!(after, again);
    }

    #[test]
    fn test_highlights_in_grid() {
        let mut store = CalendarStore::new();
        store
            .resolve_day(date!(2024 - 03 - 15))
            .unwrap()
            .add_note(Note::new(String::from("Dentist"), None));
        store
            .resolve_week(date!(2024 - 03 - 15))
            .unwrap()
            .add_note(Note::new(String::from("Sprint"), None));
        let grid = build_grid(ym(2024, Month::March), &mut store).unwrap();
        let (r, c) = grid.position_of(date!(2024 - 03 - 15)).unwrap();
        let row = &grid.rows()[r];
        assert_eq!(row.week.highlight, WeekHighlight::Active);
        assert_eq!(row.week.notes.len(), 1);
        let cell = row.days[c].as_day().unwrap();
        assert_eq!(cell.highlight, DayHighlight::Urgent);
        assert_eq!(cell.notes[0].title(), "Dentist");
        let thu = row.days[c - 1].as_day().unwrap();
        assert_eq!(thu.day, 14);
        assert_eq!(thu.highlight, DayHighlight::Inherited);
        let other = grid.rows()[0].days[4].as_day().unwrap();
        assert_eq!(other.day, 1);
        assert_eq!(other.highlight, DayHighlight::Idle);
        assert_eq!(grid.rows()[0].week.highlight, WeekHighlight::Neutral);
    }

    #[test]
    fn test_last_supported_month() {
        let mut store = CalendarStore::new();
        let month = YearMonth::containing(Date::MAX);
        let grid = build_grid(month, &mut store).unwrap();
        assert_eq!(
            grid.position_of(Date::MAX).map(|(r, _)| r),
            Some(grid.rows().len() - 1)
        );
    }

    #[test]
    fn test_position_of() {
        let mut store = CalendarStore::new();
        let grid = build_grid(ym(2024, Month::February), &mut store).unwrap();
        assert_eq!(grid.position_of(date!(2024 - 02 - 01)), Some((0, 3)));
        assert_eq!(grid.position_of(date!(2024 - 02 - 29)), Some((4, 3)));
        assert_eq!(grid.position_of(date!(2024 - 01 - 31)), None);
        assert_eq!(grid.month(), ym(2024, Month::February));
    }
}
