use super::bucket::{DayBucket, WeekBucket};
use super::keys::{week_key_of, InvalidDate, WeekKey};
use std::collections::btree_map::{BTreeMap, Entry};
use time::Date;

/// Every [`WeekBucket`] created during a calendar session.
///
/// Buckets are created the first time any date inside them is resolved and
/// are never dropped, so notes stay attached to their dates no matter how
/// many times the visible month changes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct CalendarStore {
    weeks: BTreeMap<WeekKey, WeekBucket>,
}

impl CalendarStore {
    pub(crate) fn new() -> CalendarStore {
        CalendarStore::default()
    }

    /// Returns the bucket for the week containing `date`, creating it if
    /// needed.  On error, nothing is created.
    pub(crate) fn resolve_week(&mut self, date: Date) -> Result<&mut WeekBucket, InvalidDate> {
        let key = week_key_of(date)?;
        Ok(match self.weeks.entry(key) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                log::debug!("event=bucket_create scope=week monday={}", key.monday());
                e.insert(WeekBucket::new(key))
            }
        })
    }

    /// Returns the bucket for `date`, creating it (and its week) if needed.
    pub(crate) fn resolve_day(&mut self, date: Date) -> Result<&mut DayBucket, InvalidDate> {
        Ok(self.resolve_week(date)?.day_mut(date))
    }

    /// Looks up the week containing `date` without creating anything
    pub(crate) fn week(&self, date: Date) -> Option<&WeekBucket> {
        let key = week_key_of(date).ok()?;
        self.weeks.get(&key)
    }

    /// Looks up the bucket for `date` without creating anything
    pub(crate) fn day(&self, date: Date) -> Option<&DayBucket> {
        self.week(date)?.day(date)
    }

    pub(crate) fn week_mut(&mut self, date: Date) -> Option<&mut WeekBucket> {
        let key = week_key_of(date).ok()?;
        self.weeks.get_mut(&key)
    }

    pub(crate) fn day_mut(&mut self, date: Date) -> Option<&mut DayBucket> {
        self.week_mut(date)?.existing_day_mut(date)
    }

    pub(crate) fn week_count(&self) -> usize {
        self.weeks.len()
    }

    pub(crate) fn day_count(&self) -> usize {
        self.weeks.values().map(|w| w.days().count()).sum()
    }
}
