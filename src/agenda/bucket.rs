use super::keys::{day_key_of, DayKey, WeekKey};
use super::note::{Note, NoteId};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use time::Date;

/// How a day cell should be emphasized
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) enum DayHighlight {
    /// The day has notes of its own
    Urgent,
    /// The day has no notes, but its week or another day in it does
    Inherited,
    Idle,
}

impl DayHighlight {
    // A day's own notes always win over its week's.
    pub(crate) fn derive(day_has_notes: bool, week_has_notes: bool) -> DayHighlight {
        match (day_has_notes, week_has_notes) {
            (true, _) => DayHighlight::Urgent,
            (false, true) => DayHighlight::Inherited,
            (false, false) => DayHighlight::Idle,
        }
    }
}

/// How a week-summary cell should be emphasized
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) enum WeekHighlight {
    Active,
    Neutral,
}

impl WeekHighlight {
    pub(crate) fn derive(week_has_notes: bool) -> WeekHighlight {
        if week_has_notes {
            WeekHighlight::Active
        } else {
            WeekHighlight::Neutral
        }
    }
}

// Notes keyed by ID, kept in insertion order
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct NoteList(Vec<Note>);

impl NoteList {
    fn add(&mut self, note: Note) {
        match self.0.iter_mut().find(|n| n.id() == note.id()) {
            Some(slot) => *slot = note,
            None => self.0.push(note),
        }
    }

    fn remove(&mut self, id: NoteId) -> Option<Note> {
        let i = self.0.iter().position(|n| n.id() == id)?;
        Some(self.0.remove(i))
    }

    fn as_slice(&self) -> &[Note] {
        &self.0
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The notes attached to one calendar date
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DayBucket {
    key: DayKey,
    notes: NoteList,
}

impl DayBucket {
    fn new(key: DayKey) -> DayBucket {
        DayBucket {
            key,
            notes: NoteList::default(),
        }
    }

    pub(crate) fn key(&self) -> DayKey {
        self.key
    }

    pub(crate) fn add_note(&mut self, note: Note) {
        self.notes.add(note);
    }

    pub(crate) fn remove_note(&mut self, id: NoteId) -> Option<Note> {
        self.notes.remove(id)
    }

    pub(crate) fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }

    pub(crate) fn notes(&self) -> &[Note] {
        self.notes.as_slice()
    }
}

/// The notes attached to one Monday-to-Sunday week, together with the
/// [`DayBucket`]s for the days in that week that have been referenced so far
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WeekBucket {
    key: WeekKey,
    notes: NoteList,
    days: BTreeMap<DayKey, DayBucket>,
}

impl WeekBucket {
    pub(super) fn new(key: WeekKey) -> WeekBucket {
        WeekBucket {
            key,
            notes: NoteList::default(),
            days: BTreeMap::new(),
        }
    }

    pub(crate) fn key(&self) -> WeekKey {
        self.key
    }

    pub(crate) fn add_note(&mut self, note: Note) {
        self.notes.add(note);
    }

    pub(crate) fn remove_note(&mut self, id: NoteId) -> Option<Note> {
        self.notes.remove(id)
    }

    pub(crate) fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }

    pub(crate) fn notes(&self) -> &[Note] {
        self.notes.as_slice()
    }

    /// Whether the week or any of its days has notes
    pub(crate) fn has_any_notes(&self) -> bool {
        self.has_notes() || self.days.values().any(DayBucket::has_notes)
    }

    pub(crate) fn highlight(&self) -> WeekHighlight {
        WeekHighlight::derive(self.has_any_notes())
    }

    /// Returns the bucket for `date`, creating it if this is the first time
    /// the date has been referenced.
    ///
    /// # Panics
    ///
    /// Panics if `date` does not fall within this week.
    pub(crate) fn day_mut(&mut self, date: Date) -> &mut DayBucket {
        let key = day_key_of(date);
        assert!(
            self.key.contains(key),
            "{key} does not belong to {}",
            self.key
        );
        match self.days.entry(key) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                log::trace!("event=bucket_create scope=day date={key}");
                e.insert(DayBucket::new(key))
            }
        }
    }

    pub(crate) fn existing_day_mut(&mut self, date: Date) -> Option<&mut DayBucket> {
        self.days.get_mut(&day_key_of(date))
    }

    pub(crate) fn day(&self, date: Date) -> Option<&DayBucket> {
        self.days.get(&day_key_of(date))
    }

    pub(crate) fn days(&self) -> impl Iterator<Item = &DayBucket> + '_ {
        self.days.values()
    }

    /// Highlight for a day in this week.  Days that have never been
    /// referenced have no notes of their own.
    pub(crate) fn day_highlight(&self, date: Date) -> DayHighlight {
        let day_has_notes = self.day(date).is_some_and(DayBucket::has_notes);
        DayHighlight::derive(day_has_notes, self.has_any_notes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::keys::week_key_of;
    use time::macros::date;

    fn note(title: &str) -> Note {
        Note::new(String::from(title), None)
    }

    fn week_of(date: Date) -> WeekBucket {
        WeekBucket::new(week_key_of(date).unwrap())
    }

    #[test]
    fn test_derive_day_highlight() {
        assert_eq!(DayHighlight::derive(true, true), DayHighlight::Urgent);
        assert_eq!(DayHighlight::derive(true, false), DayHighlight::Urgent);
        assert_eq!(DayHighlight::derive(false, true), DayHighlight::Inherited);
        assert_eq!(DayHighlight::derive(false, false), DayHighlight::Idle);
    }

    #[test]
    fn test_empty_buckets() {
        let mut week = week_of(date!(2024 - 03 - 15));
        assert!(!week.has_notes());
        assert_eq!(week.highlight(), WeekHighlight::Neutral);
        let day = week.day_mut(date!(2024 - 03 - 15));
        assert!(!day.has_notes());
        assert!(day.notes().is_empty());
        assert_eq!(week.day_highlight(date!(2024 - 03 - 15)), DayHighlight::Idle);
    }

    #[test]
    fn test_day_note_activates_week() {
        let mut week = week_of(date!(2024 - 03 - 15));
        week.day_mut(date!(2024 - 03 - 15)).add_note(note("Dentist"));
        assert!(!week.has_notes());
        assert!(week.has_any_notes());
        assert_eq!(week.highlight(), WeekHighlight::Active);
        assert_eq!(week.day_highlight(date!(2024 - 03 - 15)), DayHighlight::Urgent);
        assert_eq!(
            week.day_highlight(date!(2024 - 03 - 14)),
            DayHighlight::Inherited
        );
        week.add_note(note("Sprint review"));
        assert_eq!(week.highlight(), WeekHighlight::Active);
        assert_eq!(week.day_highlight(date!(2024 - 03 - 15)), DayHighlight::Urgent);
        assert_eq!(
            week.day_highlight(date!(2024 - 03 - 14)),
            DayHighlight::Inherited
        );
    }

    #[test]
    fn test_removing_last_day_note_idles_week() {
        let mut week = week_of(date!(2024 - 03 - 11));
        let dentist = note("Dentist");
        let id = dentist.id();
        week.day_mut(date!(2024 - 03 - 15)).add_note(dentist);
        week.day_mut(date!(2024 - 03 - 14));
        assert_eq!(week.highlight(), WeekHighlight::Active);
        week.day_mut(date!(2024 - 03 - 15)).remove_note(id);
        assert_eq!(week.highlight(), WeekHighlight::Neutral);
        assert_eq!(week.day_highlight(date!(2024 - 03 - 15)), DayHighlight::Idle);
        assert_eq!(week.day_highlight(date!(2024 - 03 - 14)), DayHighlight::Idle);
    }

    #[test]
    fn test_week_note_cascades_to_existing_days() {
        let mut week = week_of(date!(2024 - 03 - 11));
        for d in [date!(2024 - 03 - 11), date!(2024 - 03 - 17)] {
            week.day_mut(d);
        }
        week.add_note(note("Plan"));
        assert!(week
            .days()
            .all(|day| week.day_highlight(day.key().date()) == DayHighlight::Inherited));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut week = week_of(date!(2024 - 03 - 11));
        let day = week.day_mut(date!(2024 - 03 - 12));
        for title in ["one", "two", "three"] {
            day.add_note(note(title));
        }
        let titles = day.notes().iter().map(Note::title).collect::<Vec<_>>();
        assert_eq!(titles, ["one", "two", "three"]);
    }

    #[test]
    fn test_readding_same_id_replaces() {
        let mut week = week_of(date!(2024 - 03 - 11));
        let n = note("once");
        week.add_note(n.clone());
        week.add_note(n.clone());
        assert_eq!(week.notes().len(), 1);
        assert_eq!(week.notes(), [n]);
    }

    #[test]
    fn test_remove_note_reverts_highlight() {
        let mut week = week_of(date!(2024 - 03 - 11));
        week.add_note(note("Plan"));
        let dentist = note("Dentist");
        let id = dentist.id();
        week.day_mut(date!(2024 - 03 - 15)).add_note(dentist);
        assert_eq!(week.day_highlight(date!(2024 - 03 - 15)), DayHighlight::Urgent);
        let removed = week.day_mut(date!(2024 - 03 - 15)).remove_note(id);
        assert_eq!(removed.as_ref().map(Note::title), Some("Dentist"));
        assert_eq!(
            week.day_highlight(date!(2024 - 03 - 15)),
            DayHighlight::Inherited
        );
        assert_eq!(week.day_mut(date!(2024 - 03 - 15)).remove_note(id), None);
    }

    #[test]
    #[should_panic(expected = "does not belong to")]
    fn test_day_outside_week() {
        let mut week = week_of(date!(2024 - 03 - 11));
        week.day_mut(date!(2024 - 03 - 18));
    }
}
