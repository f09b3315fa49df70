use super::grid::{build_grid, Grid};
use super::keys::{day_key_of, week_key_of, DayKey, InvalidDate, WeekKey, YearMonth};
use super::note::{Note, NoteId};
use super::store::CalendarStore;
use std::fmt;
use time::Date;

/// What a note is attached to
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Scope {
    Day(DayKey),
    Week(WeekKey),
}

impl Scope {
    pub(crate) fn day(date: Date) -> Scope {
        Scope::Day(day_key_of(date))
    }

    pub(crate) fn week(date: Date) -> Result<Scope, InvalidDate> {
        week_key_of(date).map(Scope::Week)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Day(key) => write!(f, "{key}"),
            Scope::Week(key) => write!(f, "{key}"),
        }
    }
}

/// One calendar view: the displayed month plus the store holding every note
/// entered so far.  All reads and writes from the UI go through here.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct CalendarSession {
    month: YearMonth,
    store: CalendarStore,
}

impl CalendarSession {
    pub(crate) fn new(month: YearMonth) -> CalendarSession {
        CalendarSession {
            month,
            store: CalendarStore::new(),
        }
    }

    pub(crate) fn month(&self) -> YearMonth {
        self.month
    }

    pub(crate) fn store(&self) -> &CalendarStore {
        &self.store
    }

    /// Moves the displayed month by `delta_months`.  On error, the displayed
    /// month is left unchanged.
    pub(crate) fn navigate(&mut self, delta_months: i32) -> Result<YearMonth, InvalidDate> {
        let month = self.month.offset(delta_months)?;
        log::debug!("event=navigate from=\"{}\" to=\"{month}\"", self.month);
        self.month = month;
        Ok(month)
    }

    pub(crate) fn jump_to(&mut self, month: YearMonth) {
        log::debug!("event=jump from=\"{}\" to=\"{month}\"", self.month);
        self.month = month;
    }

    pub(crate) fn add_day_note(
        &mut self,
        date: Date,
        title: String,
        body: Option<String>,
    ) -> Result<NoteId, InvalidDate> {
        let bucket = self.store.resolve_day(date)?;
        let note = Note::new(title, body);
        let id = note.id();
        log::info!(
            "event=note_add scope=day date={} id={id} created_at={}",
            bucket.key(),
            note.created_at()
        );
        bucket.add_note(note);
        Ok(id)
    }

    /// Attaches a note to the week containing `date`
    pub(crate) fn add_week_note(
        &mut self,
        date: Date,
        title: String,
        body: Option<String>,
    ) -> Result<NoteId, InvalidDate> {
        let bucket = self.store.resolve_week(date)?;
        let note = Note::new(title, body);
        let id = note.id();
        log::info!(
            "event=note_add scope=week monday={} id={id} created_at={}",
            bucket.key().monday(),
            note.created_at()
        );
        bucket.add_note(note);
        Ok(id)
    }

    /// Detaches a note from `date`.  Returns `None` if the date has no such
    /// note.
    pub(crate) fn remove_day_note(&mut self, date: Date, id: NoteId) -> Option<Note> {
        let removed = self.store.day_mut(date)?.remove_note(id)?;
        log::info!("event=note_remove scope=day date={} id={id}", day_key_of(date));
        Some(removed)
    }

    pub(crate) fn remove_week_note(&mut self, date: Date, id: NoteId) -> Option<Note> {
        let week = self.store.week_mut(date)?;
        let removed = week.remove_note(id)?;
        log::info!(
            "event=note_remove scope=week monday={} id={id}",
            week.key().monday()
        );
        Some(removed)
    }

    pub(crate) fn add_note(
        &mut self,
        scope: Scope,
        title: String,
        body: Option<String>,
    ) -> Result<NoteId, InvalidDate> {
        match scope {
            Scope::Day(key) => self.add_day_note(key.date(), title, body),
            Scope::Week(key) => self.add_week_note(key.monday(), title, body),
        }
    }

    pub(crate) fn remove_note(&mut self, scope: Scope, id: NoteId) -> Option<Note> {
        match scope {
            Scope::Day(key) => self.remove_day_note(key.date(), id),
            Scope::Week(key) => self.remove_week_note(key.monday(), id),
        }
    }

    pub(crate) fn request_detail(&self, scope: Scope) -> Vec<Note> {
        match scope {
            Scope::Day(key) => self.request_day_detail(key.date()),
            Scope::Week(key) => self.request_week_detail(key.monday()),
        }
    }

    /// Builds the grid for the displayed month
    pub(crate) fn request_grid(&mut self) -> Result<Grid, InvalidDate> {
        self.request_grid_for(self.month)
    }

    pub(crate) fn request_grid_for(&mut self, month: YearMonth) -> Result<Grid, InvalidDate> {
        build_grid(month, &mut self.store)
    }

    /// Notes attached to `date` itself, oldest first.  Unknown dates have no
    /// notes and are not added to the store.
    pub(crate) fn request_day_detail(&self, date: Date) -> Vec<Note> {
        self.store
            .day(date)
            .map(|day| day.notes().to_vec())
            .unwrap_or_default()
    }

    /// Notes attached to the week containing `date`, oldest first
    pub(crate) fn request_week_detail(&self, date: Date) -> Vec<Note> {
        self.store
            .week(date)
            .map(|week| week.notes().to_vec())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agenda::bucket::{DayHighlight, WeekHighlight};
    use time::macros::date;
    use time::Month;

    fn session(year: i32, month: Month) -> CalendarSession {
        CalendarSession::new(YearMonth::new(year, month).unwrap())
    }

    #[test]
    fn test_dentist() {
        let mut session = session(2024, Month::March);
        let id = session
            .add_day_note(date!(2024 - 03 - 15), String::from("Dentist"), None)
            .unwrap();
        let detail = session.request_day_detail(date!(2024 - 03 - 15));
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].title(), "Dentist");
        assert_eq!(detail[0].id(), id);
        let grid = session.request_grid().unwrap();
        let (r, c) = grid.position_of(date!(2024 - 03 - 15)).unwrap();
        let row = &grid.rows()[r];
        assert_eq!(row.week.highlight, WeekHighlight::Active);
        assert!(row.week.notes.is_empty());
        assert_eq!(row.days[c].as_day().unwrap().highlight, DayHighlight::Urgent);
        let thu = row.days[c - 1].as_day().unwrap();
        assert_eq!(thu.day, 14);
        assert_eq!(thu.highlight, DayHighlight::Inherited);
    }

    #[test]
    fn test_day_note_leaves_other_weeks_neutral() {
        let mut session = session(2024, Month::March);
        session
            .add_day_note(date!(2024 - 03 - 15), String::from("Dentist"), None)
            .unwrap();
        let grid = session.request_grid().unwrap();
        let (r, _) = grid.position_of(date!(2024 - 03 - 15)).unwrap();
        for (i, row) in grid.rows().iter().enumerate().filter(|&(i, _)| i != r) {
            assert_eq!(row.week.highlight, WeekHighlight::Neutral, "row {i}");
            assert!(row
                .days
                .iter()
                .filter_map(|cell| cell.as_day())
                .all(|day| day.highlight == DayHighlight::Idle));
        }
    }

    #[test]
    fn test_notes_survive_navigation() {
        let mut session = session(2024, Month::March);
        session.request_grid().unwrap();
        session
            .add_day_note(date!(2024 - 03 - 15), String::from("Dentist"), None)
            .unwrap();
        session.navigate(1).unwrap();
        let april = session.request_grid().unwrap();
        assert_eq!(april.month(), YearMonth::new(2024, Month::April).unwrap());
        assert!(april.position_of(date!(2024 - 03 - 15)).is_none());
        session.navigate(-1).unwrap();
        let march = session.request_grid().unwrap();
        let (r, c) = march.position_of(date!(2024 - 03 - 15)).unwrap();
        let cell = march.rows()[r].days[c].as_day().unwrap();
        assert_eq!(cell.notes.len(), 1);
        assert_eq!(cell.notes[0].title(), "Dentist");
    }

    #[test]
    fn test_week_shared_across_years() {
        let mut session = session(2024, Month::December);
        session
            .add_week_note(date!(2024 - 12 - 30), String::from("Year end"), None)
            .unwrap();
        let dec = session.request_grid().unwrap();
        session.navigate(1).unwrap();
        let jan = session.request_grid().unwrap();
        let dec_row = dec.rows().last().unwrap();
        let jan_row = &jan.rows()[0];
        assert_eq!(dec_row.week.key, jan_row.week.key);
        assert_eq!(dec_row.week.key.monday(), date!(2024 - 12 - 30));
        assert_eq!(dec_row.week.highlight, WeekHighlight::Active);
        assert_eq!(jan_row.week.highlight, WeekHighlight::Active);
        assert_eq!(dec_row.week.notes, jan_row.week.notes);
        assert_eq!(
            session.request_week_detail(date!(2025 - 01 - 05))[0].title(),
            "Year end"
        );
        assert_eq!(session.store().week_count(), 10);
    }

    #[test]
    fn test_week_note_from_other_month_grid() {
        let mut session = session(2025, Month::January);
        session.request_grid().unwrap();
        session
            .add_week_note(date!(2025 - 01 - 01), String::from("Resolutions"), None)
            .unwrap();
        let dec = session
            .request_grid_for(YearMonth::new(2024, Month::December).unwrap())
            .unwrap();
        let row = dec.rows().last().unwrap();
        assert_eq!(row.week.highlight, WeekHighlight::Active);
        let (_, c) = dec.position_of(date!(2024 - 12 - 31)).unwrap();
        assert_eq!(row.days[c].as_day().unwrap().highlight, DayHighlight::Inherited);
    }

    #[test]
    fn test_detail_does_not_create() {
        let session = session(2024, Month::March);
        assert!(session.request_day_detail(date!(2024 - 03 - 15)).is_empty());
        assert!(session.request_week_detail(date!(2024 - 03 - 15)).is_empty());
        assert_eq!(session.store().week_count(), 0);
    }

    #[test]
    fn test_navigate_out_of_range() {
        let mut session = CalendarSession::new(YearMonth::containing(Date::MAX));
        session
            .add_day_note(Date::MAX, String::from("Last day"), None)
            .unwrap();
        session.request_grid().unwrap();
        let before = session.clone();
        assert_eq!(session.navigate(1), Err(InvalidDate::OutOfRange));
        assert_eq!(session, before);
        assert_eq!(
            session.navigate(-1),
            Ok(YearMonth::new(9999, Month::November).unwrap())
        );
    }

    #[test]
    fn test_remove_notes() {
        let mut session = session(2024, Month::March);
        let day_id = session
            .add_day_note(date!(2024 - 03 - 15), String::from("Dentist"), None)
            .unwrap();
        let week_id = session
            .add_week_note(date!(2024 - 03 - 15), String::from("Errands"), None)
            .unwrap();
        assert!(session.remove_day_note(date!(2024 - 03 - 15), week_id).is_none());
        assert!(session.remove_week_note(date!(2024 - 03 - 15), day_id).is_none());
        let removed = session.remove_day_note(date!(2024 - 03 - 15), day_id);
        assert_eq!(removed.as_ref().map(Note::title), Some("Dentist"));
        let grid = session.request_grid().unwrap();
        let (r, c) = grid.position_of(date!(2024 - 03 - 15)).unwrap();
        assert_eq!(
            grid.rows()[r].days[c].as_day().unwrap().highlight,
            DayHighlight::Inherited
        );
        assert!(session.remove_week_note(date!(2024 - 03 - 11), week_id).is_some());
        let grid = session.request_grid().unwrap();
        assert_eq!(grid.rows()[r].week.highlight, WeekHighlight::Neutral);
        assert_eq!(
            grid.rows()[r].days[c].as_day().unwrap().highlight,
            DayHighlight::Idle
        );
    }

    #[test]
    fn test_scope_dispatch() {
        let mut session = session(2024, Month::March);
        let day = Scope::day(date!(2024 - 03 - 15));
        let week = Scope::week(date!(2024 - 03 - 17)).unwrap();
        assert_eq!(day.to_string(), "2024-03-15");
        assert_eq!(week.to_string(), "week of 2024-03-11");
        let id = session
            .add_note(week, String::from("Errands"), None)
            .unwrap();
        session
            .add_note(day, String::from("Dentist"), None)
            .unwrap();
        assert_eq!(session.request_detail(week).len(), 1);
        assert_eq!(session.request_detail(day)[0].title(), "Dentist");
        assert!(session.remove_note(day, id).is_none());
        assert!(session.remove_note(week, id).is_some());
        assert!(session.request_detail(week).is_empty());
    }

    #[test]
    fn test_empty_title_accepted() {
        let mut session = session(2024, Month::March);
        session
            .add_day_note(date!(2024 - 03 - 01), String::new(), None)
            .unwrap();
        assert_eq!(session.request_day_detail(date!(2024 - 03 - 01))[0].title(), "");
    }
}
