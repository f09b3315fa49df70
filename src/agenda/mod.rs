//! Notes attached to calendar days and weeks, and the month grid built from
//! them

mod bucket;
mod grid;
mod keys;
mod note;
mod session;
mod store;
pub(crate) use self::bucket::{DayHighlight, WeekHighlight};
pub(crate) use self::grid::{DayCell, Grid, WeekCell};
pub(crate) use self::keys::{DayKey, InvalidDate, WeekdayExt, YearMonth};
pub(crate) use self::note::{Note, NoteId};
pub(crate) use self::session::{CalendarSession, Scope};
