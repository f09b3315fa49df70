use crate::agenda::{CalendarSession, InvalidDate, Scope, YearMonth};
use crate::calendar::Calendar;
use crate::detail::{Detail, DetailInput, DetailOutput, DetailState};
use crate::goto::{GoTo, GoToInput, GoToOutput, GoToState};
use crate::help::Help;
use crate::noteform::{NoteForm, NoteFormInput, NoteFormOutput, NoteFormState};
use crate::theme::{BASE_STYLE, ERROR_STYLE, STATUS_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Span,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::{Date, Duration};

static HINT: &str = "Press ? for help";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    session: CalendarSession,
    today: Date,
    // Invariant: always inside the session's current month
    cursor: Date,
    state: AppState,
    status: Option<Status>,
}

impl App {
    pub(crate) fn new(session: CalendarSession, today: Date) -> App {
        let month = session.month();
        let cursor = if YearMonth::containing(today) == month {
            today
        } else {
            month.first_day()
        };
        App {
            session,
            today,
            cursor,
            state: AppState::Calendar,
            status: None,
        }
    }

    pub(crate) fn start_date(mut self, date: Date) -> App {
        self.move_cursor_to(date);
        self
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        log::info!("event=app_start month=\"{}\"", self.session.month());
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        log::info!(
            "event=app_stop weeks={} days={}",
            self.session.store().week_count(),
            self.session.store().day_count()
        );
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&mut *self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => {
                self.status = None;
                match key {
                    KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                    KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                    KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
                    KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
                    KeyCode::Char('p') | KeyCode::PageUp => self.change_month(-1),
                    KeyCode::Char('n') | KeyCode::PageDown => self.change_month(1),
                    KeyCode::Char('0') | KeyCode::Home => {
                        self.move_cursor_to(self.today);
                        true
                    }
                    KeyCode::Char('g') => {
                        self.state = AppState::GoingTo(GoToState::new());
                        true
                    }
                    KeyCode::Char('a') => self.open_form(Ok(Scope::day(self.cursor))),
                    KeyCode::Char('w') => self.open_form(Scope::week(self.cursor)),
                    KeyCode::Enter => self.open_detail(Ok(Scope::day(self.cursor))),
                    KeyCode::Char('W') => self.open_detail(Scope::week(self.cursor)),
                    KeyCode::Char('q') | KeyCode::Esc => {
                        self.state = AppState::Quitting;
                        true
                    }
                    KeyCode::Char('?') => {
                        self.state = AppState::Helping;
                        true
                    }
                    _ => false,
                }
            }
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::GoingTo(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    return true;
                }
                let output = match key {
                    KeyCode::Char('-') => state.handle_input(GoToInput::Negative),
                    KeyCode::Char('+') => state.handle_input(GoToInput::Positive),
                    KeyCode::Char(ch) => match digit_value(ch) {
                        Some(d) => state.handle_input(GoToInput::Digit(d)),
                        None => GoToOutput::Invalid,
                    },
                    KeyCode::Backspace | KeyCode::Delete => {
                        state.handle_input(GoToInput::Backspace)
                    }
                    KeyCode::Enter => state.handle_input(GoToInput::Enter),
                    _ => GoToOutput::Invalid,
                };
                match output {
                    GoToOutput::Ok => true,
                    GoToOutput::Invalid => false,
                    GoToOutput::Jump(date) => {
                        self.state = AppState::Calendar;
                        self.move_cursor_to(date);
                        true
                    }
                }
            }
            AppState::Editing { scope, form } => {
                let scope = *scope;
                let output = match key {
                    KeyCode::Esc => {
                        self.state = AppState::Calendar;
                        return true;
                    }
                    KeyCode::Char(ch) => form.handle_input(NoteFormInput::Char(ch)),
                    KeyCode::Backspace => form.handle_input(NoteFormInput::Backspace),
                    KeyCode::Tab | KeyCode::BackTab => {
                        form.handle_input(NoteFormInput::NextField)
                    }
                    KeyCode::Enter => form.handle_input(NoteFormInput::Submit),
                    _ => NoteFormOutput::Invalid,
                };
                match output {
                    NoteFormOutput::Ok => true,
                    NoteFormOutput::Invalid => false,
                    NoteFormOutput::Submit { title, body } => {
                        self.state = AppState::Calendar;
                        self.add_note(scope, title, body)
                    }
                }
            }
            AppState::Viewing(state) => {
                let output = match key {
                    KeyCode::Char('j') | KeyCode::Down => state.handle_input(DetailInput::Down),
                    KeyCode::Char('k') | KeyCode::Up => state.handle_input(DetailInput::Up),
                    KeyCode::Char('d') | KeyCode::Delete => {
                        state.handle_input(DetailInput::Delete)
                    }
                    _ => state.handle_input(DetailInput::Close),
                };
                match output {
                    DetailOutput::Ok => true,
                    DetailOutput::Invalid => false,
                    DetailOutput::Delete(id) => {
                        let scope = state.scope();
                        let removed = self.session.remove_note(scope, id).is_some();
                        state.refresh(self.session.request_detail(scope));
                        removed
                    }
                    DetailOutput::Close => {
                        self.state = AppState::Calendar;
                        true
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn move_cursor(&mut self, days: i64) -> bool {
        match self.cursor.checked_add(Duration::days(days)) {
            Some(date) => {
                self.move_cursor_to(date);
                true
            }
            None => false,
        }
    }

    // Moves the cursor, following it to its month if needed
    fn move_cursor_to(&mut self, date: Date) {
        let month = YearMonth::containing(date);
        if month != self.session.month() {
            self.session.jump_to(month);
        }
        self.cursor = date;
    }

    fn change_month(&mut self, delta: i32) -> bool {
        match self.session.navigate(delta) {
            Ok(month) => {
                let day = self.cursor.day().min(month.days());
                self.cursor = month.day(day).unwrap_or_else(|| month.first_day());
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    fn open_form(&mut self, scope: Result<Scope, InvalidDate>) -> bool {
        match scope {
            Ok(scope) => {
                let form = NoteFormState::new(format!("New note for {scope}"));
                self.state = AppState::Editing { scope, form };
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    fn open_detail(&mut self, scope: Result<Scope, InvalidDate>) -> bool {
        match scope {
            Ok(scope) => {
                let notes = self.session.request_detail(scope);
                self.state = AppState::Viewing(DetailState::new(scope, notes));
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    fn add_note(&mut self, scope: Scope, title: String, body: Option<String>) -> bool {
        match self.session.add_note(scope, title, body) {
            Ok(_) => {
                self.status = Some(Status::Info(format!("Added note to {scope}")));
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    fn report(&mut self, e: InvalidDate) {
        log::warn!("event=invalid_date error=\"{e}\"");
        self.status = Some(Status::Error(e.to_string()));
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let grid = self.session.request_grid();
        let [cal_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        match grid {
            Ok(grid) => Calendar::new(&grid, self.today)
                .cursor(self.cursor)
                .render(cal_area, buf),
            Err(e) => self.report(e),
        }
        let status = match &self.status {
            Some(Status::Info(msg)) => Span::styled(msg.as_str(), STATUS_STYLE),
            Some(Status::Error(msg)) => Span::styled(msg.as_str(), ERROR_STYLE),
            None => Span::styled(HINT, STATUS_STYLE),
        };
        status.render(status_area, buf);
        match self.state {
            AppState::Helping => Help.render(area, buf),
            AppState::GoingTo(ref mut state) => GoTo.render(area, buf, state),
            AppState::Editing { ref mut form, .. } => NoteForm.render(area, buf, form),
            AppState::Viewing(ref mut state) => Detail.render(area, buf, state),
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

fn digit_value(ch: char) -> Option<u8> {
    ch.to_digit(10).and_then(|d| u8::try_from(d).ok())
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    GoingTo(GoToState),
    Editing { scope: Scope, form: NoteFormState },
    Viewing(DetailState),
    Quitting,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Status {
    Info(String),
    Error(String),
}
