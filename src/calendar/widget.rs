use crate::agenda::{DayCell, Grid, WeekCell, WeekdayExt};
use crate::theme::{day_style, week_style, TITLE_STYLE, TODAY_MODIFIER, WEEKDAY_STYLE};
use ratatui::{prelude::*, widgets::*};
use time::Date;

static HEADER: &str = "Week   Mo   Tu   We   Th   Fr   Sa   Su  ";

/// Number of columns taken up by the week-summary column, including the gap
/// after it
const WEEK_WIDTH: u16 = 6;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 5;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = WEEK_WIDTH + 7 * DAY_WIDTH;

/// Number of lines taken up by the title, the header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

const ACS_HLINE: char = '─';

/// Draws a month [`Grid`].  The day under the cursor is bracketed, days with
/// notes are marked with an asterisk, and today is underlined.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Calendar<'a> {
    grid: &'a Grid,
    today: Date,
    cursor: Option<Date>,
}

impl<'a> Calendar<'a> {
    pub(crate) fn new(grid: &'a Grid, today: Date) -> Calendar<'a> {
        Calendar {
            grid,
            today,
            cursor: None,
        }
    }

    pub(crate) fn cursor(mut self, date: Date) -> Self {
        self.cursor = Some(date);
        self
    }
}

impl Widget for Calendar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([MAIN_WIDTH.min(area.width)])
            .flex(layout::Flex::Center)
            .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.grid.month().to_string());
        canvas.draw_header();
        for (i, row) in std::iter::zip(0u16.., self.grid.rows()) {
            canvas.draw_week(i, &row.week);
            for (wd, cell) in std::iter::zip(0u16.., &row.days) {
                if let Some(day) = cell.as_day() {
                    let date = day.key.date();
                    debug_assert_eq!(u16::from(date.weekday().index0()), wd);
                    debug_assert!(row.week.key.contains(day.key));
                    canvas.draw_day(
                        i,
                        wd,
                        day,
                        self.cursor == Some(date),
                        date == self.today,
                    );
                }
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, title, Some(TITLE_STYLE));
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_week(&mut self, week_no: u16, week: &WeekCell) {
        let label = match week.notes.len() {
            0 => String::from("-"),
            n => n.to_string(),
        };
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            0,
            format!("{label:^5}"),
            Some(week_style(week.highlight)),
        );
    }

    fn draw_day(&mut self, week_no: u16, wd: u16, day: &DayCell, selected: bool, today: bool) {
        let (open, close) = if selected { ('[', ']') } else { (' ', ' ') };
        let marker = if day.notes.is_empty() { ' ' } else { '*' };
        let mut style = day_style(day.highlight);
        if today {
            style = style.add_modifier(TODAY_MODIFIER);
        }
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES,
            WEEK_WIDTH + DAY_WIDTH * wd,
            format!("{open}{:2}{close}{marker}", day.day),
            Some(style),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
