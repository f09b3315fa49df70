use crate::agenda::DayKey;
use crate::theme::{
    jumpto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::Date;

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 8;

/// Placeholder for each digit of the date, in typing order
const TEMPLATE: [char; 8] = ['Y', 'Y', 'Y', 'Y', 'M', 'M', 'D', 'D'];

/// Popup prompting for a date to move the cursor to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GoTo;

impl StatefulWidget for GoTo {
    type State = GoToState;

    /*
     * .................
     * .┌── Go To… ───┐.
     * .│             │.
     * .│ -YYYY-MM-DD │.
     * .│             │.
     * .│   [ENTER]   │.
     * .└─────────────┘.
     * .................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Go To… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let enter_style = if state.is_complete() {
            READY_ENTER_STYLE
        } else {
            BASE_STYLE
        };
        Text::from_iter([
            Line::default(),
            state.date_line(),
            Line::default(),
            // Only "[ENTER]" is underlined, not the padding around it
            Line::from(Span::styled("[ENTER]", enter_style)),
        ])
        .centered()
        .style(BASE_STYLE)
        .render(block_area.inner(Margin::new(1, 1)), buf);
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct GoToState {
    negative: bool,
    digits: Vec<u8>,
}

impl GoToState {
    pub(crate) fn new() -> GoToState {
        GoToState::default()
    }

    fn is_complete(&self) -> bool {
        self.digits.len() == TEMPLATE.len()
    }

    fn date_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw(if self.negative { "-" } else { " " })];
        for (i, &placeholder) in TEMPLATE.iter().enumerate() {
            if i == 4 || i == 6 {
                spans.push(Span::raw("-"));
            }
            spans.push(match self.digits.get(i) {
                Some(d) => Span::raw(d.to_string()),
                None => Span::styled(String::from(placeholder), UNFILLED_CELL_STYLE),
            });
        }
        Line::from(spans)
    }

    pub(crate) fn handle_input(&mut self, input: GoToInput) -> GoToOutput {
        match input {
            GoToInput::Negative if self.digits.is_empty() => {
                self.negative = !self.negative;
                GoToOutput::Ok
            }
            GoToInput::Positive if self.digits.is_empty() => {
                self.negative = false;
                GoToOutput::Ok
            }
            GoToInput::Digit(d) if d < 10 && !self.is_complete() => {
                self.digits.push(d);
                GoToOutput::Ok
            }
            GoToInput::Backspace if self.digits.pop().is_some() => GoToOutput::Ok,
            GoToInput::Enter if self.is_complete() => match self.to_date() {
                Some(date) => GoToOutput::Jump(date),
                None => GoToOutput::Invalid,
            },
            _ => GoToOutput::Invalid,
        }
    }

    fn to_date(&self) -> Option<Date> {
        let (year, rest) = self.digits.split_at_checked(4)?;
        let (month, day) = rest.split_at_checked(2)?;
        let mut year = i32::try_from(digits_value(year)).ok()?;
        if self.negative {
            year = -year;
        }
        let month = u8::try_from(digits_value(month)).ok()?;
        let day = u8::try_from(digits_value(day)).ok()?;
        DayKey::from_ymd(year, month, day).ok().map(DayKey::date)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToInput {
    Negative,
    Positive,
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToOutput {
    Ok,
    Invalid,
    Jump(Date),
}

fn digits_value(digits: &[u8]) -> u32 {
    digits.iter().fold(0, |acc, &d| acc * 10 + u32::from(d))
}
