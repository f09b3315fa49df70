use crate::theme::{
    form::{FOCUSED_FIELD_STYLE, LABEL_STYLE},
    BASE_STYLE, STATUS_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 48;
const OUTER_HEIGHT: u16 = 9;
const LABEL_WIDTH: usize = 7;

/// Popup for entering the title & body of a new note
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NoteForm;

impl StatefulWidget for NoteForm {
    type State = NoteFormState;

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
            .title(format!(" {} ", state.heading))
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        let value_width = usize::from(text_area.width).saturating_sub(LABEL_WIDTH + 1);
        Text::from_iter([
            state.field_line("Title:", Field::Title, value_width),
            Line::default(),
            state.field_line("Body:", Field::Body, value_width),
            Line::default(),
            Line::styled("TAB: next field  ENTER: save  ESC: cancel", STATUS_STYLE).centered(),
        ])
        .style(BASE_STYLE)
        .render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Field {
    Title,
    Body,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct NoteFormState {
    heading: String,
    title: String,
    body: String,
    focus: Field,
}

impl NoteFormState {
    pub(crate) fn new(heading: String) -> NoteFormState {
        NoteFormState {
            heading,
            title: String::new(),
            body: String::new(),
            focus: Field::Title,
        }
    }

    fn field_line(&self, label: &'static str, field: Field, width: usize) -> Line<'static> {
        let value = match field {
            Field::Title => &self.title,
            Field::Body => &self.body,
        };
        let (value, style) = if field == self.focus {
            (format!("{value}_"), FOCUSED_FIELD_STYLE)
        } else {
            (value.clone(), BASE_STYLE)
        };
        // Keep the end of the input, where the user is typing, in view
        let skip = value.chars().count().saturating_sub(width);
        let shown = value.chars().skip(skip).collect::<String>();
        Line::from_iter([
            Span::styled(format!("{label:<width$}", width = LABEL_WIDTH), LABEL_STYLE),
            Span::raw(" "),
            Span::styled(shown, style),
        ])
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Body => &mut self.body,
        }
    }

    pub(crate) fn handle_input(&mut self, input: NoteFormInput) -> NoteFormOutput {
        match input {
            NoteFormInput::Char(ch) if !ch.is_control() => {
                self.focused_mut().push(ch);
                NoteFormOutput::Ok
            }
            NoteFormInput::Backspace if self.focused_mut().pop().is_some() => NoteFormOutput::Ok,
            NoteFormInput::NextField => {
                self.focus = match self.focus {
                    Field::Title => Field::Body,
                    Field::Body => Field::Title,
                };
                NoteFormOutput::Ok
            }
            NoteFormInput::Submit => {
                let title = self.title.trim().to_owned();
                let body = Some(self.body.trim().to_owned()).filter(|b| !b.is_empty());
                NoteFormOutput::Submit { title, body }
            }
            _ => NoteFormOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NoteFormInput {
    Char(char),
    Backspace,
    NextField,
    Submit,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum NoteFormOutput {
    Ok,
    Invalid,
    Submit { title: String, body: Option<String> },
}
