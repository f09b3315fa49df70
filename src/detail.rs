use crate::agenda::{Note, NoteId, Scope};
use crate::theme::{
    detail::{BODY_STYLE, SELECTED_STYLE},
    BASE_STYLE, STATUS_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 52;

static FOOTER: &str = "j/k: select  d: delete  other keys: close";

/// Popup listing the notes attached to a day or week
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Detail;

impl StatefulWidget for Detail {
    type State = DetailState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let mut lines = Vec::new();
        if state.notes.is_empty() {
            lines.push(Line::raw("No notes"));
        }
        for (i, note) in state.notes.iter().enumerate() {
            let style = if i == state.selected {
                SELECTED_STYLE
            } else {
                BASE_STYLE
            };
            lines.push(Line::styled(format!("• {}", note.title()), style));
            lines.push(Line::styled(format!("  {}", note.body()), BODY_STYLE));
        }
        lines.push(Line::default());
        lines.push(Line::styled(FOOTER, STATUS_STYLE).centered());
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.height);
        let [outer_area] = Layout::horizontal([OUTER_WIDTH.min(area.width)])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let para = Paragraph::new(text).style(BASE_STYLE).block(
            Block::bordered()
                .title(format!(" {} ", state.scope))
                .title_alignment(Alignment::Center),
        );
        para.render(outer_area.inner(Margin::new(1, 1)), buf);
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DetailState {
    scope: Scope,
    notes: Vec<Note>,
    selected: usize,
}

impl DetailState {
    pub(crate) fn new(scope: Scope, notes: Vec<Note>) -> DetailState {
        DetailState {
            scope,
            notes,
            selected: 0,
        }
    }

    pub(crate) fn scope(&self) -> Scope {
        self.scope
    }

    /// Replaces the listed notes, keeping the selection in bounds
    pub(crate) fn refresh(&mut self, notes: Vec<Note>) {
        self.notes = notes;
        self.selected = self.selected.min(self.notes.len().saturating_sub(1));
    }

    pub(crate) fn handle_input(&mut self, input: DetailInput) -> DetailOutput {
        match input {
            DetailInput::Down if self.selected + 1 < self.notes.len() => {
                self.selected += 1;
                DetailOutput::Ok
            }
            DetailInput::Up if self.selected > 0 => {
                self.selected -= 1;
                DetailOutput::Ok
            }
            DetailInput::Delete => match self.notes.get(self.selected) {
                Some(note) => DetailOutput::Delete(note.id()),
                None => DetailOutput::Invalid,
            },
            DetailInput::Close => DetailOutput::Close,
            _ => DetailOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DetailInput {
    Up,
    Down,
    Delete,
    Close,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DetailOutput {
    Ok,
    Invalid,
    Delete(NoteId),
    Close,
}
