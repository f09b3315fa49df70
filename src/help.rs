use crate::theme::{BASE_STYLE, STATUS_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static BINDINGS: &[(&str, &str)] = &[
    ("h, LEFT", "Previous day"),
    ("l, RIGHT", "Next day"),
    ("k, UP", "Previous week"),
    ("j, DOWN", "Next week"),
    ("p, PAGE UP", "Previous month"),
    ("n, PAGE DOWN", "Next month"),
    ("0, HOME", "Jump to today"),
    ("g", "Input date to jump to"),
    ("a", "Add a note to the day"),
    ("w", "Add a note to the week"),
    ("ENTER", "Show the day's notes"),
    ("W", "Show the week's notes"),
    ("  j, k", "Select a note (in the note list)"),
    ("  d, DELETE", "Delete the selected note"),
    ("?", "Show this help"),
    ("q, ESC, CTRL-C", "Quit"),
];

const KEY_WIDTH: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help;

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = BINDINGS
            .iter()
            .map(|&(keys, desc)| {
                Line::from_iter([
                    Span::raw(format!("{keys:<width$}", width = KEY_WIDTH)),
                    Span::raw(desc),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::styled("Press the Any Key to dismiss.", STATUS_STYLE));
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        Paragraph::new(text)
            .style(BASE_STYLE)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .render(help_area, buf);
    }
}
