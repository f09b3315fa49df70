use crate::agenda::{DayHighlight, WeekHighlight};
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const URGENT_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

pub(crate) const INHERITED_STYLE: Style = Style::new().fg(Color::LightYellow).bg(Color::Black);

pub(crate) const ACTIVE_WEEK_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

pub(crate) const NEUTRAL_WEEK_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const TODAY_MODIFIER: Modifier = Modifier::UNDERLINED;

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const ERROR_STYLE: Style = BASE_STYLE.fg(Color::LightRed);

pub(crate) fn day_style(highlight: DayHighlight) -> Style {
    match highlight {
        DayHighlight::Urgent => URGENT_STYLE,
        DayHighlight::Inherited => INHERITED_STYLE,
        DayHighlight::Idle => BASE_STYLE,
    }
}

pub(crate) fn week_style(highlight: WeekHighlight) -> Style {
    match highlight {
        WeekHighlight::Active => ACTIVE_WEEK_STYLE,
        WeekHighlight::Neutral => NEUTRAL_WEEK_STYLE,
    }
}

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}

pub(crate) mod form {
    use super::*;

    pub(crate) const LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const FOCUSED_FIELD_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}

pub(crate) mod detail {
    use super::*;

    pub(crate) const SELECTED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

    pub(crate) const BODY_STYLE: Style = BASE_STYLE.fg(Color::Gray);
}
