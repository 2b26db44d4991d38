use crate::data::project::ApplicationState;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn title_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD)
}

pub fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn focused_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn unfocused_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Project status: active stands out, everything else is muted.
pub fn project_status_style(status: &str) -> Style {
    if status == "active" {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Black).bg(Color::Gray)
    }
}

pub fn application_style(state: &ApplicationState) -> Style {
    match state {
        ApplicationState::Accepted => Style::default().fg(Color::Green),
        ApplicationState::Declined => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Yellow),
    }
}

/// Text rendered as a pill: ` text `.
pub fn badge<'a>(text: impl Into<String>, style: Style) -> Span<'a> {
    Span::styled(format!(" {} ", text.into()), style)
}

pub fn skill_style() -> Style {
    Style::default().fg(Color::Blue)
}

pub fn tag_style() -> Style {
    Style::default().fg(Color::Magenta)
}
