pub mod alert_popup;
pub mod apply_popup;
pub mod detail_pane;
pub mod help_popup;
pub mod profile_popup;
pub mod sidebar;
pub mod status_bar;
pub mod styles;
pub mod switch;

use crate::app::App;
use crate::controller::LoadState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const SPINNER: &[char] = &['◐', '◓', '◑', '◒'];

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    match app.controller.load_state() {
        LoadState::Idle | LoadState::Loading => draw_loading(frame, app, chunks[0]),
        LoadState::NotFound => draw_not_found(frame, app, chunks[0]),
        LoadState::Loaded(_) => draw_dual_pane(frame, app, chunks[0]),
    }

    status_bar::draw(frame, app, chunks[1]);

    // Popup overlays (drawn on top)
    if app.apply_popup.is_some() {
        apply_popup::draw(frame, app);
    }
    if app.profile_popup.is_some() {
        profile_popup::draw(frame, app);
    }
    if app.show_help {
        help_popup::draw(frame, app);
    }
    if app.controller.alert().is_some() {
        alert_popup::draw(frame, app);
    }
}

fn draw_dual_pane(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    detail_pane::draw(frame, app, chunks[0]);
    sidebar::draw(frame, app, chunks[1]);
}

fn draw_loading(frame: &mut Frame, app: &App, area: Rect) {
    let spin = SPINNER[app.spinner_frame % SPINNER.len()];
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Loading project...", spin),
            Style::default().fg(Color::Gray),
        )),
    ];
    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(styles::dim_style()));
    frame.render_widget(para, area);
}

fn draw_not_found(frame: &mut Frame, app: &App, area: Rect) {
    let back_hint = if app.history.is_empty() {
        "Backspace / q  Back to Projects"
    } else {
        "Backspace  Back to previous project"
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Project not found",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "The project you're looking for doesn't exist or has been removed.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(back_hint, styles::header_style())),
    ];
    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(styles::dim_style()));
    frame.render_widget(para, area);
}

/// Create a centered rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Section heading: `── Title ──`.
pub fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(format!("── {} ──", title), styles::header_style()))
}
