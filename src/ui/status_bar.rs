use crate::app::App;
use crate::controller::LoadState;
use crate::ui::SPINNER;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    // Top line: keybinding hints
    let mut hints = vec![Span::styled(
        format!("[#{}]", app.controller.project_id().unwrap_or_default()),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if app.controller.is_busy() {
        let spin = SPINNER[app.spinner_frame % SPINNER.len()];
        hints.push(Span::styled(
            format!(" {}", spin),
            Style::default().fg(Color::Yellow),
        ));
    }
    hints.push(Span::raw("  │  "));
    let keys = if app.controller.can_apply() {
        "↑↓ nav  Tab pane  Enter select  ←→ images  a apply  f filled  Bksp back  F1 help  q quit"
    } else {
        "↑↓ nav  Tab pane  Enter select  ←→ images  f filled  Bksp back  F1 help  q quit"
    };
    hints.push(Span::styled(keys, Style::default().fg(Color::DarkGray)));
    let top = Line::from(hints);

    // Bottom line: viewer and project stats
    let summary = match app.controller.load_state() {
        LoadState::Loaded(p) => format!(
            " {} │ {} open positions │ {} related │ {} back",
            app.controller.viewer().label(),
            p.open_positions().count(),
            app.controller.related().len(),
            app.history.len(),
        ),
        LoadState::NotFound => format!(" {} │ not found", app.controller.viewer().label()),
        LoadState::Loading | LoadState::Idle => {
            format!(" {} │ loading", app.controller.viewer().label())
        }
    };
    let stats = Line::from(Span::styled(summary, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(vec![top, stats]), area);
}
