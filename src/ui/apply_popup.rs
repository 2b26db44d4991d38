use crate::app::App;
use crate::ui::{centered_rect, SPINNER};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let popup = match &app.apply_popup {
        Some(p) => p,
        None => return,
    };
    let project = match app.project() {
        Some(p) => p,
        None => return,
    };

    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" Apply for {} ", project.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Description
            Constraint::Length(1), // Position
            Constraint::Min(3),    // Message input
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    let intro = Paragraph::new(Line::from(Span::styled(
        "Write a message to introduce yourself and explain why you're interested in this project.",
        Style::default().fg(Color::Gray),
    )))
    .wrap(Wrap { trim: true });
    frame.render_widget(intro, chunks[0]);

    let position_title = app.controller.draft().position_id.and_then(|id| {
        project
            .positions
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.title.as_str())
    });
    let position_line = match position_title {
        Some(title) => Line::from(vec![
            Span::styled("Position: ", Style::default().fg(Color::DarkGray)),
            Span::styled(title, Style::default().fg(Color::Magenta)),
            Span::styled("  (Tab to clear)", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(
            "Position: any",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(position_line), chunks[1]);

    // Input field with border
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let input_inner = input_block.inner(chunks[2]);
    frame.render_widget(input_block, chunks[2]);

    let value = popup.input.value();
    let input_para = if value.is_empty() {
        Paragraph::new(Span::styled(
            "Tell us about yourself and why you want to work on this project...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(Span::raw(value))
    };
    frame.render_widget(input_para.wrap(Wrap { trim: false }), input_inner);

    if input_inner.width > 0 {
        let cursor = popup.input.visual_cursor() as u16;
        frame.set_cursor_position((
            input_inner.x + cursor % input_inner.width,
            input_inner.y + cursor / input_inner.width,
        ));
    }

    let hint = if app.is_submitting() {
        let spin = SPINNER[app.spinner_frame % SPINNER.len()];
        Line::from(Span::styled(
            format!("{} Submitting...", spin),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else if value.trim().is_empty() {
        Line::from(Span::styled(
            "Type a message  Esc cancel",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            "Enter submit application  Esc cancel",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(hint), chunks[3]);
}
