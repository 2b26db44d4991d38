use crate::app::App;
use crate::ui::centered_rect;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 75, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help: alum-board ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bold = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Cyan);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(Span::styled("Navigation", bold)),
        Line::from(""),
        key_line("↑/↓ or j/k", "Move within positions / related", key_style),
        key_line("Tab", "Switch between positions and related", key_style),
        key_line("Enter", "Apply for position / open related project", key_style),
        key_line("Backspace", "Back to previous project", key_style),
        key_line("PgUp/PgDn", "Scroll project details", key_style),
        key_line("r / F5", "Reload project", key_style),
        Line::from(""),
        Line::from(Span::styled("Project", bold)),
        Line::from(""),
        key_line("←/→", "Previous / next image", key_style),
        key_line("1-9", "Jump to image", key_style),
        key_line("f", "Show / hide filled positions", key_style),
        key_line("c", "Creator profile", key_style),
        key_line("p", "Selected candidate profile", key_style),
    ];
    if app.controller.viewer().is_student() {
        lines.push(key_line("a", "Apply for this project", key_style));
    }
    lines.extend([
        Line::from(""),
        Line::from(Span::styled("Quit", bold)),
        Line::from(""),
        key_line("q", "Quit application", key_style),
        key_line("Ctrl+C", "Quit application", key_style),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", dim)),
    ]);

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn key_line<'a>(key: &'a str, desc: &'a str, key_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", key), key_style),
        Span::raw(desc),
    ])
}
