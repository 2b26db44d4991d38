use crate::app::App;
use crate::data::project::initials;
use crate::ui::{centered_rect, styles};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App) {
    let card = match &app.profile_popup {
        Some(c) => c,
        None => return,
    };

    let area = centered_rect(40, 30, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Profile ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  ({}) ", initials(&card.name)),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                card.name.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("       {}", card.role_label),
            styles::dim_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Email  ", styles::dim_style()),
            Span::styled(card.email.as_str(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Esc to close", styles::dim_style())),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
