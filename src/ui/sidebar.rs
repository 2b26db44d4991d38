use crate::app::{App, FocusPane};
use crate::controller::ApplyState;
use crate::data::project::{initials, Project};
use crate::ui::{section, styles, SPINNER};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let project = match app.project() {
        Some(p) => p,
        None => return,
    };
    let is_focused = app.focus_pane == FocusPane::Related;
    let border_style = if is_focused {
        styles::focused_border_style()
    } else {
        styles::unfocused_border_style()
    };
    let focus_marker = if is_focused { " ◄" } else { "" };

    let block = Block::default()
        .title(format!(" Overview{} ", focus_marker))
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut lines: Vec<Line> = Vec::new();
    creator_lines(project, &mut lines);
    contact_lines(project, &mut lines);
    application_lines(app, project, &mut lines);
    details_lines(project, &mut lines);
    related_lines(app, is_focused, &mut lines);

    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, area);
}

fn creator_lines<'a>(project: &'a Project, lines: &mut Vec<Line<'a>>) {
    lines.push(section("Project Creator"));
    lines.push(Line::from(vec![
        Span::styled(
            format!(" ({}) ", initials(&project.created_by_name)),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            project.created_by_name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "      Project Lead  (c: profile)",
        styles::dim_style(),
    )));
    lines.push(Line::from(""));
}

fn contact_lines<'a>(project: &'a Project, lines: &mut Vec<Line<'a>>) {
    let Some(contact) = project.contact_details.as_ref().filter(|_| project.has_contact()) else {
        return;
    };
    lines.push(section("Contact Information"));
    let rows = [
        ("Email  ", contact.email.as_deref(), Color::Blue),
        ("Phone  ", contact.phone.as_deref(), Color::Green),
        ("Website", contact.website.as_deref(), Color::Magenta),
    ];
    for (label, value, color) in rows {
        if let Some(value) = value {
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", label), styles::dim_style()),
                Span::styled(value, Style::default().fg(color)),
            ]));
        }
    }
    lines.push(Line::from(""));
}

fn application_lines<'a>(app: &App, project: &'a Project, lines: &mut Vec<Line<'a>>) {
    // Only students see the application box, and only on active projects
    if !app.controller.viewer().is_student() || !project.is_active() {
        return;
    }
    match app.controller.apply_state() {
        ApplyState::Applied { status } => {
            lines.push(section("Already Applied!"));
            lines.push(Line::from(Span::styled(
                " Your application has been sent to the project creator.",
                Style::default().fg(Color::Green),
            )));
            if let Some(state) = status {
                lines.push(Line::from(vec![
                    Span::styled(" Status: ", styles::dim_style()),
                    Span::styled(state.label().to_string(), styles::application_style(state)),
                ]));
            }
        }
        ApplyState::Submitting => {
            let spin = SPINNER[app.spinner_frame % SPINNER.len()];
            lines.push(section("Apply for this Project"));
            lines.push(Line::from(Span::styled(
                format!(" {} Submitting...", spin),
                Style::default().fg(Color::Yellow),
            )));
        }
        ApplyState::NotApplied => {
            lines.push(section("Apply for this Project"));
            lines.push(Line::from(Span::styled(
                " a  Apply Now",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
        }
    }
    lines.push(Line::from(""));
}

fn details_lines<'a>(project: &'a Project, lines: &mut Vec<Line<'a>>) {
    lines.push(section("Project Details"));
    lines.push(Line::from(vec![
        Span::styled(" Created   ", styles::dim_style()),
        Span::raw(project.created_date()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Status    ", styles::dim_style()),
        styles::badge(&project.status, styles::project_status_style(&project.status)),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Category  ", styles::dim_style()),
        Span::raw(project.category.as_str()),
    ]));
    if let Some(ref funding) = project.funding {
        lines.push(Line::from(vec![
            Span::styled(" Funding   ", styles::dim_style()),
            Span::styled(funding.as_str(), Style::default().fg(Color::Green)),
        ]));
    }
    lines.push(Line::from(""));
}

fn related_lines<'a>(app: &'a App, is_focused: bool, lines: &mut Vec<Line<'a>>) {
    let related = app.controller.related();
    if related.is_empty() {
        return;
    }
    lines.push(section("Related Opportunities"));
    for (i, rp) in related.iter().enumerate() {
        let selected = is_focused && i == app.related_cursor;
        let marker = if selected { "▸ " } else { "  " };
        let title_style = if selected {
            styles::selected_style()
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}", marker, rp.title), title_style),
            Span::raw(" "),
            Span::styled(format!("[{}]", rp.status), styles::dim_style()),
        ]));
        if !rp.description.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {}", truncate(&rp.description, 60)),
                styles::dim_style(),
            )));
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{}...", cut)
    }
}
