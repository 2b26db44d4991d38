use crate::app::{App, FocusPane};
use crate::data::project::{initials, Position, Project};
use crate::ui::{section, styles};
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
    let is_focused = app.focus_pane == FocusPane::Positions;
    let border_style = if is_focused {
        styles::focused_border_style()
    } else {
        styles::unfocused_border_style()
    };
    let focus_marker = if is_focused { " ◄" } else { "" };

    let block = Block::default()
        .title(format!(" Project #{}{} ", project.id, focus_marker))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines = project_lines(app, project);
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(para, area);
}

pub fn project_lines<'a>(app: &'a App, project: &'a Project) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = Vec::new();

    // Status and category
    let mut badges = vec![
        styles::badge(&project.status, styles::project_status_style(&project.status)),
        Span::raw(" "),
        styles::badge(&project.category, Style::default().fg(Color::Blue)),
    ];
    if app.controller.viewer().is_owner(project) {
        badges.push(Span::styled(
            format!("  ✎ edit at /alumni/projects/{}/edit", project.id),
            styles::dim_style(),
        ));
    }
    lines.push(Line::from(badges));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        project.title.as_str(),
        styles::title_style(),
    )));
    lines.push(Line::from(""));

    // Gallery
    if let Some(carousel) = app.controller.carousel() {
        let url = project
            .images
            .get(carousel.index())
            .map(String::as_str)
            .unwrap_or("");
        lines.push(Line::from(vec![
            Span::styled("◀ ", styles::dim_style()),
            Span::styled(
                format!("Image {}/{}", carousel.index() + 1, carousel.len()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(" ▶  ", styles::dim_style()),
            Span::raw(url),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", carousel.indicator()),
            Style::default().fg(Color::Blue),
        )));
        lines.push(Line::from(""));
    }

    if !project.description.is_empty() {
        lines.push(Line::from(Span::styled(
            project.description.as_str(),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(""));
    }

    // External links & JD
    if project.has_links() {
        if let Some(ref jd) = project.jd_pdf {
            lines.push(Line::from(vec![
                Span::styled("  📄 Job Description  ", Style::default().fg(Color::Cyan)),
                Span::styled(jd.as_str(), styles::dim_style()),
            ]));
        }
        for link in &project.project_links {
            let label = if link.label.is_empty() {
                "Link"
            } else {
                link.label.as_str()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  🔗 {}  ", label), Style::default().fg(Color::Cyan)),
                Span::styled(link.url.as_str(), styles::dim_style()),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !project.skills_required.is_empty() {
        lines.push(section("Skills Required"));
        lines.push(pill_line(&project.skills_required, styles::skill_style()));
        lines.push(Line::from(""));
    }

    // Team roles win over the legacy member list
    if !project.team_roles.is_empty() {
        lines.push(section("Team"));
        for member in &project.team_roles {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  ({}) ", initials(&member.name)),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(
                    member.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", member.role), styles::dim_style()),
            ]));
            if !member.skills.is_empty() {
                let mut skills = pill_line(&member.skills, Style::default().fg(Color::Green));
                skills.spans.insert(0, Span::raw("       "));
                lines.push(skills);
            }
        }
        lines.push(Line::from(""));
    } else if !project.team_members.is_empty() {
        lines.push(section("Team Members"));
        for member in &project.team_members {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  ({}) ", initials(member)),
                    Style::default().fg(Color::Magenta),
                ),
                Span::raw(member.as_str()),
                Span::styled("  Team Member", styles::dim_style()),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !project.partners.is_empty() {
        lines.push(section("Partners"));
        for partner in &project.partners {
            lines.push(Line::from(vec![
                Span::styled("  🤝 ", Style::default().fg(Color::Blue)),
                Span::raw(partner.as_str()),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !project.highlights.is_empty() {
        lines.push(section("Highlights"));
        for highlight in &project.highlights {
            lines.push(Line::from(vec![
                Span::styled("  ★ ", Style::default().fg(Color::Yellow)),
                Span::raw(highlight.as_str()),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !project.tags.is_empty() {
        lines.push(section("Tags"));
        lines.push(pill_line(&project.tags, styles::tag_style()));
        lines.push(Line::from(""));
    }

    let open: Vec<&Position> = project.open_positions().collect();
    if !open.is_empty() {
        lines.push(section("Open Positions"));
        let is_focused = app.focus_pane == FocusPane::Positions;
        for (i, position) in open.into_iter().enumerate() {
            let selected = is_focused && i == app.position_cursor;
            position_lines(app, position, selected, &mut lines);
        }
    }

    // Closed positions only appear as history behind the switch
    lines.push(Line::from(""));
    lines.push(app.filled_switch().line());
    if app.show_filled {
        for position in project.filled_positions() {
            lines.push(Line::from(vec![
                Span::styled("  ✓ ", styles::dim_style()),
                Span::raw(position.title.as_str()),
                Span::styled(format!("  {}", position.fill_label()), styles::dim_style()),
            ]));
        }
    }

    lines
}

fn position_lines<'a>(app: &App, position: &'a Position, selected: bool, lines: &mut Vec<Line<'a>>) {
    let marker = if selected { "▸ " } else { "  " };
    let title_style = if selected {
        styles::selected_style()
    } else {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    };
    let chosen = app.controller.draft().position_id == Some(position.id);

    lines.push(Line::from(vec![
        Span::styled(format!("{}{}", marker, position.title), title_style),
        Span::raw("  "),
        styles::badge(
            if position.is_active { "Active" } else { "Filled" },
            Style::default().fg(Color::Black).bg(Color::Green),
        ),
        Span::styled(format!("  {}", position.fill_label()), styles::dim_style()),
        if chosen {
            Span::styled("  ● chosen", Style::default().fg(Color::Magenta))
        } else {
            Span::raw("")
        },
    ]));
    if !position.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("    {}", position.description),
            Style::default().fg(Color::Gray),
        )));
    }

    let mut details: Vec<Span> = Vec::new();
    if let Some(stipend) = position.stipend_label() {
        details.push(Span::styled("    Stipend ", styles::dim_style()));
        details.push(Span::styled(stipend, Style::default().fg(Color::Green)));
    }
    if let Some(ref duration) = position.duration {
        details.push(Span::styled("    Duration ", styles::dim_style()));
        details.push(Span::styled(duration.as_str(), Style::default().fg(Color::Blue)));
    }
    if let Some(ref location) = position.location {
        details.push(Span::styled("    Location ", styles::dim_style()));
        details.push(Span::styled(location.as_str(), Style::default().fg(Color::Magenta)));
    }
    if !details.is_empty() {
        lines.push(Line::from(details));
    }

    if !position.required_skills.is_empty() {
        let mut skills = pill_line(&position.required_skills, styles::skill_style());
        skills.spans.insert(0, Span::styled("    Required: ", styles::dim_style()));
        lines.push(skills);
    }

    if !position.selected_students.is_empty() {
        lines.push(Line::from(Span::styled(
            "    Selected Candidates:",
            styles::dim_style(),
        )));
        for student in &position.selected_students {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("      ({}) ", initials(&student.name)),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(student.name.as_str()),
                Span::styled(format!("  {}", student.email), styles::dim_style()),
                Span::styled(" ✓", Style::default().fg(Color::Green)),
            ]));
        }
    }

    if selected && app.controller.can_apply_for_position(position.id) {
        lines.push(Line::from(Span::styled(
            "    Enter  Apply for this position",
            Style::default().fg(Color::Cyan),
        )));
    }
    lines.push(Line::from(""));
}

fn pill_line<'a>(items: &[String], style: Style) -> Line<'a> {
    let mut spans = vec![Span::raw("  ")];
    for item in items {
        spans.push(styles::badge(item.clone(), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
