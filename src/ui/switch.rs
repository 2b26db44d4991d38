use crate::ui::styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Binary on/off control. Holds no state of its own: the caller owns
/// `checked` and applies whatever [`Switch::toggled`] hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch<'a> {
    pub label: &'a str,
    pub checked: bool,
    pub disabled: bool,
    pub focused: bool,
}

impl<'a> Switch<'a> {
    pub fn new(label: &'a str, checked: bool) -> Self {
        Switch {
            label,
            checked,
            disabled: false,
            focused: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// The value a change callback would receive, or `None` when disabled.
    pub fn toggled(&self) -> Option<bool> {
        (!self.disabled).then_some(!self.checked)
    }

    /// Announced state, so the value is readable without colour.
    pub fn state_label(&self) -> &'static str {
        if self.checked {
            "on"
        } else {
            "off"
        }
    }

    pub fn line(&self) -> Line<'a> {
        let track = if self.checked { "[ ●]" } else { "[● ]" };
        let mut track_style = if self.checked {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut label_style = Style::default().fg(Color::White);
        if self.disabled {
            track_style = styles::dim_style();
            label_style = styles::dim_style();
        }
        if self.focused && !self.disabled {
            track_style = track_style.add_modifier(Modifier::REVERSED);
        }

        Line::from(vec![
            Span::styled(track, track_style),
            Span::raw(" "),
            Span::styled(self.label, label_style),
            Span::styled(format!(" ({})", self.state_label()), styles::dim_style()),
        ])
    }
}

impl Widget for Switch<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.line().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_value() {
        assert_eq!(Switch::new("x", false).toggled(), Some(true));
        assert_eq!(Switch::new("x", true).toggled(), Some(false));
    }

    #[test]
    fn test_disabled_suppresses_change() {
        assert_eq!(Switch::new("x", false).disabled(true).toggled(), None);
    }

    #[test]
    fn test_renders_state_text() {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        Switch::new("Filled", true).render(area, &mut buf);
        let text: String = (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect();
        assert!(text.starts_with("[ ●] Filled (on)"));
    }
}
