use crate::controller::{ApplyState, DetailController};
use crate::data::project::{Position, Project};
use crate::ui::switch::Switch;
use tui_input::Input;

pub const FILLED_SWITCH_LABEL: &str = "Show filled positions";

/// Which list j/k and Enter act on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusPane {
    Positions,
    Related,
}

/// State for the "Apply" dialog.
pub struct ApplyPopup {
    pub input: Input,
}

/// A person's card, built from data the view already has.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCard {
    pub name: String,
    pub email: String,
    pub role_label: String,
}

pub struct App {
    pub controller: DetailController,

    /// Projects visited before the current one, most recent last.
    pub history: Vec<u64>,

    pub focus_pane: FocusPane,
    pub position_cursor: usize,
    pub related_cursor: usize,
    pub show_filled: bool,
    pub detail_scroll: u16,

    // UI state
    pub should_quit: bool,
    pub show_help: bool,
    pub spinner_frame: usize,

    pub apply_popup: Option<ApplyPopup>,
    pub profile_popup: Option<ProfileCard>,
}

impl App {
    pub fn new(mut controller: DetailController, project_id: u64) -> Self {
        controller.load(project_id);
        App {
            controller,
            history: Vec::new(),
            focus_pane: FocusPane::Positions,
            position_cursor: 0,
            related_cursor: 0,
            show_filled: false,
            detail_scroll: 0,
            should_quit: false,
            show_help: false,
            spinner_frame: 0,
            apply_popup: None,
            profile_popup: None,
        }
    }

    /// Per-frame housekeeping: apply finished requests and keep cursors valid.
    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        self.controller.drain();
        if self.controller.has_applied() {
            self.apply_popup = None;
        }
        self.clamp_cursors();
    }

    pub fn project(&self) -> Option<&Project> {
        self.controller.project()
    }

    pub fn open_positions(&self) -> Vec<&Position> {
        self.project()
            .map(|p| p.open_positions().collect())
            .unwrap_or_default()
    }

    pub fn current_position(&self) -> Option<&Position> {
        self.open_positions().get(self.position_cursor).copied()
    }

    pub fn current_related(&self) -> Option<&Project> {
        self.controller.related().get(self.related_cursor)
    }

    fn clamp_cursors(&mut self) {
        // The filled-positions switch sits after the last open position
        let last = self.open_positions().len();
        if self.position_cursor > last {
            self.position_cursor = last;
        }
        let related = self.controller.related().len();
        if self.related_cursor >= related {
            self.related_cursor = related.saturating_sub(1);
        }
    }

    fn reset_view(&mut self) {
        self.position_cursor = 0;
        self.related_cursor = 0;
        self.detail_scroll = 0;
        self.focus_pane = FocusPane::Positions;
        self.apply_popup = None;
        self.profile_popup = None;
    }

    // ── Navigation ────────────────────────────────────────────────────

    /// Open another project, remembering the current one for Back.
    pub fn navigate_to(&mut self, id: u64) {
        if let Some(current) = self.controller.project_id() {
            if current == id {
                return;
            }
            self.history.push(current);
        }
        self.reset_view();
        self.controller.load(id);
    }

    /// Back to the previous project, or leave when there is none.
    pub fn go_back(&mut self) {
        match self.history.pop() {
            Some(id) => {
                self.reset_view();
                self.controller.load(id);
            }
            None => self.should_quit = true,
        }
    }

    pub fn reload(&mut self) {
        self.controller.reload();
        self.clamp_cursors();
    }

    pub fn toggle_focus(&mut self) {
        self.focus_pane = match self.focus_pane {
            FocusPane::Positions => FocusPane::Related,
            FocusPane::Related => FocusPane::Positions,
        };
    }

    pub fn next_item(&mut self) {
        match self.focus_pane {
            FocusPane::Positions => {
                let len = self.open_positions().len() + 1;
                self.position_cursor = (self.position_cursor + 1) % len;
            }
            FocusPane::Related => {
                let len = self.controller.related().len();
                if len > 0 {
                    self.related_cursor = (self.related_cursor + 1) % len;
                }
            }
        }
    }

    pub fn prev_item(&mut self) {
        match self.focus_pane {
            FocusPane::Positions => {
                let len = self.open_positions().len() + 1;
                self.position_cursor = (self.position_cursor + len - 1) % len;
            }
            FocusPane::Related => {
                let len = self.controller.related().len();
                if len > 0 {
                    self.related_cursor = (self.related_cursor + len - 1) % len;
                }
            }
        }
    }

    /// Enter: apply for the focused position, flip the filled switch, or open
    /// the focused related project.
    pub fn activate(&mut self) {
        match self.focus_pane {
            FocusPane::Positions => {
                if self.switch_focused() {
                    self.toggle_show_filled();
                    return;
                }
                let Some(id) = self.current_position().map(|p| p.id) else {
                    return;
                };
                if self.controller.select_position(id) {
                    self.open_apply_popup();
                }
            }
            FocusPane::Related => {
                if let Some(id) = self.current_related().map(|p| p.id) {
                    self.navigate_to(id);
                }
            }
        }
    }

    pub fn scroll_detail_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(3);
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(3);
    }

    // ── Gallery ───────────────────────────────────────────────────────

    pub fn carousel_prev(&mut self) {
        if let Some(c) = self.controller.carousel_mut() {
            c.prev();
        }
    }

    pub fn carousel_next(&mut self) {
        if let Some(c) = self.controller.carousel_mut() {
            c.next();
        }
    }

    pub fn carousel_select(&mut self, index: usize) {
        if let Some(c) = self.controller.carousel_mut() {
            c.select(index);
        }
    }

    // ── Filled positions switch ───────────────────────────────────────

    pub fn filled_switch(&self) -> Switch<'static> {
        let has_filled = self
            .project()
            .is_some_and(|p| p.filled_positions().next().is_some());
        Switch::new(FILLED_SWITCH_LABEL, self.show_filled)
            .disabled(!has_filled)
            .focused(self.switch_focused())
    }

    pub fn switch_focused(&self) -> bool {
        self.focus_pane == FocusPane::Positions
            && self.position_cursor == self.open_positions().len()
    }

    pub fn toggle_show_filled(&mut self) {
        if let Some(checked) = self.filled_switch().toggled() {
            self.show_filled = checked;
        }
    }

    // ── Apply popup ───────────────────────────────────────────────────

    pub fn open_apply_popup(&mut self) {
        if !self.controller.can_apply() {
            self.controller.clear_position();
            return;
        }
        let input = Input::new(self.controller.draft().message.clone());
        self.apply_popup = Some(ApplyPopup { input });
    }

    pub fn is_submitting(&self) -> bool {
        *self.controller.apply_state() == ApplyState::Submitting
    }

    /// Handle a key event for the apply popup. Returns true if the key was consumed.
    pub fn apply_popup_handle_key(&mut self, key: crossterm::event::KeyEvent) -> bool {
        use crossterm::event::KeyCode;

        let submitting = self.is_submitting();
        let popup = match &mut self.apply_popup {
            Some(p) => p,
            None => return false,
        };

        match key.code {
            KeyCode::Esc => {
                self.apply_popup = None;
            }
            _ if submitting => {}
            KeyCode::Enter => {
                let message = popup.input.value().to_string();
                self.controller.set_message(message);
                self.controller.submit_application();
            }
            KeyCode::Tab => {
                self.controller.clear_position();
            }
            _ => {
                use tui_input::backend::crossterm::EventHandler;
                popup
                    .input
                    .handle_event(&crossterm::event::Event::Key(key));
                let message = popup.input.value().to_string();
                self.controller.set_message(message);
            }
        }
        true
    }

    // ── Profile popup ─────────────────────────────────────────────────

    pub fn open_creator_profile(&mut self) {
        if let Some(p) = self.project() {
            self.profile_popup = Some(ProfileCard {
                name: p.created_by_name.clone(),
                email: p.created_by_email.clone(),
                role_label: "Project Lead".to_string(),
            });
        }
    }

    /// Card for the first selected candidate of the focused position.
    pub fn open_candidate_profile(&mut self) {
        let card = self
            .current_position()
            .and_then(|pos| {
                pos.selected_students.first().map(|s| (pos.title.clone(), s))
            })
            .map(|(title, s)| ProfileCard {
                name: s.name.clone(),
                email: s.email.clone(),
                role_label: format!("Selected for {}", title),
            });
        if card.is_some() {
            self.profile_popup = card;
        }
    }

    pub fn close_profile_popup(&mut self) {
        self.profile_popup = None;
    }
}
