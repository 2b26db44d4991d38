//! View state and fetch lifecycle for a single project detail view.
//!
//! Every network call runs as a spawned task and reports back over a channel,
//! tagged with the generation of the load that issued it. A new `load` bumps
//! the generation, so responses for a project the user already navigated
//! away from are dropped instead of overwriting newer state.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::api::ProjectApi;
use crate::data::carousel::Carousel;
use crate::data::project::{
    related_from, ApplicationRequest, ApplicationState, ApplicationStatus, Project,
};
use crate::error::{Error, Result};
use crate::session::Viewer;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded(Box<Project>),
    NotFound,
}

/// Application flow: `NotApplied -> Submitting -> Applied`, or back to
/// `NotApplied` when the submission fails. `Applied` is sticky.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyState {
    NotApplied,
    Submitting,
    Applied { status: Option<ApplicationState> },
}

/// Unsent application text and chosen position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub message: String,
    pub position_id: Option<u64>,
}

enum Outcome {
    Project(Result<Project>),
    Related(Result<Vec<Project>>),
    Status(Result<ApplicationStatus>),
    Submitted(Result<()>),
}

struct Tagged {
    generation: u64,
    project_id: u64,
    outcome: Outcome,
}

pub struct DetailController {
    api: Arc<dyn ProjectApi>,
    viewer: Viewer,
    tx: UnboundedSender<Tagged>,
    rx: UnboundedReceiver<Tagged>,
    generation: u64,
    in_flight: usize,
    project_id: Option<u64>,
    load: LoadState,
    related: Vec<Project>,
    apply: ApplyState,
    draft: Draft,
    carousel: Option<Carousel>,
    alert: Option<String>,
}

impl DetailController {
    pub fn new(api: Arc<dyn ProjectApi>, viewer: Viewer) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        DetailController {
            api,
            viewer,
            tx,
            rx,
            generation: 0,
            in_flight: 0,
            project_id: None,
            load: LoadState::Idle,
            related: Vec::new(),
            apply: ApplyState::NotApplied,
            draft: Draft::default(),
            carousel: None,
            alert: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn project_id(&self) -> Option<u64> {
        self.project_id
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn project(&self) -> Option<&Project> {
        match &self.load {
            LoadState::Loaded(p) => Some(p),
            _ => None,
        }
    }

    pub fn related(&self) -> &[Project] {
        &self.related
    }

    pub fn apply_state(&self) -> &ApplyState {
        &self.apply
    }

    pub fn has_applied(&self) -> bool {
        matches!(self.apply, ApplyState::Applied { .. })
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn carousel_mut(&mut self) -> Option<&mut Carousel> {
        self.carousel.as_mut()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Whether the apply dialog should be offered right now.
    pub fn can_apply(&self) -> bool {
        self.viewer.is_student()
            && self.apply == ApplyState::NotApplied
            && self.project().is_some_and(Project::is_active)
    }

    /// Whether a specific position can be picked for an application.
    pub fn can_apply_for_position(&self, position_id: u64) -> bool {
        self.can_apply()
            && self
                .project()
                .is_some_and(|p| p.open_positions().any(|pos| pos.id == position_id))
    }

    // ── Loading ───────────────────────────────────────────────────────

    /// Start viewing `id`. Any response still pending for an earlier load is
    /// discarded when it arrives.
    pub fn load(&mut self, id: u64) {
        self.generation += 1;
        self.project_id = Some(id);
        self.load = LoadState::Loading;
        self.related.clear();
        self.apply = ApplyState::NotApplied;
        self.draft = Draft::default();
        self.carousel = None;
        self.alert = None;
        info!(project_id = id, generation = self.generation, "loading project");

        let api = Arc::clone(&self.api);
        self.spawn(id, async move { Outcome::Project(api.get_project(id).await) });

        if let Some(creds) = self.viewer.credentials_for_apply().cloned() {
            let api = Arc::clone(&self.api);
            self.spawn(id, async move {
                Outcome::Status(api.application_status(id, &creds).await)
            });
        }
    }

    /// Fetch the current project again. Ignored while an application is in
    /// flight so its result is not dropped.
    pub fn reload(&mut self) {
        if self.apply == ApplyState::Submitting {
            return;
        }
        if let Some(id) = self.project_id {
            self.load(id);
        }
    }

    // ── Draft & apply ─────────────────────────────────────────────────

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.draft.message = message.into();
    }

    /// Pick an open position to apply for. Returns false if it isn't open.
    pub fn select_position(&mut self, position_id: u64) -> bool {
        if !self.can_apply_for_position(position_id) {
            return false;
        }
        self.draft.position_id = Some(position_id);
        true
    }

    pub fn clear_position(&mut self) {
        self.draft.position_id = None;
    }

    /// Send the drafted application. Returns whether a request was issued.
    ///
    /// Requires a student viewer, a loaded project, no earlier application
    /// and a non-blank message. There is no retry: a failure hands control
    /// back to the user.
    pub fn submit_application(&mut self) -> bool {
        let Some(creds) = self.viewer.credentials_for_apply().cloned() else {
            return false;
        };
        let Some(project_id) = self.project().map(|p| p.id) else {
            return false;
        };
        if self.apply != ApplyState::NotApplied || self.draft.message.trim().is_empty() {
            return false;
        }

        let request = ApplicationRequest {
            project_id,
            position_id: self.draft.position_id,
            message: self.draft.message.clone(),
        };
        self.apply = ApplyState::Submitting;
        let api = Arc::clone(&self.api);
        self.spawn(project_id, async move {
            Outcome::Submitted(api.submit_application(&request, &creds).await)
        });
        true
    }

    // ── Outcome handling ──────────────────────────────────────────────

    /// Apply every outcome that has already arrived. Returns true if any did.
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Ok(tagged) = self.rx.try_recv() {
            self.handle(tagged);
            changed = true;
        }
        changed
    }

    /// Wait until nothing is in flight, applying outcomes as they arrive.
    #[cfg(test)]
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv().await {
                Some(tagged) => self.handle(tagged),
                None => break,
            }
        }
    }

    fn spawn<F>(&mut self, project_id: u64, fut: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        let tx = self.tx.clone();
        let generation = self.generation;
        self.in_flight += 1;
        tokio::spawn(async move {
            let outcome = fut.await;
            // The receiver lives as long as the controller.
            let _ = tx.send(Tagged {
                generation,
                project_id,
                outcome,
            });
        });
    }

    fn handle(&mut self, tagged: Tagged) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if tagged.generation != self.generation {
            debug!(
                project_id = tagged.project_id,
                generation = tagged.generation,
                current = self.generation,
                "discarding stale response"
            );
            return;
        }

        match tagged.outcome {
            Outcome::Project(Ok(project)) => {
                self.carousel = Carousel::new(project.images.len());
                let category = project.category.clone();
                let current_id = project.id;
                self.load = LoadState::Loaded(Box::new(project));

                let api = Arc::clone(&self.api);
                self.spawn(tagged.project_id, async move {
                    Outcome::Related(
                        api.projects_by_category(&category)
                            .await
                            .map(|all| related_from(all, current_id)),
                    )
                });
            }
            Outcome::Project(Err(e)) => {
                if e.is_not_found() {
                    info!(project_id = tagged.project_id, "project not found");
                } else {
                    warn!(project_id = tagged.project_id, error = %e, "failed to fetch project");
                }
                self.load = LoadState::NotFound;
                self.carousel = None;
            }
            Outcome::Related(Ok(related)) => {
                self.related = related;
            }
            Outcome::Related(Err(e)) => {
                debug!(project_id = tagged.project_id, error = %e, "related projects unavailable");
            }
            Outcome::Status(Ok(status)) => {
                if status.has_applied {
                    self.apply = ApplyState::Applied {
                        status: status.status.as_deref().map(ApplicationState::parse),
                    };
                }
            }
            Outcome::Status(Err(e)) => {
                warn!(project_id = tagged.project_id, error = %e, "failed to check application status");
            }
            Outcome::Submitted(Ok(())) => {
                info!(project_id = tagged.project_id, "application submitted");
                if self.apply == ApplyState::Submitting {
                    self.apply = ApplyState::Applied {
                        status: Some(ApplicationState::Pending),
                    };
                }
                self.draft = Draft::default();
            }
            Outcome::Submitted(Err(Error::Rejected(message))) => {
                error!(project_id = tagged.project_id, %message, "application rejected");
                self.fail_submission();
                self.alert = Some(message);
            }
            Outcome::Submitted(Err(e)) => {
                error!(project_id = tagged.project_id, error = %e, "failed to submit application");
                self.fail_submission();
            }
        }
    }

    // A status reply may have marked the project applied while the POST was
    // in flight. `Applied` stays.
    fn fail_submission(&mut self) {
        if self.apply == ApplyState::Submitting {
            self.apply = ApplyState::NotApplied;
        }
    }
}
