//! Plan view lifecycle: submission, rendering, progress and completion
//!
//! The controller holds no I/O. Callers send the request described by
//! [`PendingRequest`] and hand the outcome back through
//! [`PlanController::resolve`]; time is passed in explicitly so the delayed
//! completion signal can be driven from any event loop (or a test).

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::progress::Progress;
use super::types::{PlanResponse, Task};
use crate::error::{ClientError, SubmitError};

/// Identifies one goal submission. Only the newest token may update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// A validated goal waiting to be sent to the plan service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub token: RequestToken,
    pub goal: String,
}

/// One rendered task with its completion toggle
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub task: Task,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanView {
    pub title: String,
    pub cards: Vec<TaskCard>,
}

/// What the results area currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultsView {
    #[default]
    Empty,
    Loading,
    Error(String),
    Plan(PlanView),
}

pub struct PlanController {
    goal_input: String,
    view: ResultsView,
    progress: Progress,
    progress_visible: bool,
    overlay_visible: bool,
    /// Set once the overlay has been shown for the current plan
    completion_signaled: bool,
    completion_due: Option<Instant>,
    completion_delay: Duration,
    latest_token: u64,
}

impl PlanController {
    pub fn new(completion_delay: Duration) -> Self {
        Self {
            goal_input: String::new(),
            view: ResultsView::Empty,
            progress: Progress::default(),
            progress_visible: false,
            overlay_visible: false,
            completion_signaled: false,
            completion_due: None,
            completion_delay,
            latest_token: 0,
        }
    }

    pub fn goal_input(&self) -> &str {
        &self.goal_input
    }

    pub fn set_goal_input(&mut self, goal: impl Into<String>) {
        self.goal_input = goal.into();
    }

    pub fn push_goal_char(&mut self, c: char) {
        self.goal_input.push(c);
    }

    pub fn pop_goal_char(&mut self) {
        self.goal_input.pop();
    }

    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn progress_visible(&self) -> bool {
        self.progress_visible
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, ResultsView::Loading)
    }

    pub fn cards(&self) -> &[TaskCard] {
        match &self.view {
            ResultsView::Plan(plan) => &plan.cards,
            _ => &[],
        }
    }

    /// Validate the goal input and enter the loading state.
    ///
    /// An empty or whitespace-only goal is rejected without touching any
    /// state. Otherwise prior results are discarded and a request with a
    /// fresh token is returned; any response still in flight is superseded.
    pub fn submit_goal(&mut self) -> Result<PendingRequest, SubmitError> {
        let goal = self.goal_input.trim();
        if goal.is_empty() {
            return Err(SubmitError::EmptyGoal);
        }
        let goal = goal.to_string();

        self.latest_token += 1;
        self.discard_plan();
        self.view = ResultsView::Loading;

        let token = RequestToken(self.latest_token);
        debug!(token = token.0, goal = %goal, "submitting goal");
        Ok(PendingRequest { token, goal })
    }

    /// Apply the outcome of a request. Returns false when the response was
    /// superseded and dropped.
    pub fn resolve(
        &mut self,
        token: RequestToken,
        outcome: Result<PlanResponse, ClientError>,
    ) -> bool {
        if token.0 != self.latest_token || !self.is_loading() {
            debug!(token = token.0, latest = self.latest_token, "dropping superseded response");
            return false;
        }

        match outcome {
            Ok(response) => self.render_plan(response),
            Err(e) => {
                warn!("Plan request failed: {}", e);
                self.view = ResultsView::Error(format!("An error occurred: {}", e));
            }
        }
        true
    }

    /// Replace the results area with a plan response
    pub fn render_plan(&mut self, response: PlanResponse) {
        self.discard_plan();

        let plan = match response.into_plan() {
            Ok(plan) => plan,
            Err(message) => {
                warn!("Server reported an error: {}", message);
                self.view = ResultsView::Error(format!("Error from server: {}", message));
                return;
            }
        };

        let total = plan.tasks.len();
        self.progress.reset(total);
        self.progress_visible = total > 0;
        self.view = ResultsView::Plan(PlanView {
            title: plan.project_name,
            cards: plan
                .tasks
                .into_iter()
                .map(|task| TaskCard {
                    task,
                    checked: false,
                })
                .collect(),
        });
        info!(tasks = total, "plan rendered");
    }

    /// Flip the checkbox of the card at `index`. Returns the new state.
    pub fn toggle_task(&mut self, index: usize, now: Instant) -> Option<bool> {
        let checked = !self.cards().get(index)?.checked;
        self.set_task_checked(index, checked, now);
        Some(checked)
    }

    /// Record a checkbox change. Setting a card to the state it already has
    /// is not a change and leaves the counters alone.
    pub fn set_task_checked(&mut self, index: usize, checked: bool, now: Instant) {
        let ResultsView::Plan(plan) = &mut self.view else {
            return;
        };
        let Some(card) = plan.cards.get_mut(index) else {
            return;
        };
        if card.checked == checked {
            return;
        }
        card.checked = checked;

        if checked {
            self.progress.increment();
        } else {
            self.progress.decrement();
        }
        self.update_progress(now);
    }

    fn update_progress(&mut self, now: Instant) {
        debug!(
            completed = self.progress.completed(),
            total = self.progress.total(),
            "{}",
            self.progress.label()
        );

        if self.progress.is_complete() {
            if !self.completion_signaled && self.completion_due.is_none() {
                self.completion_due = Some(now + self.completion_delay);
            }
        } else {
            self.completion_due = None;
        }
    }

    /// Fire the delayed completion signal once its deadline has passed.
    /// Returns true when the overlay was shown by this call.
    pub fn poll_completion(&mut self, now: Instant) -> bool {
        match self.completion_due {
            Some(due) if now >= due => {
                self.completion_due = None;
                self.completion_signaled = true;
                self.overlay_visible = true;
                info!(tasks = self.progress.total(), "plan completed");
                true
            }
            _ => false,
        }
    }

    /// The "add another task" action: back to an empty page
    pub fn reset_for_new_task(&mut self) {
        self.latest_token += 1;
        self.discard_plan();
        self.view = ResultsView::Empty;
        self.goal_input.clear();
        debug!("reset for new task");
    }

    fn discard_plan(&mut self) {
        self.view = ResultsView::Empty;
        self.progress.reset(0);
        self.progress_visible = false;
        self.overlay_visible = false;
        self.completion_signaled = false;
        self.completion_due = None;
    }
}
