//! Plan model and the controller that drives one plan view

mod controller;
mod progress;
mod types;

pub use controller::{PlanController, RequestToken, ResultsView, TaskCard};
pub use progress::Progress;
pub use types::{GoalRequest, Plan, PlanResponse};
