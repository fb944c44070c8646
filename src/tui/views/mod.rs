mod plan;

pub use plan::{draw_plan_view, Pane, PlanViewState};
