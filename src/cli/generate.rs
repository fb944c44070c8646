//! Generate command - one-shot plan request printed to stdout

use anyhow::Result;
use tracing::info;

use super::{GenerateArgs, GlobalArgs};
use crate::client::{HttpPlanClient, PlanService};
use crate::error::{GoalplanError, SubmitError};
use crate::plan::{Plan, Progress};

pub async fn execute(global: &GlobalArgs, args: GenerateArgs) -> Result<()> {
    // Reject blank goals before touching config or the network
    let goal = validate_goal(&args.goal)?;

    let config = global.load_config()?;
    let client = HttpPlanClient::new(&config)?;

    info!("Requesting plan from {}", config.plan_url());
    let plan = fetch_plan(&client, &goal).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_plan_text(&plan));
    }
    Ok(())
}

fn validate_goal(raw: &str) -> Result<String, SubmitError> {
    let goal = raw.trim();
    if goal.is_empty() {
        return Err(SubmitError::EmptyGoal);
    }
    Ok(goal.to_string())
}

async fn fetch_plan(service: &dyn PlanService, goal: &str) -> Result<Plan, GoalplanError> {
    let response = service.create_plan(goal).await?;
    response.into_plan().map_err(GoalplanError::Server)
}

/// Render a plan as plain-text task cards
pub fn render_plan_text(plan: &Plan) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", plan.project_name));
    out.push_str(&format!(
        "{}\n",
        "=".repeat(plan.project_name.chars().count())
    ));

    for task in &plan.tasks {
        out.push('\n');
        out.push_str(&format!("[ ] {}\n", task.header()));
        if !task.description.is_empty() {
            out.push_str(&format!("    {}\n", task.description));
        }
        out.push_str(&format!("    {}\n", task.meta_line()));
    }

    if !plan.tasks.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", Progress::new(plan.tasks.len()).label()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::plan::PlanResponse;
    use async_trait::async_trait;

    struct Canned(PlanResponse);

    #[async_trait]
    impl PlanService for Canned {
        async fn create_plan(&self, _goal: &str) -> Result<PlanResponse, ClientError> {
            Ok(self.0.clone())
        }
    }

    fn example() -> PlanResponse {
        serde_json::from_str(
            r#"{"project_name":"Website Launch","tasks":[
                {"task_id":1,"task_name":"Design","description":"Create mockups","timeline_days":3,"dependencies":[]},
                {"task_id":2,"task_name":"Build","description":"Implement site","timeline_days":5,"dependencies":[1]}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_goal() {
        assert_eq!(validate_goal("  Launch website "), Ok("Launch website".to_string()));
        assert_eq!(validate_goal(" \n "), Err(SubmitError::EmptyGoal));
    }

    #[test]
    fn test_render_plan_text() {
        let plan = example().into_plan().unwrap();
        let text = render_plan_text(&plan);

        assert!(text.starts_with("Website Launch\n==============\n"));
        assert!(text.contains("[ ] 1. Design\n    Create mockups\n    Timeline: 3 days | Dependencies: None\n"));
        assert!(text.contains("[ ] 2. Build\n    Implement site\n    Timeline: 5 days | Dependencies: 1\n"));
        assert!(text.ends_with("0% completed\n"));
    }

    #[test]
    fn test_render_omits_blank_description() {
        let plan: Plan = serde_json::from_str::<PlanResponse>(
            r#"{"project_name":"Trip","tasks":[{"task_id":"a","task_name":"Book","timeline_days":1.5}]}"#,
        )
        .unwrap()
        .into_plan()
        .unwrap();
        assert_eq!(
            render_plan_text(&plan),
            "Trip\n====\n\n[ ] a. Book\n    Timeline: 1.5 days | Dependencies: None\n\n0% completed\n"
        );
    }

    #[test]
    fn test_render_empty_plan_has_no_progress() {
        let plan = PlanResponse::default().into_plan().unwrap();
        assert_eq!(render_plan_text(&plan), "Generated Plan\n==============\n");
    }

    #[tokio::test]
    async fn test_fetch_plan_surfaces_server_error() {
        let service = Canned(PlanResponse {
            error: Some("quota exceeded".to_string()),
            ..Default::default()
        });
        let err = fetch_plan(&service, "goal").await.unwrap_err();
        assert_eq!(err.to_string(), "Error from server: quota exceeded");

        let plan = fetch_plan(&Canned(example()), "goal").await.unwrap();
        assert_eq!(plan.tasks.len(), 2);
    }
}
