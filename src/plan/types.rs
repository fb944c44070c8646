//! Wire and display types for generated plans

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title shown when the service omits `project_name`
pub const DEFAULT_PROJECT_NAME: &str = "Generated Plan";

/// Request body sent to the plan endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GoalRequest {
    pub goal: String,
}

/// Task identifier as sent by the service: a number or a string.
///
/// Display-only; the controller never relies on uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Int(n) => write!(f, "{}", n),
            TaskId::Float(n) => write!(f, "{}", format_number(*n)),
            TaskId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A single task in a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task_id")]
    pub id: TaskId,

    #[serde(rename = "task_name", default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub timeline_days: f64,

    #[serde(default)]
    pub dependencies: Vec<TaskId>,
}

impl Task {
    /// Card header: "{id}. {name}"
    pub fn header(&self) -> String {
        format!("{}. {}", self.id, self.name)
    }

    /// Dependencies joined by ", ", or "None"
    pub fn dependencies_label(&self) -> String {
        if self.dependencies.is_empty() {
            "None".to_string()
        } else {
            self.dependencies
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    pub fn timeline_label(&self) -> String {
        format!("{} days", format_number(self.timeline_days))
    }

    /// Card metadata line
    pub fn meta_line(&self) -> String {
        format!(
            "Timeline: {} | Dependencies: {}",
            self.timeline_label(),
            self.dependencies_label()
        )
    }
}

/// A plan accepted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub project_name: String,
    pub tasks: Vec<Task>,
}

/// Body returned by the plan endpoint.
///
/// The service reports application-level failures with an `error` field on
/// an otherwise successful response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl PlanResponse {
    /// Split into the displayable plan or the server-reported error message
    pub fn into_plan(self) -> Result<Plan, String> {
        if let Some(error) = self.error.filter(|e| !e.is_empty()) {
            return Err(error);
        }

        let project_name = self
            .project_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

        Ok(Plan {
            project_name,
            tasks: self.tasks,
        })
    }
}

/// Integral values print without a fractional part ("3", not "3.0")
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{
        "project_name": "Website Launch",
        "tasks": [
            {"task_id": 1, "task_name": "Design", "description": "Create mockups",
             "timeline_days": 3, "dependencies": []},
            {"task_id": 2, "task_name": "Build", "description": "Implement site",
             "timeline_days": 5, "dependencies": [1]}
        ]
    }"#;

    #[test]
    fn test_parse_example_plan() {
        let response: PlanResponse = serde_json::from_str(EXAMPLE).unwrap();
        let plan = response.into_plan().unwrap();

        assert_eq!(plan.project_name, "Website Launch");
        assert_eq!(plan.tasks.len(), 2);
        assert_eq!(plan.tasks[0].header(), "1. Design");
        assert_eq!(plan.tasks[0].dependencies_label(), "None");
        assert_eq!(plan.tasks[1].header(), "2. Build");
        assert_eq!(plan.tasks[1].dependencies_label(), "1");
        assert_eq!(
            plan.tasks[1].meta_line(),
            "Timeline: 5 days | Dependencies: 1"
        );
    }

    #[test]
    fn test_string_ids_and_dependencies() {
        let json = r#"{"tasks": [
            {"task_id": "T-3", "task_name": "Ship", "description": "",
             "timeline_days": 1.5, "dependencies": ["T-1", "T-2"]}
        ]}"#;
        let plan = serde_json::from_str::<PlanResponse>(json)
            .unwrap()
            .into_plan()
            .unwrap();

        assert_eq!(plan.project_name, DEFAULT_PROJECT_NAME);
        assert_eq!(plan.tasks[0].header(), "T-3. Ship");
        assert_eq!(plan.tasks[0].dependencies_label(), "T-1, T-2");
        assert_eq!(plan.tasks[0].timeline_label(), "1.5 days");
    }

    #[test]
    fn test_error_field_wins() {
        let json = r#"{"error": "model unavailable", "tasks": []}"#;
        let response: PlanResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_plan().unwrap_err(), "model unavailable");
    }

    #[test]
    fn test_empty_error_is_ignored() {
        let json = r#"{"error": "", "project_name": "", "tasks": []}"#;
        let plan = serde_json::from_str::<PlanResponse>(json)
            .unwrap()
            .into_plan()
            .unwrap();
        assert_eq!(plan.project_name, DEFAULT_PROJECT_NAME);
        assert!(plan.tasks.is_empty());
    }

    #[test]
    fn test_goal_request_body() {
        let body = serde_json::to_value(GoalRequest {
            goal: "Launch website".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"goal": "Launch website"}));
    }
}
