use std::path::PathBuf;
use thiserror::Error;

/// Failures of a plan request, either in transport or reported by the server.
#[derive(Error, Debug)]
pub enum GoalplanError {
    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("Error from server: {0}")]
    Server(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid server URL '{url}': {reason}")]
    InvalidServerUrl { url: String, reason: String },

    #[error("Endpoint '{0}' must start with '/'")]
    InvalidEndpoint(String),
}

/// Failures talking to the plan-generation service.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network response was not ok (HTTP {status})")]
    Status { status: u16 },

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to decode plan response: {0}")]
    Decode(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("No config directory available for preferences")]
    NoConfigDir,

    #[error("Failed to write preferences to '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Goal submission rejected before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please enter a goal.")]
    EmptyGoal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_request_errors_keep_user_facing_text() {
        let err: GoalplanError = ClientError::Status { status: 500 }.into();
        assert_eq!(err.to_string(), "Network response was not ok (HTTP 500)");

        let err = GoalplanError::Server("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Error from server: quota exceeded");
    }
}
