use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Base URL of the plan-generation service
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Path of the plan endpoint, joined onto `server_url`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout. Requests wait indefinitely when unset.
    #[serde(default)]
    pub request_timeout_sec: Option<u64>,

    /// Delay between the progress bar reaching 100% and the completion overlay
    #[serde(default = "default_completion_delay_ms")]
    pub completion_delay_ms: u64,

    /// Event loop poll interval for the TUI
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Where the theme preference is stored (defaults to the user config dir)
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
}
