pub mod generate;
pub mod schema;
pub mod theme;
pub mod tui;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::config::Config;
use crate::preferences::PreferenceStore;
use crate::theme::Theme;

#[derive(Parser)]
#[command(name = "goalplan")]
#[command(
    author,
    version,
    about = "Turn a goal into a task plan and track it to completion"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Clone)]
pub struct GlobalArgs {
    /// Path to config file (optional; defaults apply when missing)
    #[arg(short, long, global = true, env = "GOALPLAN_CONFIG", default_value = "goalplan.yaml")]
    pub config: PathBuf,

    /// Override the plan service base URL
    #[arg(long, global = true, env = "GOALPLAN_SERVER_URL")]
    pub server_url: Option<String>,

    /// Override where the theme preference is stored
    #[arg(long, global = true, env = "GOALPLAN_PREFERENCES")]
    pub preferences: Option<PathBuf>,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive planner (default)
    Tui(TuiArgs),

    /// Generate a plan once and print it
    Generate(GenerateArgs),

    /// Show or change the saved theme
    Theme(ThemeArgs),

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Parser, Clone, Default)]
pub struct TuiArgs {
    /// Pre-fill the goal input
    #[arg(long)]
    pub goal: Option<String>,
}

#[derive(Parser, Clone)]
pub struct GenerateArgs {
    /// The goal to plan for
    #[arg(value_name = "GOAL")]
    pub goal: String,

    /// Print the plan as JSON instead of task cards
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Clone)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub action: ThemeAction,
}

#[derive(Subcommand, Clone)]
pub enum ThemeAction {
    /// Print the saved theme
    Show,

    /// Save a theme (light, dark or pink)
    Set {
        #[arg(value_name = "THEME")]
        theme: Theme,
    },
}

impl GlobalArgs {
    /// Load config and apply CLI overrides
    pub fn load_config(&self) -> anyhow::Result<Config> {
        debug!("Loading config from {:?}", self.config);
        let mut config = Config::load_or_default(&self.config)
            .with_context(|| format!("Failed to load {}", self.config.display()))?;

        if let Some(url) = &self.server_url {
            config.server_url = url.clone();
        }
        if let Some(path) = &self.preferences {
            config.preferences_path = Some(path.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

/// Resolve the preference file; persistence is disabled when no location exists
pub fn preference_store(config: &Config) -> Option<PreferenceStore> {
    if let Some(path) = &config.preferences_path {
        return Some(PreferenceStore::new(path));
    }
    match PreferenceStore::default_location() {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("Theme preference will not be saved: {}", e);
            None
        }
    }
}
