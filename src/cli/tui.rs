//! TUI command - launches the interactive terminal UI

use anyhow::Result;
use std::sync::Arc;

use super::{preference_store, GlobalArgs, TuiArgs};
use crate::client::HttpPlanClient;
use crate::tui::{run_tui, TuiConfig};

pub fn execute(global: &GlobalArgs, args: TuiArgs) -> Result<()> {
    let config = global.load_config()?;
    let service = HttpPlanClient::new(&config)?;

    let tui_config = TuiConfig {
        service: Arc::new(service),
        preferences: preference_store(&config),
        completion_delay: config.completion_delay(),
        tick: config.tick(),
        initial_goal: args.goal,
    };

    run_tui(tui_config)
}
