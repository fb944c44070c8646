//! Theme command - inspect or change the saved theme without the TUI

use anyhow::{Context, Result};

use super::{preference_store, GlobalArgs, ThemeAction, ThemeArgs};
use crate::theme::ThemeManager;

pub fn execute(global: &GlobalArgs, args: ThemeArgs) -> Result<()> {
    let config = global.load_config()?;
    let store = preference_store(&config);

    match args.action {
        ThemeAction::Show => {
            let manager = ThemeManager::load(store);
            println!("{}", manager.active());
        }
        ThemeAction::Set { theme } => {
            let store = store.context("No location available to save preferences")?;
            store
                .set_theme(theme.storage_key())
                .with_context(|| format!("Failed to save theme to {}", store.path().display()))?;
            println!("Theme set to {}", theme);
        }
    }
    Ok(())
}
