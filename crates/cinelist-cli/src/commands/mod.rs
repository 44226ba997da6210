pub mod browse;
pub mod clear;
pub mod config;
pub mod details;
pub mod home;
pub mod lists;
pub mod prompts;
pub mod search;

use cinelist_config::{Config, PathManager};
use cinelist_core::AppState;
use color_eyre::Result;

/// Validate the settings and wire up the data source and list store
pub fn build_state(settings: &Config, paths: &PathManager) -> Result<AppState> {
    settings
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;
    let state = AppState::from_config(settings, paths)?;
    Ok(state)
}
