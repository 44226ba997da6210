use super::prompts;
use crate::output::Output;
use cinelist_config::{Config, PathManager};
use cinelist_core::{JsonFileStore, Lists, Storage};
use color_eyre::Result;
use std::fs;
use std::path::Path;
use std::sync::Arc;

pub async fn run_clear(settings: &Config, paths: &PathManager, logs: bool, yes: bool, output: &Output) -> Result<()> {
    let what = if logs { "all favorites, watchlists and log files" } else { "all favorites and watchlists" };
    if !prompts::confirm_destructive(&format!("Delete {}?", what), yes, output)? {
        output.info("Nothing cleared");
        return Ok(());
    }

    clear_lists(settings, paths, output).await?;
    if logs {
        clear_logs(settings, paths, output)?;
    }
    Ok(())
}

async fn clear_lists(settings: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let storage_dir = settings.storage_dir(paths.storage_dir());
    if !storage_dir.exists() {
        output.info("No stored lists found to clear");
        return Ok(());
    }

    let store = JsonFileStore::new(&storage_dir)?;
    let storage = Storage::new(Arc::new(store));
    Lists::new(storage.clone()).clear_all().await?;

    // Corrupt-document backups are left over from earlier recoveries
    for key in storage.keys().await? {
        if key.ends_with(".bak") {
            storage.remove(&key).await?;
        }
    }

    output.success(format!("Cleared stored lists: {}", storage_dir.display()));
    Ok(())
}

fn clear_logs(settings: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let configured = settings.logging.file.as_deref();
    let log_dir = configured.and_then(Path::parent).unwrap_or_else(|| paths.log_dir());
    // Rotated files share the configured file's stem (`cinelist.2024-05-01`)
    let prefix = configured
        .and_then(Path::file_stem)
        .and_then(|s| s.to_str())
        .unwrap_or("cinelist");

    if !log_dir.exists() {
        output.info("No log files found to clear");
        return Ok(());
    }

    let mut removed = 0;
    for entry in fs::read_dir(log_dir)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read {}: {}", log_dir.display(), e))?
    {
        let path = entry?.path();
        let is_log = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(prefix));
        if path.is_file() && is_log {
            fs::remove_file(&path)
                .map_err(|e| color_eyre::eyre::eyre!("Failed to remove {}: {}", path.display(), e))?;
            removed += 1;
        }
    }

    output.success(format!("Removed {} log file(s) from {}", removed, log_dir.display()));
    Ok(())
}
