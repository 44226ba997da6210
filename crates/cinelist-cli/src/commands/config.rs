use super::prompts;
use crate::output::Output;
use crate::ConfigCommands;
use cinelist_config::{Config, DataSourceMode, PathManager, API_KEY_ENV};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(paths, full, output),
        ConfigCommands::Init { force } => init_config(paths, force, output),
        ConfigCommands::SetApiKey { key } => set_api_key(paths, key, output),
        ConfigCommands::Path => {
            let path = paths.config_file();
            output.human(path.display().to_string());
            output.data(&json!({ "config_file": path.display().to_string(), "exists": path.exists() }));
            Ok(())
        }
    }
}

fn load(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

fn source_label(mode: DataSourceMode) -> &'static str {
    match mode {
        DataSourceMode::Auto => "auto",
        DataSourceMode::Live => "live",
        DataSourceMode::Fixture => "fixture",
    }
}

fn show_config(paths: &PathManager, full: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let mut config = load(paths)?;
    config.apply_env();

    let key_display = match config.api_key() {
        Some(key) if full => key.to_string(),
        Some(key) => mask_string(key),
        None => "<not set>".to_string(),
    };
    let storage_dir = config.storage_dir(paths.storage_dir());
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());

    if output.is_human() && !output.is_quiet() {
        if !config_file.exists() {
            output.warn(format!("No configuration file at {}, showing defaults", config_file.display()));
        }

        println!("\n{}", "Configuration".bright_cyan().bold());
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        let rows = [
            ("Config file", config_file.display().to_string()),
            ("API key", key_display.clone()),
            ("Base URL", config.tmdb.base_url.clone()),
            ("Language", config.tmdb.language.clone()),
            ("Data source", source_label(config.data.source).to_string()),
            ("Storage", storage_dir.display().to_string()),
            ("Log level", config.logging.level.clone()),
            ("Log output", log_file.clone()),
        ];
        for (label, value) in rows {
            table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
        }
        println!("{}", table);

        if !config.has_api_key() {
            println!(
                "{}",
                format!(
                    "No TMDB API key: catalogs come from built-in sample data. Set one with `cinelist config set-api-key` or {}.",
                    API_KEY_ENV
                )
                .bright_black()
            );
        }
    }

    output.data(&json!({
        "config_file": config_file.display().to_string(),
        "exists": config_file.exists(),
        "tmdb": {
            "api_key": config.api_key().map(|_| key_display.clone()),
            "base_url": config.tmdb.base_url,
            "language": config.tmdb.language,
        },
        "data": { "source": config.data.source },
        "storage": { "dir": storage_dir.display().to_string() },
        "logging": {
            "level": config.logging.level,
            "json": config.logging.json,
            "output": log_file,
        },
    }));
    Ok(())
}

fn init_config(paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    output.data(&json!({ "config_file": config_file.display().to_string() }));
    Ok(())
}

fn set_api_key(paths: &PathManager, key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => prompts::prompt_secret("TMDB API key")?,
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(color_eyre::eyre::eyre!("API key cannot be empty"));
    }

    let config_file = paths.config_file();
    let mut config = load(paths)?;
    config.tmdb.api_key = Some(key.to_string());
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Saved API key {} to {}", mask_string(key), config_file.display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
