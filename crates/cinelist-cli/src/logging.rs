use anyhow::Result;
use cinelist_config::LoggingConfig;
use std::io;
use std::io::IsTerminal;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is not set.
/// 0 = configured level, 1 = debug (hyper connection noise suppressed), 2+ = trace.
fn default_directive(verbose_level: u8, configured_level: &str) -> String {
    match verbose_level {
        0 => configured_level.to_string(),
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn,rustls=warn".to_string(),
        _ => "trace".to_string(),
    }
}

/// `cinelist.log` rotates as `cinelist.YYYY-MM-DD`
fn rotation_prefix(file_name: &str) -> &str {
    file_name.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file_name)
}

pub fn init_logging(verbose_level: u8, quiet: bool, settings: &LoggingConfig) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose_level, &settings.level)))
    };

    let json = match std::env::var("RUST_LOG_JSON") {
        Ok(v) => v == "true",
        Err(_) => settings.json.unwrap_or_else(|| !io::stderr().is_terminal()),
    };

    let registry = Registry::default().with(filter);

    match settings.file.as_deref() {
        Some(log_path) => {
            let file_appender = rolling_appender(log_path)?;
            if json {
                let json_layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(file_appender);
                registry.with(json_layer).init();
            } else {
                let fmt_layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(file_appender);
                registry.with(fmt_layer).init();
            }
        }
        None => {
            // stdout carries command output, so logs go to stderr
            if json {
                let json_layer = fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(json_layer).init();
            } else {
                let fmt_layer = fmt::layer()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(io::stderr);
                registry.with(fmt_layer).init();
            }
        }
    }

    Ok(())
}

fn rolling_appender(log_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;

    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

    Ok(RollingFileAppender::new(
        Rotation::DAILY,
        log_dir,
        rotation_prefix(log_filename),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0, "warn"), "warn");
        assert!(default_directive(1, "info").starts_with("debug,"));
        assert_eq!(default_directive(3, "info"), "trace");
    }

    #[test]
    fn test_rotation_prefix() {
        assert_eq!(rotation_prefix("cinelist.log"), "cinelist");
        assert_eq!(rotation_prefix("app.debug.log"), "app.debug");
        assert_eq!(rotation_prefix("plain"), "plain");
    }

    #[test]
    fn test_appender_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("cinelist.log");
        rolling_appender(&path).unwrap();
        assert!(dir.path().join("logs").is_dir());
    }
}
