//! Log file and console setup.

use anyhow::{Context, Result};
use cleanwatch_config::{AppPaths, LoggingConfig};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber: an append-only log file plus stderr.
///
/// The returned guard flushes the file writer when dropped and must be held
/// until the process exits.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<WorkerGuard> {
    let log_file = config.file_path(AppPaths::new().as_ref());
    let (dir, file_name) = split_log_path(&log_file)?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.level, verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(false),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(guard)
}

fn default_directive(level: &str, verbose: bool) -> String {
    if verbose {
        "cleanwatch=debug,cleanwatch_ingest=debug,info".to_string()
    } else {
        level.to_string()
    }
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/var/log/cleanwatch.log")).unwrap();
        assert_eq!(dir, Path::new("/var/log"));
        assert_eq!(name, "cleanwatch.log");

        let (dir, name) = split_log_path(Path::new("cleanwatch.log")).unwrap();
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "cleanwatch.log");

        assert!(split_log_path(Path::new("/")).is_err());
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("warn", false), "warn");
        assert!(default_directive("warn", true).starts_with("cleanwatch=debug"));
    }
}
