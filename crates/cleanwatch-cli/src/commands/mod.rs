//! CLI command implementations.

pub mod config;
pub mod process;
pub mod watch;

use anyhow::{Context, Result};
use cleanwatch_config::{AppPaths, Config, ConfigError};
use std::path::{Path, PathBuf};

/// Resolve the config file: an explicit path wins over the platform default.
pub fn config_file(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => AppPaths::new()
            .map(|paths| paths.config_file)
            .context("Failed to determine application directories"),
    }
}

/// Load the configuration, falling back to defaults when no file exists.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => match Config::load() {
            Err(ConfigError::NoConfigDir) => Config::default(),
            other => other.context("Failed to load config")?,
        },
    };
    Ok(config)
}

/// Validate the config and create the input and output directories.
pub fn prepare_directories(config: &Config) -> Result<(PathBuf, PathBuf)> {
    config.validate().context("Invalid configuration")?;

    let input = config.watch.input_dir();
    let output = config.output.output_dir();
    for dir in [&input, &output] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok((input, output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleanwatch.toml");
        std::fs::write(&path, "[output]\nprefix = \"tidy_\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.output.prefix, "tidy_");
        assert_eq!(config_file(Some(&path)).unwrap(), path);
    }

    #[test]
    fn test_load_malformed_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleanwatch.toml");
        std::fs::write(&path, "[output\nprefix = ").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_prepare_directories_creates_both() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.watch.input_dir = dir.path().join("in").to_string_lossy().into_owned();
        config.output.output_dir = dir.path().join("out").to_string_lossy().into_owned();

        let (input, output) = prepare_directories(&config).unwrap();
        assert!(input.is_dir());
        assert!(output.is_dir());
    }

    #[test]
    fn test_prepare_directories_rejects_same_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.watch.input_dir = dir.path().to_string_lossy().into_owned();
        config.output.output_dir = dir.path().to_string_lossy().into_owned();

        assert!(prepare_directories(&config).is_err());
    }
}
