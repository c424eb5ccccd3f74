//! Application paths management.

use directories::ProjectDirs;
use std::path::PathBuf;

/// Platform-specific locations for the config file and logs.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub config_file: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    /// Create paths using platform-specific directories.
    pub fn new() -> Option<Self> {
        let proj_dirs = ProjectDirs::from("com", "cleanwatch", "cleanwatch")?;

        let config_dir = proj_dirs.config_dir().to_path_buf();
        let data_dir = proj_dirs.data_dir().to_path_buf();

        Some(Self {
            config_file: config_dir.join("config.toml"),
            log_dir: data_dir.join("logs"),
            config_dir,
            data_dir,
        })
    }

    /// Default log file.
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("cleanwatch.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_paths_creation() {
        // Headless CI boxes may have no home directory.
        let Some(paths) = AppPaths::new() else {
            return;
        };

        assert!(paths.config_file.ends_with("config.toml"));
        assert!(paths.log_file().ends_with("logs/cleanwatch.log"));
    }
}
