//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub processing: ProcessingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> ConfigResult<Self> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&paths.config_file)
    }

    /// Load configuration from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        debug!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let contents = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default_config_string())?;
        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# cleanwatch configuration

[watch]
# Directory watched (non-recursively) for new .txt, .doc and .docx files.
input_dir = "input_folder"

# File name patterns to ignore. Hidden files are always ignored.
ignore_patterns = [
    "*.tmp",
    "*.temp",
    "*.part",
    "~$*",
]

[output]
# Where cleaned copies are written.
output_dir = "output_folder"

# Prefix for cleaned file names: notes.txt -> cleaned_notes.txt.txt
prefix = "cleaned_"

[processing]
# Attempts made to extract text from a document before giving up.
max_attempts = 3

# Pause after each failed document extraction attempt (seconds).
retry_delay_seconds = 2

[logging]
# Log file (appended to). Defaults to the platform data directory.
# file = "~/cleanwatch.log"

# Default level when RUST_LOG is not set.
level = "info"
"#
        .to_string()
    }

    /// Check values that cannot be expressed through serde alone.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.processing.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "processing.max_attempts must be at least 1".to_string(),
            ));
        }

        let input = self.watch.input_dir();
        let output = self.output.output_dir();
        if normalize(&input) == normalize(&output) {
            return Err(ConfigError::Invalid(format!(
                "input and output directories must differ: {}",
                input.display()
            )));
        }

        Ok(())
    }
}

/// Canonical form of a directory when it exists, otherwise the path with
/// `.` components removed.
fn normalize(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    })
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// File watching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub input_dir: String,
    pub ignore_patterns: Vec<String>,
}

impl WatchConfig {
    /// Input directory with `~` expanded.
    pub fn input_dir(&self) -> PathBuf {
        expand(&self.input_dir)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            input_dir: "input_folder".to_string(),
            ignore_patterns: vec![
                "*.tmp".to_string(),
                "*.temp".to_string(),
                "*.part".to_string(),
                "~$*".to_string(),
            ],
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_dir: String,
    pub prefix: String,
}

impl OutputConfig {
    /// Output directory with `~` expanded.
    pub fn output_dir(&self) -> PathBuf {
        expand(&self.output_dir)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: "output_folder".to_string(),
            prefix: "cleaned_".to_string(),
        }
    }
}

/// Document retry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub max_attempts: u32,
    pub retry_delay_seconds: u64,
}

impl ProcessingConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_seconds)
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_seconds: 2,
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub level: String,
}

impl LoggingConfig {
    /// Log file path, falling back to `<data_dir>/logs/cleanwatch.log`.
    pub fn file_path(&self, paths: Option<&AppPaths>) -> PathBuf {
        match (&self.file, paths) {
            (Some(file), _) => expand(file),
            (None, Some(paths)) => paths.log_file(),
            (None, None) => PathBuf::from("cleanwatch.log"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
