//! File system watcher for the input directory.

use crate::error::{IngestError, IngestResult};
use glob::Pattern;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A file or directory was created in the watched directory.
    Created { path: PathBuf },
    /// The watch backend reported an error.
    Error(String),
}

/// Configuration for the file watcher.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Directory to watch (not recursively).
    pub directory: PathBuf,
    /// Patterns to ignore.
    pub ignore_patterns: Vec<Pattern>,
}

impl WatcherConfig {
    /// Create from config.
    pub fn from_config(config: &cleanwatch_config::WatchConfig) -> Self {
        let ignore_patterns = config
            .ignore_patterns
            .iter()
            .filter_map(|p| match Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Skipping invalid ignore pattern {:?}: {}", p, e);
                    None
                }
            })
            .collect();

        Self {
            directory: config.input_dir(),
            ignore_patterns,
        }
    }
}

/// Watches one directory for newly created files.
pub struct FileWatcher {
    config: WatcherConfig,
    watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    watching: bool,
}

impl FileWatcher {
    /// Create a new file watcher.
    pub fn new(config: WatcherConfig) -> IngestResult<Self> {
        let (tx, rx) = channel();
        let watcher = RecommendedWatcher::new(tx, notify::Config::default())?;

        Ok(Self {
            config,
            watcher,
            receiver: rx,
            watching: false,
        })
    }

    /// Start watching the configured directory.
    pub fn start(&mut self) -> IngestResult<()> {
        let dir = &self.config.directory;
        if !dir.is_dir() {
            return Err(IngestError::FileNotFound(dir.clone()));
        }

        self.watcher.watch(dir, RecursiveMode::NonRecursive)?;
        self.watching = true;
        info!("Watching for new files in folder: {}", dir.display());
        Ok(())
    }

    /// Stop watching. Events already queued are discarded.
    ///
    /// A watch the backend has already dropped, e.g. because the directory
    /// was removed, counts as stopped.
    pub fn stop(&mut self) {
        if !self.watching {
            return;
        }

        if let Err(e) = self.watcher.unwatch(&self.config.directory) {
            warn!(
                "Could not unwatch {}: {}",
                self.config.directory.display(),
                e
            );
        }
        self.watching = false;
        while self.receiver.try_recv().is_ok() {}
    }

    /// Poll for events (non-blocking).
    pub fn poll(&self) -> Vec<WatchEvent> {
        let mut events = Vec::new();
        while let Ok(result) = self.receiver.try_recv() {
            events.extend(translate(&self.config, result));
        }
        events
    }

    /// Wait up to `timeout` for events, then drain whatever else is queued.
    ///
    /// Returns an empty list on timeout so callers can check for shutdown.
    pub fn wait(&self, timeout: Duration) -> Vec<WatchEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => {
                let mut events = translate(&self.config, result);
                events.extend(self.poll());
                events
            }
            Err(RecvTimeoutError::Timeout) => Vec::new(),
            Err(RecvTimeoutError::Disconnected) => {
                vec![WatchEvent::Error("watch backend disconnected".to_string())]
            }
        }
    }
}

/// Map a raw notify event to the events we act on.
fn translate(config: &WatcherConfig, result: notify::Result<Event>) -> Vec<WatchEvent> {
    let event = match result {
        Ok(event) => event,
        Err(e) => {
            error!("Watch error: {:?}", e);
            return vec![WatchEvent::Error(e.to_string())];
        }
    };

    if !matches!(event.kind, EventKind::Create(_)) {
        return Vec::new();
    }

    event
        .paths
        .into_iter()
        .filter(|path| {
            if should_ignore_path(path, &config.ignore_patterns) {
                debug!("Ignoring file: {:?}", path);
                false
            } else {
                true
            }
        })
        .map(|path| WatchEvent::Created { path })
        .collect()
}

/// List the files directly inside `dir`, skipping ignored names.
pub fn scan_directory(dir: &Path, ignore_patterns: &[Pattern]) -> IngestResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::FileNotFound(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| !should_ignore_path(path, ignore_patterns))
        .collect();

    files.sort();
    Ok(files)
}

fn should_ignore_path(path: &Path, patterns: &[Pattern]) -> bool {
    let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    // Hidden files, including our own in-progress outputs
    if filename.starts_with('.') {
        return true;
    }

    patterns.iter().any(|pattern| pattern.matches(filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};

    fn config(dir: &Path) -> WatcherConfig {
        WatcherConfig {
            directory: dir.to_path_buf(),
            ignore_patterns: vec![
                Pattern::new("*.tmp").unwrap(),
                Pattern::new("~$*").unwrap(),
            ],
        }
    }

    #[test]
    fn test_should_ignore() {
        let patterns = vec![
            Pattern::new("*.tmp").unwrap(),
            Pattern::new("~$*").unwrap(),
        ];

        assert!(should_ignore_path(Path::new("/in/.hidden.txt"), &patterns));
        assert!(should_ignore_path(Path::new("/in/file.tmp"), &patterns));
        assert!(should_ignore_path(Path::new("/in/~$report.docx"), &patterns));
        assert!(!should_ignore_path(Path::new("/in/notes.txt"), &patterns));
        assert!(!should_ignore_path(Path::new("/in/report.docx"), &patterns));
    }

    #[test]
    fn test_translate_keeps_only_creations() {
        let config = config(Path::new("/in"));

        let created = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/in/notes.txt"))
            .add_path(PathBuf::from("/in/.notes.txt.swp"));
        assert_eq!(
            translate(&config, Ok(created)),
            vec![WatchEvent::Created {
                path: PathBuf::from("/in/notes.txt")
            }]
        );

        let modified = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/in/notes.txt"));
        assert!(translate(&config, Ok(modified)).is_empty());
    }

    #[test]
    fn test_translate_errors() {
        let config = config(Path::new("/in"));
        let events = translate(&config, Err(notify::Error::generic("queue overflow")));
        assert!(matches!(events.as_slice(), [WatchEvent::Error(msg)] if msg.contains("queue overflow")));
    }

    #[test]
    fn test_scan_directory_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();
        std::fs::write(dir.path().join("a.docx"), "a").unwrap();
        std::fs::write(dir.path().join("skip.tmp"), "x").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.txt"), "c").unwrap();

        let files = scan_directory(dir.path(), &config(dir.path()).ignore_patterns).unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("a.docx"), dir.path().join("b.txt")]
        );
    }

    #[test]
    fn test_start_requires_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let mut watcher = FileWatcher::new(config(&missing)).unwrap();
        assert!(matches!(watcher.start(), Err(IngestError::FileNotFound(_))));
        watcher.stop();
    }

    #[test]
    fn test_stop_after_directory_removed() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        std::fs::create_dir(&input).unwrap();

        let mut watcher = FileWatcher::new(config(&input)).unwrap();
        watcher.start().unwrap();
        std::fs::remove_dir(&input).unwrap();

        watcher.stop();
        assert!(!watcher.watching);
        assert!(watcher.poll().is_empty());

        // Stopping twice is a no-op
        watcher.stop();
    }

    #[test]
    fn test_from_config_skips_invalid_patterns() {
        let watch = cleanwatch_config::WatchConfig {
            input_dir: "/srv/in".to_string(),
            ignore_patterns: vec!["*.tmp".to_string(), "[".to_string()],
        };
        let config = WatcherConfig::from_config(&watch);
        assert_eq!(config.directory, PathBuf::from("/srv/in"));
        assert_eq!(config.ignore_patterns.len(), 1);
    }
}
