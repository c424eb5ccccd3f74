//! Routes watch events to the processor.

use crate::processor::Processor;
use crate::watcher::{FileWatcher, WatchEvent};
use cleanwatch_config::Config;
use cleanwatch_core::{ProcessingResult, SourceFile};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, error, info};

/// Handles file creation events for one output directory.
pub struct EventHandler {
    processor: Processor,
    output_dir: PathBuf,
    prefix: String,
}

impl EventHandler {
    /// Create a new handler.
    pub fn new(processor: Processor, output_dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            processor,
            output_dir: output_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Create a handler from config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Processor::from_config(&config.processing),
            config.output.output_dir(),
            config.output.prefix.clone(),
        )
    }

    /// Handle events from a started `watcher` until `shutdown` is set, then
    /// stop the watcher and log the shutdown.
    ///
    /// The flag is checked at least every `poll`. Each processed file is
    /// passed to `on_result`.
    pub fn run(
        &self,
        watcher: &mut FileWatcher,
        shutdown: &AtomicBool,
        poll: Duration,
        mut on_result: impl FnMut(&ProcessingResult),
    ) {
        while !shutdown.load(Ordering::SeqCst) {
            for event in watcher.wait(poll) {
                if let Some(result) = self.handle(&event) {
                    on_result(&result);
                }
            }
        }

        watcher.stop();
        info!("Script stopped");
    }

    /// Handle one watch event. Returns a result only when a file was processed.
    pub fn handle(&self, event: &WatchEvent) -> Option<ProcessingResult> {
        match event {
            WatchEvent::Created { path } => self.handle_created(path),
            WatchEvent::Error(msg) => {
                error!("Watch error: {}", msg);
                None
            }
        }
    }

    /// Handle a created path. Directories and unsupported extensions are
    /// ignored without logging above debug level.
    pub fn handle_created(&self, path: &Path) -> Option<ProcessingResult> {
        if path.is_dir() {
            return None;
        }

        let source = SourceFile::new(path);
        if !source.format().is_supported() {
            debug!("Ignoring unsupported file type: {:?}", path);
            return None;
        }

        info!("File created event detected: {}", path.display());
        Some(self.process(&source))
    }

    /// Process a file regardless of its extension. Unsupported files are
    /// reported by the processor.
    pub fn process_file(&self, path: &Path) -> ProcessingResult {
        self.process(&SourceFile::new(path))
    }

    /// Output location for a source file: `<output_dir>/<prefix><basename>.txt`.
    pub fn output_path_for(&self, source: &SourceFile) -> cleanwatch_core::Result<PathBuf> {
        Ok(self.output_dir.join(source.cleaned_name(&self.prefix)?))
    }

    fn process(&self, source: &SourceFile) -> ProcessingResult {
        let output = match self.output_path_for(source) {
            Ok(output) => output,
            Err(e) => {
                error!("Processing failed for: {} - {}", source.path().display(), e);
                return ProcessingResult::failed(source, 0);
            }
        };

        let result = self.processor.process_source(source, &output);
        if result.success {
            info!("Processed and saved: {}", output.display());
        } else {
            error!("Processing failed for: {}", source.path().display());
        }
        result
    }
}
