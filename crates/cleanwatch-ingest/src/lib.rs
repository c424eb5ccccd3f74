//! Cleanwatch Ingest - File watching and blank-line cleaning pipeline.
//!
//! This crate provides:
//! - Watching a directory for newly created files
//! - Text extraction for plain text and Word documents
//! - Blank-line removal with bounded retries for documents
//! - Routing of watch events to cleaned output files

mod error;
mod handler;
mod parsers;
mod processor;
mod watcher;

#[cfg(test)]
mod test_support;

pub use error::{IngestError, IngestResult};
pub use handler::EventHandler;
pub use parsers::{strip_blank_lines, DocumentParser, DocxParser, LineCounts, ParsedDocument};
pub use processor::{remove_blank_lines, Processor, RetryPolicy};
pub use watcher::{scan_directory, FileWatcher, WatchEvent, WatcherConfig};
