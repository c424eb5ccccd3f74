//! Core domain types for cleanwatch.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Format of a source file, decided once from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// `.txt` files, cleaned line by line.
    PlainText,
    /// `.doc` / `.docx` files, cleaned paragraph by paragraph.
    LegacyDocument,
    /// Anything else.
    Unsupported,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::PlainText => "plain-text",
            SourceFormat::LegacyDocument => "legacy-document",
            SourceFormat::Unsupported => "unsupported",
        }
    }

    /// Detect the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => SourceFormat::PlainText,
            "doc" | "docx" => SourceFormat::LegacyDocument,
            _ => SourceFormat::Unsupported,
        }
    }

    /// Detect the format from a path. Paths without an extension are unsupported.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(SourceFormat::Unsupported)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, SourceFormat::Unsupported)
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file observed in the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    format: SourceFormat,
}

impl SourceFile {
    /// Observe a file at `path`, tagging it with its format.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = SourceFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Name of the cleaned output for this file: `<prefix><basename>.txt`.
    ///
    /// The original extension is kept, so `notes.txt` becomes
    /// `cleaned_notes.txt.txt`.
    pub fn cleaned_name(&self, prefix: &str) -> Result<String> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| Error::NoFileName(self.path.clone()))?;
        Ok(format!("{}{}.txt", prefix, file_name.to_string_lossy()))
    }
}

/// Outcome of processing one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub source: PathBuf,
    pub format: SourceFormat,
    pub success: bool,
    /// Set only when `success` is true.
    pub output_path: Option<PathBuf>,
    /// Extraction attempts made (0 for unsupported files).
    pub attempts: u32,
    pub finished_at: DateTime<Utc>,
}

impl ProcessingResult {
    pub fn succeeded(source: &SourceFile, output: impl Into<PathBuf>, attempts: u32) -> Self {
        Self {
            source: source.path.clone(),
            format: source.format,
            success: true,
            output_path: Some(output.into()),
            attempts,
            finished_at: Utc::now(),
        }
    }

    pub fn failed(source: &SourceFile, attempts: u32) -> Self {
        Self {
            source: source.path.clone(),
            format: source.format,
            success: false,
            output_path: None,
            attempts,
            finished_at: Utc::now(),
        }
    }

    /// Serialize as a single-line JSON record.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
