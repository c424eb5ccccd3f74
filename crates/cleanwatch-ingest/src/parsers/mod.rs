//! Content extractors for the supported file formats.

mod docx;
mod text;

pub use docx::DocxParser;
pub use text::{strip_blank_lines, LineCounts};

use crate::error::IngestResult;
use std::path::Path;

/// Paragraphs extracted from a structured document.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Paragraph texts in document order, blank ones included.
    pub paragraphs: Vec<String>,
    /// Extracted metadata.
    pub metadata: serde_json::Value,
}

impl ParsedDocument {
    /// Create a new parsed document.
    pub fn new(paragraphs: Vec<String>) -> Self {
        Self {
            paragraphs,
            metadata: serde_json::json!({}),
        }
    }

    /// Set metadata.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Non-blank paragraphs joined with `\n`, without a trailing newline.
    pub fn cleaned_text(&self) -> String {
        self.paragraphs
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Trait for document parsers.
pub trait DocumentParser: Send + Sync {
    /// Parse a file at the given path.
    fn parse(&self, path: &Path) -> IngestResult<ParsedDocument>;

    /// Get the supported file extensions.
    fn extensions(&self) -> &[&str];

    /// Check if this parser supports the given extension.
    fn supports(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaned_text_drops_blank_paragraphs() {
        let doc = ParsedDocument::new(vec![
            "First".to_string(),
            String::new(),
            "   \t".to_string(),
            "  Second  ".to_string(),
        ]);
        assert_eq!(doc.cleaned_text(), "First\n  Second  ");
    }

    #[test]
    fn test_cleaned_text_all_blank() {
        let doc = ParsedDocument::new(vec![String::new(), " ".to_string()]);
        assert_eq!(doc.cleaned_text(), "");
    }
}
