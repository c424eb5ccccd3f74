//! Word document parser.

use super::{DocumentParser, ParsedDocument};
use crate::error::{IngestError, IngestResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

const DOCUMENT_PART: &str = "word/document.xml";

/// Parser for `.docx` packages.
///
/// Only body paragraphs are collected. Paragraphs inside tables and text
/// boxes are skipped. Binary `.doc` files are not zip packages and fail to
/// open.
pub struct DocxParser;

impl DocxParser {
    /// Create a new document parser.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentParser for DocxParser {
    fn parse(&self, path: &Path) -> IngestResult<ParsedDocument> {
        if !path.exists() {
            return Err(IngestError::FileNotFound(path.to_path_buf()));
        }

        debug!("Parsing document: {:?}", path);

        let file = File::open(path)?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| parse_error(path, format!("Not a document package: {}", e)))?;
        let part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| parse_error(path, format!("Missing {}: {}", DOCUMENT_PART, e)))?;

        let paragraphs = read_paragraphs(BufReader::new(part))
            .map_err(|e| parse_error(path, format!("Malformed {}: {}", DOCUMENT_PART, e)))?;

        let metadata = serde_json::json!({
            "format": "docx",
            "paragraphs": paragraphs.len(),
            "blank_paragraphs": paragraphs.iter().filter(|p| p.trim().is_empty()).count(),
        });

        debug!("Extracted {} paragraphs from document", paragraphs.len());

        Ok(ParsedDocument::new(paragraphs).with_metadata(metadata))
    }

    fn extensions(&self) -> &[&str] {
        &["doc", "docx"]
    }
}

fn parse_error(path: &Path, message: String) -> IngestError {
    IngestError::ParseError {
        path: path.to_path_buf(),
        message,
    }
}

/// Walk `word/document.xml` and return the text of each body paragraph.
fn read_paragraphs<R: std::io::BufRead>(source: R) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_reader(source);
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut buf = Vec::new();

    let mut paragraph_depth = 0usize;
    let mut table_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        let in_body_paragraph = paragraph_depth == 1 && table_depth == 0;

        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"w:tbl" => table_depth += 1,
                b"w:r" => run_depth += 1,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if in_body_paragraph {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:r" => run_depth = run_depth.saturating_sub(1),
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" if paragraph_depth == 0 && table_depth == 0 => paragraphs.push(String::new()),
                b"w:tab" if in_body_paragraph && run_depth > 0 => current.push('\t'),
                b"w:br" | b"w:cr" if in_body_paragraph && run_depth > 0 => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text && in_body_paragraph => {
                current.push_str(&t.unescape()?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
