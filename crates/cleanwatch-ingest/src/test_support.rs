//! Fixtures shared by the unit tests.

use crate::error::{IngestError, IngestResult};
use crate::parsers::{DocumentParser, ParsedDocument};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Build a minimal `word/document.xml` with one run per paragraph.
pub fn document_xml(paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| {
            format!(
                r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                p.replace('&', "&amp;").replace('<', "&lt;")
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    )
}

/// Write a `.docx` package containing only `word/document.xml`.
pub fn write_docx(path: &Path, document_xml: &str) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(document_xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

/// Parser that fails a fixed number of times before returning `paragraphs`.
pub struct FlakyParser {
    failures: u32,
    calls: AtomicU32,
    paragraphs: Vec<String>,
}

impl FlakyParser {
    pub fn new(failures: u32, paragraphs: &[&str]) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
            paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn always_failing() -> Self {
        Self::new(u32::MAX, &[])
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentParser for FlakyParser {
    fn parse(&self, path: &Path) -> IngestResult<ParsedDocument> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            return Err(IngestError::ParseError {
                path: path.to_path_buf(),
                message: format!("file is locked (call {})", call),
            });
        }
        Ok(ParsedDocument::new(self.paragraphs.clone()))
    }

    fn extensions(&self) -> &[&str] {
        &["doc", "docx"]
    }
}

/// Lets a test keep a handle on a parser it hands to a processor.
impl<P: DocumentParser> DocumentParser for Arc<P> {
    fn parse(&self, path: &Path) -> IngestResult<ParsedDocument> {
        self.as_ref().parse(path)
    }

    fn extensions(&self) -> &[&str] {
        self.as_ref().extensions()
    }
}

/// In-memory sink for formatted `tracing` output.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Run `f` with a fmt subscriber writing into this capture.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> T {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
