//! Blank-line removal for a single source file.

use crate::error::{IngestError, IngestResult};
use crate::parsers::{strip_blank_lines, DocumentParser, DocxParser, LineCounts, ParsedDocument};
use cleanwatch_config::ProcessingConfig;
use cleanwatch_core::{ProcessingResult, SourceFile, SourceFormat};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Bounded retry with a fixed pause, applied to document extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            delay: config.retry_delay(),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

/// Turns source files into cleaned plain-text copies.
pub struct Processor {
    parser: Box<dyn DocumentParser>,
    retry: RetryPolicy,
}

impl Processor {
    /// Create a processor with a custom document parser.
    pub fn new(parser: impl DocumentParser + 'static, retry: RetryPolicy) -> Self {
        Self {
            parser: Box::new(parser),
            retry,
        }
    }

    /// Create a processor from config, using the `.docx` parser.
    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self::new(DocxParser::new(), RetryPolicy::from_config(config))
    }

    /// Clean `input` into `output`. Never panics or returns an error; every
    /// failure is logged and reported through the result.
    pub fn process(&self, input: &Path, output: &Path) -> ProcessingResult {
        self.process_source(&SourceFile::new(input), output)
    }

    /// Clean an already observed source file into `output`.
    pub fn process_source(&self, source: &SourceFile, output: &Path) -> ProcessingResult {
        let input = source.path();
        info!("Processing file: {}", input.display());

        match source.format() {
            SourceFormat::PlainText => match clean_text_file(input, output) {
                Ok(counts) => {
                    info!(
                        "Successfully processed TXT file: {} ({} of {} lines kept)",
                        output.display(),
                        counts.kept,
                        counts.total
                    );
                    ProcessingResult::succeeded(source, output, 1)
                }
                Err(e) => {
                    error!("Error processing file: {} - {}", input.display(), e);
                    ProcessingResult::failed(source, 1)
                }
            },
            SourceFormat::LegacyDocument => self.process_document(source, output),
            SourceFormat::Unsupported => {
                warn!(
                    "Unsupported file type: {}. Only .txt, .doc, and .docx files are supported.",
                    input.display()
                );
                ProcessingResult::failed(source, 0)
            }
        }
    }

    fn process_document(&self, source: &SourceFile, output: &Path) -> ProcessingResult {
        let input = source.path();
        let max = self.retry.max_attempts;

        for attempt in 1..=max {
            match self.clean_document(input, output) {
                Ok(doc) => {
                    debug!("Document metadata: {}", doc.metadata);
                    info!("Successfully processed DOC/DOCX file: {}", output.display());
                    return ProcessingResult::succeeded(source, output, attempt);
                }
                Err(e) => {
                    error!(
                        "Error processing doc/docx file on attempt {}/{}: {} - {}",
                        attempt,
                        max,
                        input.display(),
                        e
                    );
                    // Pause after every failure, the last one included.
                    if !self.retry.delay.is_zero() {
                        std::thread::sleep(self.retry.delay);
                    }
                }
            }
        }

        error!(
            "Giving up on {} after {} attempts",
            input.display(),
            max
        );
        ProcessingResult::failed(source, max)
    }

    fn clean_document(&self, input: &Path, output: &Path) -> IngestResult<ParsedDocument> {
        let doc = self.parser.parse(input)?;
        let text = doc.cleaned_text();
        write_atomically(output, |w| Ok(w.write_all(text.as_bytes())?))?;
        Ok(doc)
    }
}

/// Remove blank lines from `input` and save the result to `output`, using the
/// default retry policy. Returns whether the output was written.
pub fn remove_blank_lines(input: &Path, output: &Path) -> bool {
    Processor::from_config(&ProcessingConfig::default())
        .process(input, output)
        .success
}

fn clean_text_file(input: &Path, output: &Path) -> IngestResult<LineCounts> {
    if !input.exists() {
        return Err(IngestError::FileNotFound(input.to_path_buf()));
    }

    let reader = BufReader::new(File::open(input)?);
    write_atomically(output, |w| Ok(strip_blank_lines(reader, w)?))
}

/// Run `write` against a temporary file next to `output`, then rename it into
/// place. The destination is untouched unless `write` succeeds.
fn write_atomically<T>(
    output: &Path,
    write: impl FnOnce(&mut BufWriter<&mut File>) -> IngestResult<T>,
) -> IngestResult<T> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".cleanwatch-")
        .suffix(".part")
        .tempfile_in(dir)?;

    let value = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let value = write(&mut writer)?;
        writer.flush()?;
        value
    };

    temp.persist(output).map_err(|e| IngestError::Io(e.error))?;
    Ok(value)
}
