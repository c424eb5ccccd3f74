//! One-shot processing of existing files.

use super::prepare_directories;
use anyhow::{Context, Result};
use cleanwatch_config::Config;
use cleanwatch_core::ProcessingResult;
use cleanwatch_ingest::{scan_directory, EventHandler, WatcherConfig};
use colored::Colorize;
use std::path::Path;

/// Clean `path`, or each file directly inside it when it is a directory.
pub fn run(config: &Config, path: &Path, json: bool) -> Result<()> {
    prepare_directories(config)?;
    let handler = EventHandler::from_config(config);

    let results = process_path(&handler, config, path)?;

    for result in &results {
        if json {
            println!("{}", result.to_json()?);
        } else if result.success {
            if let Some(output) = &result.output_path {
                println!("{} {}", "✓".green(), output.display());
            }
        } else {
            println!("{} {}", "✗".red(), result.source.display());
        }
    }

    let failed = results.iter().filter(|r| !r.success).count();
    if !json {
        println!();
        println!(
            "Processed {} file(s), {} failed",
            results.len(),
            failed
        );
    }

    if failed > 0 {
        anyhow::bail!("{} file(s) could not be cleaned", failed);
    }
    Ok(())
}

/// Directories go through the same filter as watch events; a single file is
/// always handed to the processor.
fn process_path(handler: &EventHandler, config: &Config, path: &Path) -> Result<Vec<ProcessingResult>> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if !path.is_dir() {
        return Ok(vec![handler.process_file(path)]);
    }

    let ignore = WatcherConfig::from_config(&config.watch).ignore_patterns;
    let files = scan_directory(path, &ignore)
        .with_context(|| format!("Failed to scan directory: {}", path.display()))?;

    Ok(files
        .iter()
        .filter_map(|file| handler.handle_created(file))
        .collect())
}
