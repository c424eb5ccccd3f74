//! Watch command implementation.

use super::prepare_directories;
use anyhow::{Context, Result};
use cleanwatch_config::Config;
use cleanwatch_core::ProcessingResult;
use cleanwatch_ingest::{EventHandler, FileWatcher, WatcherConfig};
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// How often the loop wakes up to check for a stop request.
const SHUTDOWN_POLL: Duration = Duration::from_secs(1);

/// Watch the input directory until interrupted.
pub fn run(config: &Config) -> Result<()> {
    info!("Script started");
    let (input, output) = prepare_directories(config)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    ctrlc::set_handler(move || {
        info!("Received stop signal, shutting down...");
        flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to install signal handler")?;

    let handler = EventHandler::from_config(config);
    let mut watcher = FileWatcher::new(WatcherConfig::from_config(&config.watch))?;
    watcher.start()?;

    println!("{}", "Starting file watcher...".cyan());
    println!("  {} {}", "Input: ".bold(), input.display());
    println!("  {} {}", "Output:".bold(), output.display());
    println!("\nPress Ctrl+C to stop.\n");

    handler.run(&mut watcher, &shutdown, SHUTDOWN_POLL, print_result);
    println!("{}", "Stopped watching.".cyan());
    Ok(())
}

fn print_result(result: &ProcessingResult) {
    let time = result.finished_at.with_timezone(&chrono::Local).format("%H:%M:%S");
    match &result.output_path {
        Some(output) if result.success => println!(
            "[{}] {} {} -> {}",
            time,
            "Cleaned".green(),
            result.source.display(),
            output.display()
        ),
        _ => println!(
            "[{}] {} {} [{}]",
            time,
            "Failed".red(),
            result.source.display(),
            result.format
        ),
    }
}
