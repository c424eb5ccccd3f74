//! cleanwatch CLI - Strip blank lines from files dropped into a folder

mod commands;
mod logging;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

/// cleanwatch - Strip blank lines from files dropped into a folder
#[derive(Parser)]
#[command(name = "cleanwatch")]
#[command(author = "Lalo Morales <lalomorales22@github.com>")]
#[command(version)]
#[command(about = "Watch a folder and write copies of new text files with blank lines removed", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the default location
    #[arg(short, long, global = true, env = "CLEANWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Log file to append to (overrides the config file)
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the input directory until interrupted
    Watch {
        /// Directory to watch (overrides the config file)
        #[arg(short, long)]
        input: Option<String>,

        /// Directory for cleaned files (overrides the config file)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Clean an existing file, or every file directly inside a directory
    Process {
        /// File or directory to process
        path: PathBuf,

        /// Directory for cleaned files (overrides the config file)
        #[arg(short, long)]
        output: Option<String>,

        /// Print one JSON record per processed file
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the config file location
    Path,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = commands::load_config(cli.config.as_deref())?;
    if let Some(file) = cli.log_file {
        config.logging.file = Some(file);
    }

    match cli.command {
        Commands::Watch { input, output } => {
            if let Some(input) = input {
                config.watch.input_dir = input;
            }
            if let Some(output) = output {
                config.output.output_dir = output;
            }
            let _guard = logging::init_logging(&config.logging, cli.verbose)?;
            commands::watch::run(&config)
        }
        Commands::Process { path, output, json } => {
            if let Some(output) = output {
                config.output.output_dir = output;
            }
            let _guard = logging::init_logging(&config.logging, cli.verbose)?;
            commands::process::run(&config, &path, json)
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(&config),
            ConfigCommands::Init { force } => commands::config::init(cli.config.as_deref(), force),
            ConfigCommands::Path => commands::config::path(cli.config.as_deref()),
        },
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
