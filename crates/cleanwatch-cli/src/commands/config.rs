//! Configuration commands.

use super::config_file;
use anyhow::{Context, Result};
use cleanwatch_config::Config;
use colored::Colorize;
use std::path::Path;

pub fn show(config: &Config) -> Result<()> {
    let contents = config.to_toml().context("Failed to render config")?;

    println!("{}", "Current Configuration".cyan().bold());
    println!("{}", "─".repeat(50));
    println!("{}", contents);

    Ok(())
}

pub fn init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = config_file(explicit)?;

    if path.exists() && !force {
        println!(
            "{} Config already exists: {}",
            "Note:".yellow().bold(),
            path.display()
        );
        println!("Use --force to overwrite it.");
        return Ok(());
    }

    Config::create_default_file(&path).context("Failed to create config file")?;
    println!("{} Created config: {}", "✓".green(), path.display());

    Ok(())
}

pub fn path(explicit: Option<&Path>) -> Result<()> {
    let path = config_file(explicit)?;
    let status = if path.exists() {
        "(exists)".green()
    } else {
        "(not created, defaults in use)".yellow()
    };
    println!("{} {}", path.display(), status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");

        init(Some(&path), false).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, Config::default_config_string());
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\nprefix = \"mine_\"\n").unwrap();

        init(Some(&path), false).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("mine_"));

        init(Some(&path), true).unwrap();
        assert!(!std::fs::read_to_string(&path).unwrap().contains("mine_"));
    }
}
