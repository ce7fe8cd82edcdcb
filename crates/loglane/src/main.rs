//! Loglane - Command line entry point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `loglane emit --level error --message "..." --field user=a` | Write one record through the configured logger |
//! | `loglane config` | Print the effective configuration and log file path |
//!
//! Configuration comes from `--config`, a discovered `loglane.toml`, and
//! `LOGLANE__*` environment variables, in that order of precedence (lowest
//! first).

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use loglane::{ConfigLoader, Field, Level};
use std::path::PathBuf;

/// Command line interface for loglane
#[derive(Parser, Debug)]
#[command(name = "loglane")]
#[command(about = "Loglane - Structured logging with size-based file rotation")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write one record to the configured log file
    Emit {
        /// Severity: debug, info, warn, error, fatal or panic
        #[arg(short, long, default_value = "info")]
        level: String,

        /// Record message
        #[arg(short, long)]
        message: String,

        /// Context field as key=value, repeatable
        #[arg(short, long = "field", value_parser = parse_field)]
        field: Vec<(String, String)>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn parse_field(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got '{}'", raw))?;
    if key.is_empty() {
        return Err(anyhow!("field key cannot be empty in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;

    match cli.command {
        Command::Emit {
            level,
            message,
            field,
        } => {
            let level: Level = level.parse()?;
            let logger = loglane::init(&config).context("Failed to create logger")?;
            logger.log(
                level,
                &message,
                field.into_iter().map(|(key, value)| Field::new(key, value)),
            );
            loglane::shutdown().context("Failed to flush log file")?;
        }
        Command::Config => {
            let rendered =
                toml::to_string_pretty(&config).context("Failed to render configuration")?;
            print!("{}", rendered);
            println!("# log file: {}", config.log_file_path().display());
        }
    }

    Ok(())
}
