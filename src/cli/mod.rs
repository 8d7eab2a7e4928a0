//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for LexShield using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// LexShield - legal document anonymization
#[derive(Parser, Debug)]
#[command(name = "lexshield")]
#[command(version, about, long_about = None)]
#[command(author = "LexShield Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "lexshield.toml", env = "LEXSHIELD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LEXSHIELD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymize plain-text documents into an output directory
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Detect entities and report privacy risk without writing anything
    Scan(commands::scan::ScanArgs),

    /// Show detector catalogue and capabilities
    Stats(commands::stats::StatsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
