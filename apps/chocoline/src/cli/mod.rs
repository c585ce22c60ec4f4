//! # Chocoline CLI Module
//!
//! This module implements the CLI interface for Chocoline.
//!
//! ## Available Commands
//!
//! - `inspect` - Run one unit along its route
//! - `simulate` - Produce and inspect a batch of units
//! - `feed` - Process a JSON feed of (unit, stage) pairs
//! - `catalog` - Show the defect catalog and detection settings
//!
//! Every command starts a fresh inspection run; nothing is persisted.

mod commands;

use crate::config::{ConfigOverrides, load_config};
use crate::error::CliError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Chocoline - chocolate production line quality inspection
///
/// Simulated sensors inspect chocolate units at molding and packaging,
/// decide pass/fail and aggregate the results into a quality report.
#[derive(Parser, Debug)]
#[command(name = "chocoline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML line configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Random seed for reproducible runs (overrides the config file)
    #[arg(short = 's', long, global = true)]
    pub seed: Option<u64>,

    /// Bubble observations tolerated at molding (overrides the config file)
    #[arg(long, global = true)]
    pub bubble_tolerance: Option<u32>,

    /// Stain observations tolerated before the cosmetic flag (overrides the config file)
    #[arg(long, global = true)]
    pub stain_tolerance: Option<u32>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect one unit along its route (molding, then packaging)
    Inspect {
        /// Unit identifier (batch code)
        #[arg(short, long)]
        id: String,

        /// Stages to pass, in any order (default: every stage)
        #[arg(short = 't', long = "stage")]
        stages: Vec<String>,

        /// Mold shape
        #[arg(long, default_value = "heart")]
        mold: String,

        /// Packaging kind
        #[arg(long, default_value = "gift_box")]
        packaging: String,
    },

    /// Produce and inspect a batch of units
    Simulate {
        /// Number of units to produce
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Unit identifier prefix
        #[arg(short, long, default_value = "LOT")]
        prefix: String,

        /// Stages to pass, in any order (default: every stage)
        #[arg(short = 't', long = "stage")]
        stages: Vec<String>,

        /// Also print the inspection history
        #[arg(long)]
        history: bool,
    },

    /// Process a JSON feed of (unit, stage) pairs
    Feed {
        /// Path to the feed file
        #[arg(short, long)]
        file: PathBuf,

        /// Also print the inspection history
        #[arg(long)]
        history: bool,
    },

    /// Show the defect catalog and detection settings
    Catalog,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), CliError> {
    let overrides = ConfigOverrides {
        seed: cli.seed,
        bubble_tolerance: cli.bubble_tolerance,
        stain_tolerance: cli.stain_tolerance,
    };
    let config = load_config(cli.config.as_deref(), &overrides)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Inspect {
            id,
            stages,
            mold,
            packaging,
        }) => cmd_inspect(&config, json_mode, &id, &stages, &mold, &packaging),
        Some(Commands::Simulate {
            count,
            prefix,
            stages,
            history,
        }) => cmd_simulate(&config, json_mode, count, &prefix, &stages, history),
        Some(Commands::Feed { file, history }) => cmd_feed(&config, json_mode, &file, history),
        Some(Commands::Catalog) | None => cmd_catalog(&config, json_mode),
    }
}
