//! CLI Module
//!
//! Command-line interface for simulating the ambient player headlessly.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ambient sound player - replay play/stop/visibility events without a browser
#[derive(Parser, Debug)]
#[command(name = "ambient-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a sequence of events against headless collaborators
    #[command(name = "simulate")]
    Simulate {
        /// Events to replay: play, stop, visible, hidden
        events: Vec<String>,

        /// JSON file holding an array of events, replayed before EVENTS
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Player config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Make the audio resource refuse every start command
        #[arg(long)]
        fail_start: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default player config
    #[command(name = "default-config")]
    DefaultConfig,

    /// Load and validate a player config file
    #[command(name = "check-config")]
    CheckConfig {
        /// Path to the config file
        path: PathBuf,
    },
}
