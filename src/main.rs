//! Ambient CLI - headless ambient sound player
//!
//! Command-line interface for replaying player events without a browser.

use clap::Parser;
use env_logger::Env;
use log::info;

use ambient_sound::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    info!("Ambient Sound v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Ambient Sound v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Simulate {
            events,
            script,
            config,
            fail_start,
            json,
        } => ambient_sound::cli::commands::simulate(
            &events,
            script.as_deref(),
            config.as_deref(),
            fail_start,
            json,
        )?,
        Commands::DefaultConfig => ambient_sound::cli::commands::print_default_config()?,
        Commands::CheckConfig { path } => ambient_sound::cli::commands::check_config(&path)?,
    }
    Ok(())
}
