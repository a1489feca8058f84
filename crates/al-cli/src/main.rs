use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use al_cli::commands::{attendance, contacts, journals, locations, record};
use al_cli::{Cli, Commands, Config};

/// Load and validate config.
fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Login(args)) => {
            let config = load_config(cli.config.as_deref())?;
            record::login(&mut stdout, args, &config)?;
        }
        Some(Commands::Logout(args)) => {
            let config = load_config(cli.config.as_deref())?;
            record::logout(&mut stdout, args, &config)?;
        }
        Some(Commands::Locations(args)) => {
            let config = load_config(cli.config.as_deref())?;
            locations::run(&mut stdout, args, &config)?;
        }
        Some(Commands::Attendance(args)) => {
            let config = load_config(cli.config.as_deref())?;
            attendance::run(&mut stdout, args, &config)?;
        }
        Some(Commands::Contacts(args)) => {
            let config = load_config(cli.config.as_deref())?;
            contacts::run(&mut stdout, args, &config)?;
        }
        Some(Commands::Journals) => {
            let config = load_config(cli.config.as_deref())?;
            journals::run(&mut stdout, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
