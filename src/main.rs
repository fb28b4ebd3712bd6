//! Hyperlayer - hyper key sublayers for Karabiner-Elements
//!
//! Generates `karabiner.json` from a table of sublayers, validates rule
//! files, and manages the user configuration.

use clap::{Parser, Subcommand};
use hyperlayer::cli::{CliResult, ConfigArgs, GenerateArgs, ListArgs, ValidateArgs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Hyperlayer - hyper key sublayers for Karabiner-Elements
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate karabiner.json (default when no command is given)
    Generate(GenerateArgs),
    /// Validate a rule table
    Validate(ValidateArgs),
    /// List hyper shortcuts and sublayer bindings
    List(ListArgs),
    /// Show or change the configuration
    Config(ConfigArgs),
}

fn run(command: Option<Command>) -> CliResult<()> {
    match command {
        None => GenerateArgs::default().execute(),
        Some(Command::Generate(args)) => args.execute(),
        Some(Command::Validate(args)) => args.execute(),
        Some(Command::List(args)) => args.execute(),
        Some(Command::Config(args)) => args.execute(),
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing; stdout carries command output
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code.code());
    }
}
