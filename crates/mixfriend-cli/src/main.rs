//! mixfriend CLI - generate Logic Pro Channel EQ presets for playback devices.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mixfriend")]
#[command(author, version, about = "Channel EQ presets that simulate playback devices", long_about = None)]
struct Cli {
    /// Device profile file (.json or .toml). Defaults to ./devices.json,
    /// then the user config directory, then the factory profiles.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a .pst preset for each device profile
    Generate(commands::generate::GenerateArgs),

    /// List device profiles
    List(commands::list::ListArgs),

    /// Print the band table of a .pst file
    Inspect(commands::inspect::InspectArgs),

    /// Check a .pst file against the reference footer and a device profile
    Verify(commands::verify::VerifyArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .init();
    tracing_log::LogTracer::init().ok();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Generate(args) => commands::generate::run(config, args),
        Commands::List(args) => commands::list::run(config, args),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Verify(args) => commands::verify::run(config, args),
    }
}
