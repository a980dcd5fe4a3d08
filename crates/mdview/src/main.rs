//! mdview CLI - Markdown to HTML converter.
//!
//! Provides commands for:
//! - `convert`: Convert markdown to an HTML fragment or standalone document
//! - `stats`: Print character, word, line and paragraph counts

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConvertArgs, StatsArgs};
use output::Output;

/// mdview - Markdown to HTML converter.
#[derive(Parser)]
#[command(name = "mdview", version, about)]
struct Cli {
    /// Enable verbose output (conversion timing and stage logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert markdown to HTML.
    Convert(ConvertArgs),
    /// Print document statistics.
    Stats(StatsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Stats(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
