//! glint CLI - Markdown renderer with syntax-highlighted code fences.
//!
//! Provides commands for:
//! - `render`: Render a markdown file to HTML
//! - `themes`: List bundled themes
//! - `langs`: List bundled languages

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::RenderArgs;
use output::Output;

/// glint - Markdown renderer with syntax-highlighted code fences.
#[derive(Parser)]
#[command(name = "glint", version, about)]
struct Cli {
    /// Enable info-level logging (otherwise RUST_LOG is used).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown file to HTML.
    Render(RenderArgs),
    /// List bundled themes.
    Themes,
    /// List bundled languages.
    Langs,
}

fn main() -> ExitCode {
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
        Commands::Render(args) => args.execute(),
        Commands::Themes => commands::list_themes(),
        Commands::Langs => commands::list_langs(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
