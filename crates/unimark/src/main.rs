//! unimark CLI - markdown to host component markup.
//!
//! Provides commands for:
//! - `render`: Render a markdown file (or stdin) to host markup
//! - `fetch`: Fetch markdown from an API endpoint and render it
//! - `stream`: Follow a `data:` event stream, re-rendering as it grows

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{FetchArgs, RenderArgs, StreamArgs};
use output::Output;

/// unimark - markdown to host component markup.
#[derive(Parser)]
#[command(name = "unimark", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover unimark.toml).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL that relative URLs are joined onto (overrides config).
    #[arg(long, global = true, env = "UNIMARK_BASE_URL")]
    pub base_url: Option<String>,

    /// Bearer token for API requests (overrides config).
    #[arg(long, global = true, env = "UNIMARK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render markdown to host markup.
    Render(RenderArgs),
    /// Fetch markdown from an API endpoint and render it.
    Fetch(FetchArgs),
    /// Follow an event stream and render the accumulated markdown.
    Stream(StreamArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&cli.global),
        Commands::Fetch(args) => args.execute(&cli.global),
        Commands::Stream(args) => args.execute(&cli.global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        if let Some(hint) = err.hint() {
            output.info(hint);
        }
        std::process::exit(1);
    }
}
