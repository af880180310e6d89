//! csb CLI - embed runnable CodeSandbox examples into markdown.
//!
//! Provides commands for:
//! - `transform`: Embed sandbox links in an mdast JSON tree
//! - `render`: Render markdown to HTML with sandbox links embedded
//! - `url`: Print the sandbox URL for a single link
//! - `decode`: Print the files packed into a `parameters` value

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DecodeArgs, RenderArgs, TransformArgs, UrlArgs};
use output::Output;

/// csb - embed runnable CodeSandbox examples into markdown.
#[derive(Parser)]
#[command(name = "csb", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed sandbox links in an mdast JSON tree.
    Transform(TransformArgs),
    /// Render markdown to HTML with sandbox links embedded.
    Render(RenderArgs),
    /// Print the sandbox URL for a single sentinel link.
    Url(UrlArgs),
    /// Print the files packed into an encoded `parameters` value.
    Decode(DecodeArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Transform(args) => args.embed.verbose,
            Self::Render(args) => args.embed.verbose,
            Self::Url(args) => args.embed.verbose,
            Self::Decode(_) => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Transform(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Url(args) => args.execute(),
        Commands::Decode(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
