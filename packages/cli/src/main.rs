mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{inspect, render, text, InspectArgs, RenderArgs, TextArgs};
use config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Wordtemplate CLI - fill `${...}` markers in rich-text documents
#[derive(Parser, Debug)]
#[command(name = "wordtemplate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./wordtemplate.config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the instructions found in a document
    Inspect(InspectArgs),

    /// Fill a document's markers from a JSON model
    Render(RenderArgs),

    /// Print the visible text of every body
    Text(TextArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_file(path)?,
        None => {
            let cwd = std::env::current_dir()?.display().to_string();
            Config::load(&cwd)?
        }
    };

    match cli.command {
        Command::Inspect(args) => inspect(args, &config),
        Command::Render(args) => render(args, &config),
        Command::Text(args) => text(args),
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
