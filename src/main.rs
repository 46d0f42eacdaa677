//! consia - review extraction and purchase analysis for product pages

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use consia::cli::{Cli, Commands};
use consia::error::Result;

mod commands;
mod utils;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint.dimmed());
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
/// `-v` overrides RUST_LOG; without either only warnings are shown.
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("consia=debug"),
        _ => EnvFilter::new("consia=trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract { url, file, json } => commands::cmd_extract(&url, file.as_deref(), json),
        Commands::Analyze { url, file, json, any_site } => {
            commands::cmd_analyze(&url, file.as_deref(), json, any_site)
        }
        Commands::Batch { urls, json } => commands::cmd_batch(&urls, json),
        Commands::Normalize { file, json } => commands::cmd_normalize(&file, json),
        Commands::Classify { url } => commands::cmd_classify(&url),
        Commands::Doctor => commands::cmd_doctor(),
        Commands::Config { path } => commands::cmd_config(path),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
