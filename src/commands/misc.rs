//! Miscellaneous commands: doctor, config, completions

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::time::Duration;

use consia::backend::AnalysisClient;
use consia::cli::{Cli, CompletionShell};
use consia::config::{Config, BACKEND_URL_ENV};
use consia::error::Result;
use consia::platform::SiteClassifier;

/// Health checks get a short fuse even when analysis requests have none
const HEALTH_TIMEOUT_SECS: u64 = 5;

pub fn cmd_doctor() -> Result<()> {
    println!("\nconsia doctor\n");

    println!("  consia binary: v{}", env!("CARGO_PKG_VERSION"));

    let path = Config::config_path()?;
    let state = if path.exists() { "found" } else { "not found, using defaults" };
    println!("  Config file: {} ({})", path.display(), state);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            println!("  Config: {} - {}", "ERROR".red(), e);
            println!();
            return Ok(());
        }
    };

    let source = if std::env::var(BACKEND_URL_ENV).is_ok() {
        format!(" (from {})", BACKEND_URL_ENV)
    } else {
        String::new()
    };
    println!("  Analysis service: {}{}", config.backend_url, source);
    println!("  Strategies: {}", SiteClassifier::new().ranking().join(", "));

    let client = AnalysisClient::new(
        &config.backend_url,
        Some(Duration::from_secs(HEALTH_TIMEOUT_SECS)),
    );
    match client.health() {
        Ok(health) => {
            let version = health.version.as_deref().unwrap_or("unknown version");
            println!("  Service health: {} ({})", health.status.green(), version);
            if let Some(message) = &health.message {
                println!("    {}", message.dimmed());
            }
            if !health.features.is_empty() {
                println!("    features: {}", health.features.join(", "));
            }
        }
        Err(e) => {
            println!("  Service health: {} - {}", "UNREACHABLE".red(), e);
            if let Some(hint) = e.hint() {
                println!("    {}", hint.replace('\n', "\n    ").dimmed());
            }
        }
    }

    println!();
    Ok(())
}

pub fn cmd_config(path_only: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    let config = Config::load()?;
    println!("# {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_completions(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
        CompletionShell::Powershell => Shell::PowerShell,
    };
    generate(shell, &mut cmd, "consia", &mut io::stdout());
    Ok(())
}
