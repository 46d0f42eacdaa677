use std::path::Path;

use colored::Colorize;
use serde_json::Value;

use consia::error::{ConsiaError, Result};
use consia::platform::SiteClassifier;
use consia::report::ResultView;
use consia::result::normalize_result;

use super::analyze::print_result;
use crate::utils::read_input;

/// Normalize a saved response and show it the way `analyze` would
pub fn cmd_normalize(file: &Path, json: bool) -> Result<()> {
    let content = read_input(file)?;
    let raw: Value = serde_json::from_str(&content)
        .map_err(|e| ConsiaError::InvalidResponse(format!("{}: {}", file.display(), e)))?;
    let result = normalize_result(&raw);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("\n  Response shape: {:?}", result.schema);
    print_result(&ResultView::from(&result));
    Ok(())
}

/// Print the strategy ranking with the one this URL selects marked
pub fn cmd_classify(url: &str) -> Result<()> {
    let classifier = SiteClassifier::new();
    let chosen = classifier.classify(url);

    println!("\n  {} ({})\n", chosen.name().bold(), chosen.id());
    for id in classifier.ranking() {
        if id == chosen.id() {
            println!("  {} {}", "→".green(), id.green());
        } else {
            println!("    {}", id.dimmed());
        }
    }
    println!();
    Ok(())
}
