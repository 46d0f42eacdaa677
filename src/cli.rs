use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Parser)]
#[command(name = "consia")]
#[command(author, version, about = "Extract product reviews and get a buy / don't-buy analysis", long_about = None)]
#[command(after_help = r#"Examples:
  consia analyze "https://www.amazon.in/dp/B0C..."            Analyze a product page
  consia analyze "https://www.flipkart.com/..." --file p.html  Analyze a saved page
  consia extract "https://www.amazon.in/dp/B0C..." --json      Show what would be sent
  consia classify "https://www.flipkart.com/.../product-reviews/itm..."
  consia doctor                                                Check the analysis service

Quick Start:
  1. python app.py                 (start the analysis service)
  2. consia doctor
  3. consia analyze <product-url>
"#)]
pub struct Cli {
    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract title, price and reviews from a product page
    #[command(after_help = r#"Examples:
  consia extract "https://www.amazon.in/dp/B0C..."
  consia extract "https://www.amazon.in/dp/B0C..." --file saved.html
  consia extract "https://www.flipkart.com/..." --json | jq '.payload.reviews'
"#)]
    Extract {
        /// Product page URL (selects the site strategy)
        url: String,

        /// Read the page from a saved HTML file instead of downloading it
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract reviews and send them to the analysis service
    #[command(after_help = r#"Examples:
  consia analyze "https://www.amazon.in/dp/B0C..."
  consia analyze "https://www.flipkart.com/..." --file saved.html
  consia analyze "https://shop.example.com/item" --any-site
  consia analyze "https://www.amazon.in/dp/B0C..." --json
"#)]
    Analyze {
        /// Product page URL
        url: String,

        /// Read the page from a saved HTML file instead of downloading it
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Analyze pages outside Amazon and Flipkart too
        #[arg(long)]
        any_site: bool,
    },

    /// Analyze several product pages in one request
    Batch {
        /// Product page URLs
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a saved analysis response (either shape) and display it
    #[command(after_help = r#"Examples:
  consia normalize response.json
  curl -s -X POST localhost:5000/analyze -d @payload.json -H 'Content-Type: application/json' | consia normalize -
"#)]
    Normalize {
        /// Response JSON file, or - for stdin
        file: PathBuf,

        /// Output the canonical result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which site strategy a URL selects
    Classify {
        /// Page URL
        url: String,
    },

    /// Check configuration and the analysis service
    Doctor,

    /// Show the active configuration
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  consia completions bash > ~/.local/share/bash-completion/completions/consia
  consia completions zsh > ~/.zfunc/_consia
  consia completions fish > ~/.config/fish/completions/consia.fish
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}
