use std::path::Path;

use colored::{ColoredString, Colorize};

use consia::backend::AnalysisClient;
use consia::config::Config;
use consia::error::{ConsiaError, Result};
use consia::extract::{extract_payload, Extraction};
use consia::fetch::{load_page, PageFetcher};
use consia::platform::SiteClassifier;
use consia::report::{ResultView, Verdict};
use consia::session::Analyzer;

use crate::utils::truncate_str;

/// Show what would be sent for a page
pub fn cmd_extract(url: &str, file: Option<&Path>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let mut page = load_page(url, file, &config)?;
    let extraction = extract_payload(&mut page, &SiteClassifier::new());

    if json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
        return Ok(());
    }

    print_extraction(&extraction);
    Ok(())
}

/// Extract, send, display
pub fn cmd_analyze(url: &str, file: Option<&Path>, json: bool, any_site: bool) -> Result<()> {
    let config = Config::load()?;
    let analyzer = Analyzer::from_config(&config).allow_any_site(config.allow_any_site || any_site);

    if !json {
        eprintln!("{}", "Extracting product info…".cyan());
    }
    let mut page = load_page(url, file, &config)?;
    if !json {
        eprintln!("{}", "Analyzing reviews…".cyan());
    }
    let report = analyzer.run(&mut page)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "\n  {} reviews via {} strategy",
            report.extraction.payload.reviews.len(),
            report.extraction.strategy
        );
        print_result(&ResultView::from(&report.result));
    }

    if report.result.failed {
        return Err(ConsiaError::AnalysisFailed(
            report.result.error.unwrap_or(report.result.recommendation),
        ));
    }
    Ok(())
}

/// Extract several pages and analyze them in one request
pub fn cmd_batch(urls: &[String], json: bool) -> Result<()> {
    let config = Config::load()?;
    let fetcher = PageFetcher::from_config(&config);
    let classifier = SiteClassifier::new();

    let mut payloads = Vec::new();
    for url in urls {
        let extraction = match fetcher.fetch(url) {
            Ok(mut page) => extract_payload(&mut page, &classifier),
            Err(e) => {
                eprintln!("  {} {}: {}", "✗".red(), url, e);
                continue;
            }
        };
        if extraction.payload.reviews.is_empty() {
            eprintln!("  {} {}: no reviews found, skipped", "-".yellow(), url);
            continue;
        }
        eprintln!(
            "  {} {} ({} reviews)",
            "✓".green(),
            truncate_str(&extraction.payload.title, 60),
            extraction.payload.reviews.len()
        );
        payloads.push(extraction.payload);
    }

    if payloads.is_empty() {
        return Err(ConsiaError::NoReviews);
    }

    let entries = AnalysisClient::from_config(&config).analyze_batch(&payloads)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!();
    for entry in &entries {
        println!(
            "  {:<50} {:<28} {:>5} {:>5}",
            truncate_str(&entry.title, 50),
            paint(&entry.recommendation, Verdict::classify(&entry.recommendation)),
            format!("{}/5", entry.true_rating),
            format!("{:.0}", entry.value_score),
        );
    }
    println!("\n  {} product(s) analyzed", entries.len());
    Ok(())
}

fn print_extraction(extraction: &Extraction) {
    let payload = &extraction.payload;
    let title = if payload.title.is_empty() {
        "(no title)".dimmed().to_string()
    } else {
        payload.title.bold().to_string()
    };

    println!("\n  {}", title);
    println!("  Strategy: {}", extraction.strategy);
    println!(
        "  Price:    {}",
        if payload.price > 0.0 {
            format!("₹{}", payload.price)
        } else {
            "-".to_string()
        }
    );
    if extraction.expanded > 0 {
        println!("  Expanded: {} control(s)", extraction.expanded);
    }
    println!("  Source:   {:?}", extraction.source);

    if payload.reviews.is_empty() {
        println!("\n  {}", "No reviews found on this page".yellow());
        return;
    }

    println!("\n  {} review(s):", payload.reviews.len());
    for (i, review) in payload.reviews.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, truncate_str(review, 100));
    }
    println!();
}

fn paint(text: &str, verdict: Verdict) -> ColoredString {
    match verdict {
        Verdict::Recommended => text.green().bold(),
        Verdict::Caution => text.yellow().bold(),
        Verdict::NotRecommended => text.red().bold(),
        Verdict::Unknown => text.normal(),
    }
}

pub(crate) fn print_result(view: &ResultView) {
    println!();
    if view.failed {
        println!("  {}", view.recommendation.red().bold());
        println!();
        return;
    }

    println!("  {}", paint(&view.recommendation, view.verdict));
    if !view.title.is_empty() {
        println!("  {}  {}", view.title.bold(), view.price);
    }
    println!();
    println!(
        "  Sentiment     {} positive, {} negative, {} neutral",
        view.positive.green(),
        view.negative.red(),
        view.neutral
    );
    println!("  Fake reviews  {}", view.fake_reviews);
    println!("  Value score   {}", view.value_score);
    if let (Some(rating), Some(stars)) = (&view.true_rating, &view.stars) {
        println!("  True rating   {} {}", rating, stars.render().yellow());
    }

    if !view.pros.is_empty() {
        println!("\n  {}", "Pros".green().bold());
        for pro in &view.pros {
            println!("    + {}", pro);
        }
    }
    if !view.cons.is_empty() {
        println!("\n  {}", "Cons".red().bold());
        for con in &view.cons {
            println!("    - {}", con);
        }
    }
    if let Some(summary) = &view.summary {
        println!("\n  {}", summary.dimmed());
    }
    println!();
}
