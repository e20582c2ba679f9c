// src/main.rs

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use url::Url;

use eventcrawler::{CrawlConfig, Crawler, Lexicon, Scraper};

#[derive(Parser)]
#[command(name = "eventcrawler", about = "Find pages built like a known event page")]
struct Cli {
    /// Absolute URL of a known event page
    seed: String,

    /// Number of similar pages to look for
    #[arg(short = 'n', long, default_value_t = 10)]
    quota: usize,

    /// Seconds before a single fetch is given up on
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// Print matches with their scores as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Progress goes to stderr so stdout carries only the results.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let seed = Url::parse(&cli.seed).with_context(|| format!("invalid seed URL {}", cli.seed))?;

    let config = CrawlConfig {
        quota: cli.quota,
        fetch_timeout: Duration::from_secs(cli.timeout),
        ..CrawlConfig::default()
    };
    let lexicon = Lexicon::default();
    let fetcher = Scraper::new().context("failed to build HTTP client")?;

    let crawler = Crawler::new(Arc::new(fetcher), &lexicon, config);
    let mut matches = crawler
        .crawl(&seed)
        .await
        .with_context(|| format!("crawl from {} failed", seed))?;
    matches.truncate(cli.quota);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for m in &matches {
            println!("{}", m.url);
        }
    }
    Ok(())
}
