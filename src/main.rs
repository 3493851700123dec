//! Webcrawl main entry point
//!
//! This is the command-line interface for the webcrawl single-domain crawler.

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use url::Url;
use webcrawl::config::load_config_or_default;
use webcrawl::crawler::{Crawler, HttpFetcher};
use webcrawl::url::parse_seed_url;

const PROMPT: &str =
    "Please enter the full URL that you want to crawl (e.g. https://monzo.com) or q to quit";

const INVALID_URL_MESSAGE: &str = "The provided URL was not valid, please be sure to provide the full path including the protocol (http://monzo.com instead of monzo.com)";

const QUIT_COMMAND: &str = "q";

/// Webcrawl: a single-domain web crawler
///
/// Visits every page reachable from a seed URL without leaving the seed's
/// base domain, printing each visited page followed by the same-domain
/// links found on it.
#[derive(Parser, Debug)]
#[command(name = "webcrawl")]
#[command(version)]
#[command(about = "A single-domain, breadth-first web crawler", long_about = None)]
struct Cli {
    /// URL to crawl once before exiting; prompts on stdin when omitted
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to build default configuration".to_string(),
        }
    })?;
    tracing::debug!("Configuration: {:?}", config);

    let fetcher = HttpFetcher::new(&config.fetcher).context("Failed to build HTTP client")?;

    match cli.seed {
        Some(seed) => handle_single(&fetcher, &seed).await,
        None => handle_interactive(&fetcher).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the crawl report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webcrawl=info,warn"),
            1 => EnvFilter::new("webcrawl=debug,info"),
            2 => EnvFilter::new("webcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles a seed given on the command line: one crawl, then exit
async fn handle_single(fetcher: &HttpFetcher, input: &str) -> anyhow::Result<()> {
    let seed = match parse_seed_url(input) {
        Ok(seed) => seed,
        Err(e) => {
            println!("{}", INVALID_URL_MESSAGE);
            return Err(e).context("Invalid seed URL");
        }
    };

    crawl_to_stdout(fetcher, seed).await
}

/// Handles the interactive mode: one crawl per line of stdin until `q`
async fn handle_interactive(fetcher: &HttpFetcher) -> anyhow::Result<()> {
    println!("{}", PROMPT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        let value = line.trim();
        if value == QUIT_COMMAND {
            return Ok(());
        }

        match parse_seed_url(value) {
            Ok(seed) => {
                // A failed crawl ends that crawl only; keep reading input
                if let Err(e) = crawl_to_stdout(fetcher, seed).await {
                    tracing::error!("{:#}", e);
                }
            }
            Err(e) => {
                tracing::debug!("Rejected input '{}': {}", value, e);
                println!("{}", INVALID_URL_MESSAGE);
            }
        }
    }

    tracing::debug!("stdin closed, exiting");
    Ok(())
}

/// Runs one crawl from `seed`, writing the report to stdout
async fn crawl_to_stdout(fetcher: &HttpFetcher, seed: Url) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let stats = Crawler::for_seed(fetcher.clone(), seed.clone(), &mut out)
        .crawl()
        .await
        .with_context(|| format!("Crawl of {} failed", seed))?;
    out.flush().context("Failed to flush stdout")?;

    tracing::debug!(
        "Crawled {} pages from {} ({:.2} pages/sec)",
        stats.pages_visited,
        seed,
        stats.pages_per_second()
    );

    Ok(())
}
