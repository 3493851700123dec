//! Crawler module for single-domain, breadth-first crawling
//!
//! This module contains the core crawling logic, including:
//! - The visited-guarded queue of pages to visit
//! - HTML documents and same-domain link extraction
//! - Document fetching over HTTP
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod queue;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, is_parseable_content_type, DocumentFetcher, HttpFetcher};
pub use parser::{Document, LinkExtractor};
pub use queue::VisitQueue;

use crate::config::Config;
use crate::output::CrawlStatistics;
use crate::url::parse_seed_url;
use crate::CrawlError;
use std::io::Write;

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for crawling a live site. It will:
/// 1. Parse the seed as an absolute http(s) URL
/// 2. Build an HTTP fetcher from the configuration
/// 3. Confine the crawl to the seed's base domain
/// 4. Visit every reachable page once, writing the report to `out`
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The URL to start from; also the base domain
/// * `out` - Sink the crawl report is written to
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Crawl completed
/// * `Err(CrawlError)` - The seed was not a valid URL, the client could not
///   be built or the report could not be written
pub async fn crawl<W: Write>(
    config: &Config,
    seed: &str,
    out: W,
) -> Result<CrawlStatistics, CrawlError> {
    let seed = parse_seed_url(seed)?;
    let fetcher = HttpFetcher::new(&config.fetcher)?;
    Crawler::for_seed(fetcher, seed, out).crawl().await
}
