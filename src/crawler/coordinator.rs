//! Crawl driver - breadth-first traversal of a single base domain
//!
//! This module contains the main crawl loop, which:
//! - Seeds a fresh visit queue with the start URL
//! - Dequeues pages in discovery order and reports each one
//! - Fetches each page through the injected [`DocumentFetcher`]
//! - Reports and enqueues the same-domain links found on it
//!
//! The loop ends when the queue is empty. There is no depth bound, so the
//! crawl covers every reachable page on the base domain.

use crate::crawler::fetcher::DocumentFetcher;
use crate::crawler::parser::LinkExtractor;
use crate::crawler::queue::VisitQueue;
use crate::output::{CrawlStatistics, Report};
use crate::url::BaseDomain;
use crate::CrawlError;
use std::io::Write;
use std::time::Instant;
use url::Url;

/// Main crawl driver
pub struct Crawler<F, W> {
    extractor: LinkExtractor,
    fetcher: F,
    seed: Url,
    report: Report<W>,
}

impl<F, W> Crawler<F, W>
where
    F: DocumentFetcher,
    W: Write,
{
    /// Creates a new crawler
    ///
    /// # Arguments
    ///
    /// * `extractor` - Link extractor bound to the crawl's base domain
    /// * `fetcher` - Source of documents for visited pages
    /// * `seed` - The first URL to visit
    /// * `out` - Sink the crawl report is written to
    pub fn new(extractor: LinkExtractor, fetcher: F, seed: Url, out: W) -> Self {
        Self {
            extractor,
            fetcher,
            seed,
            report: Report::new(out),
        }
    }

    /// Creates a crawler whose base domain is the seed URL itself
    pub fn for_seed(fetcher: F, seed: Url, out: W) -> Self {
        let extractor = LinkExtractor::new(BaseDomain::new(seed.clone()));
        Self::new(extractor, fetcher, seed, out)
    }

    /// The URL the crawl starts from
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// The base domain discovered links are confined to
    pub fn base_domain(&self) -> &BaseDomain {
        self.extractor.base_domain()
    }

    /// Runs the crawl to completion
    ///
    /// Every page is reported as one line before it is fetched. If its
    /// document is unavailable the page is skipped; otherwise each
    /// same-domain link on it is reported as `- <url>` and offered to the
    /// queue. A fresh queue is used for every call.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStatistics)` - The crawl ran until the queue was empty
    /// * `Err(CrawlError)` - Writing the report failed
    ///
    /// # Example
    ///
    /// ```
    /// use url::Url;
    /// use webcrawl::crawler::{Crawler, Document};
    ///
    /// fn site(url: &Url) -> Option<Document> {
    ///     match url.as_str() {
    ///         "http://my-homepage.com/" => Some(Document::parse(url.clone(), r#"<a href="/a">a</a>"#)),
    ///         _ => None,
    ///     }
    /// }
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let seed = Url::parse("http://my-homepage.com").unwrap();
    /// let mut out = Vec::new();
    /// let stats = Crawler::for_seed(site, seed, &mut out).crawl().await.unwrap();
    ///
    /// assert_eq!(stats.pages_visited, 2);
    /// assert_eq!(
    ///     String::from_utf8(out).unwrap(),
    ///     "http://my-homepage.com/\n- http://my-homepage.com/a\nhttp://my-homepage.com/a\n"
    /// );
    /// # }
    /// ```
    pub async fn crawl(&mut self) -> Result<CrawlStatistics, CrawlError> {
        tracing::info!(
            "Starting crawl from {} (base domain {})",
            self.seed,
            self.extractor.base_domain()
        );

        let start_time = Instant::now();
        let mut stats = CrawlStatistics::default();
        let mut queue = VisitQueue::new();
        queue.offer(self.seed.clone());

        while let Some(url) = queue.poll() {
            self.report.page(&url)?;
            stats.pages_visited += 1;

            let Some(document) = self.fetcher.fetch_document(&url).await else {
                tracing::debug!("No document for {}, skipping", url);
                stats.pages_unavailable += 1;
                continue;
            };

            let links = self.extractor.scrape_for_links(&document);
            tracing::debug!("Found {} links on {}", links.len(), url);

            for link in links {
                self.report.link(&link)?;
                stats.links_reported += 1;

                if queue.offer(link) {
                    stats.links_enqueued += 1;
                }
            }

            tracing::trace!(
                "{} pages pending, {} urls seen",
                queue.len(),
                queue.visited_count()
            );
        }

        self.report.flush()?;
        stats.elapsed = start_time.elapsed();

        tracing::info!("Crawl of {} completed: {}", self.seed, stats);

        Ok(stats)
    }
}
