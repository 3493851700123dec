//! Statistics gathered while a crawl runs

use std::fmt;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages dequeued and reported
    pub pages_visited: u64,

    /// Visited pages whose document was unavailable
    pub pages_unavailable: u64,

    /// Link lines reported across all pages
    pub links_reported: u64,

    /// Links that were new to the queue when reported
    pub links_enqueued: u64,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Pages whose document was fetched and scraped
    pub fn pages_expanded(&self) -> u64 {
        self.pages_visited.saturating_sub(self.pages_unavailable)
    }

    /// Pages visited per second, or 0 for an instantaneous crawl
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.pages_visited as f64 / secs
        } else {
            0.0
        }
    }
}

impl fmt::Display for CrawlStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages visited ({} expanded, {} unavailable), {} links reported, {} new, in {:?}",
            self.pages_visited,
            self.pages_expanded(),
            self.pages_unavailable,
            self.links_reported,
            self.links_enqueued,
            self.elapsed
        )
    }
}
