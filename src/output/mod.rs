//! Output module for crawl reports
//!
//! This module handles:
//! - Writing the two-tier crawl report (visited pages and their links)
//! - Collecting crawl statistics for logging

pub mod stats;

pub use stats::CrawlStatistics;

use std::io::{self, Write};
use url::Url;

/// Prefix that nests a discovered link under the page it was found on
pub const LINK_PREFIX: &str = "- ";

/// Writes the crawl report to an output sink
///
/// The report is plain text, one URL per line:
///
/// ```text
/// http://my-homepage.com/
/// - http://my-homepage.com/a
/// http://my-homepage.com/a
/// - http://my-homepage.com/
/// ```
///
/// A visited page is written as its URL; every link discovered on it follows
/// as `- <url>`. Nothing else is ever written to the sink.
#[derive(Debug)]
pub struct Report<W> {
    out: W,
}

impl<W: Write> Report<W> {
    /// Creates a report writing to `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Reports a visited page
    pub fn page(&mut self, url: &Url) -> io::Result<()> {
        writeln!(self.out, "{}", url)
    }

    /// Reports a link discovered on the most recently reported page
    pub fn link(&mut self, url: &Url) -> io::Result<()> {
        writeln!(self.out, "{}{}", LINK_PREFIX, url)
    }

    /// Flushes the underlying sink
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Returns the underlying sink
    pub fn into_inner(self) -> W {
        self.out
    }
}
