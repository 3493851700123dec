//! Visited-guarded work queue for the crawl frontier
//!
//! The queue hands out URLs in discovery order and remembers every URL it
//! has ever been offered, so a URL is enqueued at most once over the
//! lifetime of a crawl even after it has been dequeued.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO queue of URLs awaiting a visit, guarded by a visited set
///
/// Membership is keyed on the serialized URL, so two URLs are the same entry
/// iff their string forms are identical. The visited set only ever grows.
#[derive(Debug, Default)]
pub struct VisitQueue {
    /// URLs discovered but not yet processed, in discovery order
    pending: VecDeque<Url>,

    /// String forms of every URL ever offered
    visited: HashSet<String>,
}

impl VisitQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a URL to the queue
    ///
    /// If the URL has been offered before (whether or not it is still
    /// pending) this is a no-op. Otherwise the URL is recorded as visited and
    /// appended to the back of the queue.
    ///
    /// # Returns
    ///
    /// `true` if the URL was enqueued, `false` if it had already been seen
    pub fn offer(&mut self, url: Url) -> bool {
        if self.visited.contains(url.as_str()) {
            return false;
        }

        self.visited.insert(url.as_str().to_string());
        self.pending.push_back(url);
        true
    }

    /// Removes and returns the earliest-offered URL still pending
    ///
    /// # Returns
    ///
    /// * `Some(Url)` - The next URL to visit
    /// * `None` - Nothing is pending
    pub fn poll(&mut self) -> Option<Url> {
        self.pending.pop_front()
    }

    /// Returns true if no URL is pending
    ///
    /// This says nothing about how many URLs have been visited.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of URLs still pending
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Number of distinct URLs ever offered
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
