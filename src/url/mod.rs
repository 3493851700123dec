//! URL handling module for webcrawl
//!
//! This module provides seed URL parsing, relative link resolution and the
//! base-domain filter that keeps a crawl on a single site.

mod base_domain;
mod seed;

pub use base_domain::BaseDomain;
pub use seed::parse_seed_url;

use url::{ParseError, Url};

/// Resolves an `href` attribute against the URL of the page it appears on
///
/// Resolution follows the WHATWG URL standard:
/// - `.` and `..` segments collapse against the page's path (`..` never
///   climbs above the root)
/// - root-absolute hrefs (`/x`) replace the whole path
/// - scheme-absolute hrefs are used verbatim
/// - an empty href resolves to the page itself, a fragment-only href to the
///   page plus that fragment
///
/// # Examples
///
/// ```
/// use url::Url;
/// use webcrawl::url::resolve_href;
///
/// let page = Url::parse("http://my-domain.com/sub-a/sub-b/").unwrap();
/// assert_eq!(resolve_href(&page, "../x").unwrap().as_str(), "http://my-domain.com/sub-a/x");
/// assert_eq!(resolve_href(&page, "./x").unwrap().as_str(), "http://my-domain.com/sub-a/sub-b/x");
/// assert_eq!(resolve_href(&page, "/x").unwrap().as_str(), "http://my-domain.com/x");
/// ```
pub fn resolve_href(page: &Url, href: &str) -> Result<Url, ParseError> {
    page.join(href)
}
