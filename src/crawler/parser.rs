//! HTML documents and same-domain link extraction
//!
//! This module handles:
//! - Wrapping parsed HTML together with the location it was fetched from
//! - Resolving every `<a href>` against that location
//! - Keeping only links on the crawl's base domain, deduplicated, in
//!   document order

use crate::url::{resolve_href, BaseDomain};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Selector for hyperlink-bearing elements
const ANCHOR_SELECTOR: &str = "a[href]";

/// A parsed HTML page and the URL it lives at
///
/// The URL is the base every relative link in the page resolves against.
#[derive(Debug, Clone)]
pub struct Document {
    url: Url,
    html: Html,
}

impl Document {
    /// Parses `body` as a full HTML document located at `url`
    ///
    /// HTML parsing is error-tolerant, so this never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use url::Url;
    /// use webcrawl::crawler::Document;
    ///
    /// let url = Url::parse("https://example.com/").unwrap();
    /// let document = Document::parse(url, r#"<a href="/about">About</a>"#);
    /// assert_eq!(document.url().as_str(), "https://example.com/");
    /// ```
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    /// The location of this document
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The parsed HTML tree
    pub fn html(&self) -> &Html {
        &self.html
    }
}

/// Extracts the links of a page that stay on a fixed base domain
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    base_domain: BaseDomain,
}

impl LinkExtractor {
    /// Creates an extractor for the given base domain
    pub fn new(base_domain: BaseDomain) -> Self {
        Self { base_domain }
    }

    /// The base domain links are filtered to
    pub fn base_domain(&self) -> &BaseDomain {
        &self.base_domain
    }

    /// Scrapes a document for links on the base domain
    ///
    /// Relative links resolve against the document's own URL.
    ///
    /// # Returns
    ///
    /// The absolute, deduplicated links in order of first appearance
    pub fn scrape_for_links(&self, document: &Document) -> Vec<Url> {
        self.scrape_html_for_links(document.html(), document.url())
    }

    /// Scrapes parsed HTML for links on the base domain
    ///
    /// # Link Rules
    ///
    /// - Only `<a href="...">` elements are considered
    /// - Each href is resolved against `page_url`
    /// - Hrefs that fail to resolve are logged and skipped
    /// - A link is kept iff its string form starts with the base domain's
    /// - Repeated links keep only their first occurrence
    ///
    /// # Arguments
    ///
    /// * `html` - The parsed page
    /// * `page_url` - The URL the page was fetched from
    ///
    /// # Example
    ///
    /// ```
    /// use scraper::Html;
    /// use url::Url;
    /// use webcrawl::crawler::LinkExtractor;
    /// use webcrawl::url::BaseDomain;
    ///
    /// let base = BaseDomain::new(Url::parse("http://my-domain.com").unwrap());
    /// let extractor = LinkExtractor::new(base);
    ///
    /// let html = Html::parse_document(
    ///     r#"<a href="/x"></a><a href="/x"></a><a href="http://other-domain.com/x"></a>"#,
    /// );
    /// let page = Url::parse("http://my-domain.com/").unwrap();
    /// let links = extractor.scrape_html_for_links(&html, &page);
    ///
    /// assert_eq!(links.len(), 1);
    /// assert_eq!(links[0].as_str(), "http://my-domain.com/x");
    /// ```
    pub fn scrape_html_for_links(&self, html: &Html, page_url: &Url) -> Vec<Url> {
        let Ok(selector) = Selector::parse(ANCHOR_SELECTOR) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for element in html.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let resolved = match resolve_href(page_url, href) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(
                        "Unhandled url '{}' on page {}, this is most likely an issue within the HTML: {}",
                        href,
                        page_url,
                        e
                    );
                    continue;
                }
            };

            if !self.base_domain.contains(&resolved) {
                tracing::trace!("Skipping off-domain link {}", resolved);
                continue;
            }

            if seen.insert(resolved.as_str().to_string()) {
                links.push(resolved);
            }
        }

        links
    }
}
