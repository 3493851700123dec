//! Document fetching
//!
//! This module handles turning a URL into a parsed [`Document`]:
//! - The [`DocumentFetcher`] capability the crawl driver depends on
//! - Building HTTP clients from the fetcher configuration
//! - The real HTTP implementation, [`HttpFetcher`]
//! - Error classification (status, content type, transport)

use crate::config::FetcherConfig;
use crate::crawler::parser::Document;
use crate::CrawlError;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Capability that produces the document at a URL
///
/// `None` means the document is unavailable (network failure, error status,
/// non-HTML content, ...). An unavailable document is never fatal to a
/// crawl; the page is simply not expanded.
///
/// Any `Fn(&Url) -> Option<Document>` is a fetcher, which makes fixed
/// fixture sites easy to express.
pub trait DocumentFetcher {
    /// Fetches and parses the document at `url`
    fn fetch_document(&self, url: &Url) -> impl Future<Output = Option<Document>>;
}

impl<F> DocumentFetcher for F
where
    F: Fn(&Url) -> Option<Document>,
{
    fn fetch_document(&self, url: &Url) -> impl Future<Output = Option<Document>> {
        std::future::ready(self(url))
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use webcrawl::config::FetcherConfig;
/// use webcrawl::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true if a `Content-Type` value can be parsed as a web page
///
/// Accepts `text/*`, `application/xml` and `application/*+xml`, ignoring
/// parameters such as `charset`.
pub fn is_parseable_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.starts_with("text/")
        || mime == "application/xml"
        || (mime.starts_with("application/") && mime.ends_with("+xml"))
}

/// Fetches documents over HTTP
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &FetcherConfig) -> Result<Self, CrawlError> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches a page body
    ///
    /// # Request Flow
    ///
    /// 1. `GET` the URL, following redirects up to the client's limit
    /// 2. Reject non-success statuses
    /// 3. Reject content types that are not parseable markup; a missing
    ///    `Content-Type` is accepted
    /// 4. Read the body
    ///
    /// # Returns
    ///
    /// * `Ok((Url, String))` - The final URL after redirects and the body
    /// * `Err(CrawlError)` - Why the page is unavailable
    pub async fn fetch_page(&self, url: &Url) -> Result<(Url, String), CrawlError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| CrawlError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
            let content_type = content_type.to_str().unwrap_or_default();
            if !is_parseable_content_type(content_type) {
                return Err(CrawlError::ContentMismatch {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|source| CrawlError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok((final_url, body))
    }
}

impl DocumentFetcher for HttpFetcher {
    async fn fetch_document(&self, url: &Url) -> Option<Document> {
        match self.fetch_page(url).await {
            Ok((final_url, body)) => {
                if final_url != *url {
                    tracing::debug!("{} redirected to {}", url, final_url);
                }
                Some(Document::parse(final_url, &body))
            }
            Err(e) => {
                tracing::warn!("Unable to fetch document {}: {}", url, e);
                None
            }
        }
    }
}
