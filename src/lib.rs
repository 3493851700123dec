//! Webcrawl: a breadth-first, single-domain web crawler
//!
//! This crate walks every page reachable from a seed URL without leaving the
//! seed's base domain, visiting each distinct URL at most once and reporting
//! every visited page together with the same-domain links found on it.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unsupported content type '{content_type}' for {url}")]
    ContentMismatch { url: String, content_type: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{input}': {source}")]
    Parse {
        input: String,
        source: ::url::ParseError,
    },

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, Document, DocumentFetcher, HttpFetcher, LinkExtractor, VisitQueue};
pub use output::{CrawlStatistics, Report};
pub use crate::url::{parse_seed_url, BaseDomain};
