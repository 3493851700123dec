//! Configuration module for webcrawl
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so a crawl can always run
//! without one.
//!
//! # Example
//!
//! ```no_run
//! use webcrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("webcrawl.toml")).unwrap();
//! println!("Requests time out after {}s", config.fetcher.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
