use serde::Deserialize;

/// Default `User-Agent` header sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("webcrawl/", env!("CARGO_PKG_VERSION"));

/// Main configuration structure for webcrawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

/// HTTP fetching configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Value of the `User-Agent` header
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Overall request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,

    /// Maximum number of redirects followed for a single page
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}
