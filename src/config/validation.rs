use crate::config::types::{Config, FetcherConfig};
use crate::ConfigError;

/// Upper bound for `timeout-secs`
const MAX_TIMEOUT_SECS: u64 = 300;

/// Upper bound for `max-redirects`
const MAX_REDIRECTS: usize = 20;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    validate_user_agent(&config.user_agent)?;

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and timeout_secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_redirects > MAX_REDIRECTS {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= {}, got {}",
            MAX_REDIRECTS, config.max_redirects
        )));
    }

    Ok(())
}

/// Validates the `User-Agent` value: non-empty, no control characters
fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if user_agent.chars().any(char::is_control) {
        return Err(ConfigError::Validation(format!(
            "user_agent must not contain control characters, got {:?}",
            user_agent
        )));
    }

    Ok(())
}
