use crate::config::types::{Config, FetchConfig};
use crate::ConfigError;

/// Longest accepted request timeout (seconds)
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    // Parser flags are plain booleans, nothing to check
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.max_body_size == 0 {
        return Err(ConfigError::Validation(
            "max_body_size must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
