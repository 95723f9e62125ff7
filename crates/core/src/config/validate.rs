use reqwest::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Every endpoint is an absolute http(s) URL
/// - HTTP timeout, when set, is not 0
/// - Logging filter is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_endpoint("endpoints.orders_url", &config.endpoints.orders_url)?;
    validate_endpoint("endpoints.alert_url", &config.endpoints.alert_url)?;
    validate_endpoint("endpoints.update_url", &config.endpoints.update_url)?;

    if config.http.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "http.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "logging.filter cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_endpoint(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::ValidationError(format!("{} is not a valid URL: {}", field, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::ValidationError(format!(
            "{} must use http or https, got '{}'",
            field, other
        ))),
    }
}
