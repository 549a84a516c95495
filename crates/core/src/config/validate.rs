use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Cinemeta base URL is set and the timeout is positive
/// - Selection thresholds are finite, ratio positive, delta non-negative
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Cinemeta validation
    if config.cinemeta.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "cinemeta.base_url cannot be empty".to_string(),
        ));
    }
    if config.cinemeta.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "cinemeta.timeout_secs must be greater than 0".to_string(),
        ));
    }

    // Selection validation
    let selection = &config.selection;
    if !selection.ratio_need.is_finite() || selection.ratio_need <= 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "selection.ratio_need must be a positive number, got {}",
            selection.ratio_need
        )));
    }
    if !selection.delta_need.is_finite() || selection.delta_need < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "selection.delta_need must be a non-negative number, got {}",
            selection.delta_need
        )));
    }

    Ok(())
}
