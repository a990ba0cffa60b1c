use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Page sizes are non-zero and the default fits under the maximum
/// - Fuzzy pattern cache can hold at least one entry
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let query = &config.query;
    if query.max_size == 0 {
        return Err(ConfigError::ValidationError(
            "query.max_size cannot be 0".to_string(),
        ));
    }

    if query.default_size == 0 || query.default_size > query.max_size {
        return Err(ConfigError::ValidationError(format!(
            "query.default_size must be between 1 and {}",
            query.max_size
        )));
    }

    if query.pattern_cache_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "query.pattern_cache_capacity cannot be 0".to_string(),
        ));
    }

    Ok(())
}
