use crate::constants::player_cache;
use crate::error::AppError;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API base URL cannot be empty and must use http:// or https://
/// - HTTP timeout and cache TTL must be positive
/// - Cache TTL cannot exceed one year
/// - Optional paths, when present, cannot be empty
/// - Default season cannot be empty
pub fn validate_config(
    api_base_url: &str,
    http_timeout_seconds: u64,
    player_cache_ttl_hours: u64,
    default_season: &str,
    optional_paths: &[(&str, &Option<String>)],
) -> Result<(), AppError> {
    if api_base_url.trim().is_empty() {
        return Err(AppError::config_error("API base URL cannot be empty"));
    }

    if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
        return Err(AppError::config_error(
            "API base URL must start with http:// or https://",
        ));
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least one second",
        ));
    }

    if player_cache_ttl_hours == 0 {
        return Err(AppError::config_error(
            "Player cache TTL must be at least one hour",
        ));
    }

    if player_cache_ttl_hours > player_cache::MAX_TTL_HOURS {
        return Err(AppError::config_error(format!(
            "Player cache TTL cannot exceed {} hours",
            player_cache::MAX_TTL_HOURS
        )));
    }

    if default_season.trim().is_empty() {
        return Err(AppError::config_error("Default season cannot be empty"));
    }

    for (name, path) in optional_paths {
        if let Some(path) = path
            && path.trim().is_empty()
        {
            return Err(AppError::config_error(format!("{name} cannot be empty")));
        }
    }

    Ok(())
}
