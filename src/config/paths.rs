use std::path::Path;

use crate::constants::player_cache;

const APP_DIR: &str = "sleeper_mcp";

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR)
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR)
        .join("logs")
        .to_string_lossy()
        .to_string()
}

/// Returns the default location of the persisted player directory snapshot.
///
/// Uses the platform cache directory (e.g., ~/.cache on Linux) and falls back
/// to the current directory.
pub fn get_player_cache_path() -> String {
    dirs::cache_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR)
        .join(player_cache::FILE_NAME)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_scoped_to_app_dir() {
        assert!(get_config_path().ends_with("config.toml"));
        assert!(get_config_path().contains(APP_DIR));
        assert!(get_log_dir_path().ends_with("logs"));
        assert!(get_player_cache_path().ends_with(player_cache::FILE_NAME));
    }
}
