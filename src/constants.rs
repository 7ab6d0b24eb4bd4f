//! Application-wide constants and configuration values
//!
//! Defaults for the provider endpoint, tool parameters and the player
//! directory cache live here so configuration and tool handling agree.

/// Base URL of the Sleeper public API
pub const DEFAULT_API_BASE_URL: &str = "https://api.sleeper.app/v1";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host kept in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// File name of the daily-rolling log when no custom path is configured
pub const DEFAULT_LOG_FILE_NAME: &str = "sleeper_mcp.log";

/// Player directory cache settings
pub mod player_cache {
    /// File name of the persisted player snapshot
    pub const FILE_NAME: &str = "sleeper_players_cache.json";

    /// Snapshot validity window in hours, measured from file modification time
    pub const TTL_HOURS: u64 = 24;

    /// Longest accepted snapshot lifetime (one year)
    pub const MAX_TTL_HOURS: u64 = 24 * 365;

    /// Sport whose player list backs enrichment
    pub const SPORT: &str = "nfl";
}

/// Defaults applied when a tool call omits an optional parameter
pub mod tool_defaults {
    pub const SPORT: &str = "nfl";
    pub const SEASON: &str = "2024";
    pub const TREND_TYPE: &str = "add";
    pub const ENRICH_PLAYERS: bool = true;
}

/// Environment variable names
pub mod env_vars {
    /// Override for the API base URL
    pub const API_BASE_URL: &str = "SLEEPER_API_BASE_URL";

    /// Override for the log file path
    pub const LOG_FILE: &str = "SLEEPER_LOG_FILE";

    /// Override for the HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "SLEEPER_HTTP_TIMEOUT";

    /// Override for the player cache file path
    pub const PLAYER_CACHE: &str = "SLEEPER_PLAYER_CACHE";

    /// Override for the season used when a tool call omits one
    pub const DEFAULT_SEASON: &str = "SLEEPER_DEFAULT_SEASON";
}

/// Model Context Protocol identifiers
pub mod mcp {
    pub const PROTOCOL_VERSION: &str = "2024-11-05";
    pub const SERVER_NAME: &str = "Sleeper API";
}
