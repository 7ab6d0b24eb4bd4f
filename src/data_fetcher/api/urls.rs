//! URL building utilities for API endpoints
//!
//! One builder per Sleeper path template. `base_url` is the API root
//! without a trailing slash (e.g. `https://api.sleeper.app/v1`).

/// Builds the user lookup URL. Accepts either a username or a user id.
///
/// # Example
/// ```
/// use sleeper_mcp::data_fetcher::api::build_user_url;
///
/// let url = build_user_url("https://api.sleeper.app/v1", "sleeperuser");
/// assert_eq!(url, "https://api.sleeper.app/v1/user/sleeperuser");
/// ```
pub fn build_user_url(base_url: &str, username_or_id: &str) -> String {
    format!("{base_url}/user/{username_or_id}")
}

/// Builds the URL listing a user's leagues for a sport and season.
///
/// # Example
/// ```
/// use sleeper_mcp::data_fetcher::api::build_user_leagues_url;
///
/// let url = build_user_leagues_url("https://api.sleeper.app/v1", "123", "nfl", "2024");
/// assert_eq!(url, "https://api.sleeper.app/v1/user/123/leagues/nfl/2024");
/// ```
pub fn build_user_leagues_url(base_url: &str, user_id: &str, sport: &str, season: &str) -> String {
    format!("{base_url}/user/{user_id}/leagues/{sport}/{season}")
}

pub fn build_league_url(base_url: &str, league_id: &str) -> String {
    format!("{base_url}/league/{league_id}")
}

pub fn build_league_rosters_url(base_url: &str, league_id: &str) -> String {
    format!("{base_url}/league/{league_id}/rosters")
}

pub fn build_league_users_url(base_url: &str, league_id: &str) -> String {
    format!("{base_url}/league/{league_id}/users")
}

/// Builds the URL for one week of league matchups.
///
/// # Example
/// ```
/// use sleeper_mcp::data_fetcher::api::build_matchups_url;
///
/// let url = build_matchups_url("https://api.sleeper.app/v1", "42", 7);
/// assert_eq!(url, "https://api.sleeper.app/v1/league/42/matchups/7");
/// ```
pub fn build_matchups_url(base_url: &str, league_id: &str, week: u32) -> String {
    format!("{base_url}/league/{league_id}/matchups/{week}")
}

pub fn build_user_drafts_url(base_url: &str, user_id: &str, sport: &str, season: &str) -> String {
    format!("{base_url}/user/{user_id}/drafts/{sport}/{season}")
}

pub fn build_draft_picks_url(base_url: &str, draft_id: &str) -> String {
    format!("{base_url}/draft/{draft_id}/picks")
}

pub fn build_players_url(base_url: &str, sport: &str) -> String {
    format!("{base_url}/players/{sport}")
}

/// Builds the trending players URL; `trend_type` is `add` or `drop`.
///
/// # Example
/// ```
/// use sleeper_mcp::data_fetcher::api::build_trending_players_url;
///
/// let url = build_trending_players_url("https://api.sleeper.app/v1", "nfl", "drop");
/// assert_eq!(url, "https://api.sleeper.app/v1/players/nfl/trending/drop");
/// ```
pub fn build_trending_players_url(base_url: &str, sport: &str, trend_type: &str) -> String {
    format!("{base_url}/players/{sport}/trending/{trend_type}")
}

pub fn build_winners_bracket_url(base_url: &str, league_id: &str) -> String {
    format!("{base_url}/league/{league_id}/winners_bracket")
}

pub fn build_losers_bracket_url(base_url: &str, league_id: &str) -> String {
    format!("{base_url}/league/{league_id}/losers_bracket")
}
