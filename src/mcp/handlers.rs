//! Tool argument parsing and dispatch onto [`SleeperService`].
//!
//! Argument problems are returned as errors so the caller can answer with an
//! invalid-params response. Failures while serving a valid call become a
//! [`ToolResult`] flagged `isError`.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::protocol::ToolResult;
use super::tools::*;
use crate::constants::tool_defaults;
use crate::data_fetcher::SleeperService;
use crate::error::AppError;

fn default_sport() -> String {
    tool_defaults::SPORT.to_string()
}

fn default_trend_type() -> String {
    tool_defaults::TREND_TYPE.to_string()
}

fn default_enrich() -> bool {
    tool_defaults::ENRICH_PLAYERS
}

#[derive(Debug, Deserialize)]
struct UserArgs {
    username_or_id: String,
}

#[derive(Debug, Deserialize)]
struct LeagueArgs {
    league_id: String,
}

#[derive(Debug, Deserialize)]
struct DraftArgs {
    draft_id: String,
}

#[derive(Debug, Deserialize)]
struct UserSeasonArgs {
    user_id: String,
    #[serde(default = "default_sport")]
    sport: String,
    season: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RostersArgs {
    league_id: String,
    #[serde(default = "default_enrich")]
    enrich_players: bool,
}

#[derive(Debug, Deserialize)]
struct MatchupsArgs {
    league_id: String,
    week: u32,
}

#[derive(Debug, Deserialize)]
struct PlayersArgs {
    #[serde(default = "default_sport")]
    sport: String,
}

#[derive(Debug, Deserialize)]
struct TrendingArgs {
    #[serde(default = "default_sport")]
    sport: String,
    #[serde(default = "default_trend_type")]
    trend_type: String,
    #[serde(default = "default_enrich")]
    enrich_players: bool,
}

/// Deserializes tool arguments; a missing or null argument object counts as empty.
fn parse_args<T: DeserializeOwned>(tool: &str, arguments: &Value) -> Result<T, AppError> {
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other.clone(),
    };
    serde_json::from_value(arguments)
        .map_err(|e| AppError::invalid_tool_arguments(tool, e.to_string()))
}

/// Error result for a valid call that could not be served. A missing
/// resource is an expected answer and is phrased as such.
fn failed(tool: &str, error: AppError) -> ToolResult {
    if error.is_not_found() {
        info!("Tool {tool} found nothing: {error}");
        return ToolResult::error(format!("Nothing found for {tool}: {error}"));
    }
    warn!("Tool {tool} failed: {error}");
    ToolResult::error(error.to_string())
}

fn into_tool_result<T: serde::Serialize>(
    tool: &str,
    outcome: Result<T, AppError>,
) -> Result<ToolResult, AppError> {
    match outcome {
        Ok(value) => ToolResult::json(&value),
        Err(e) => Ok(failed(tool, e)),
    }
}

pub struct ToolHandlers {
    service: Arc<SleeperService>,
}

impl ToolHandlers {
    pub fn new(service: Arc<SleeperService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &SleeperService {
        &self.service
    }

    fn season_or_default(&self, season: Option<String>) -> String {
        season.unwrap_or_else(|| self.service.default_season().to_string())
    }

    /// Runs one tool call.
    ///
    /// Returns `Err` for an unknown tool or unusable arguments only.
    pub async fn dispatch(&self, name: &str, arguments: &Value) -> Result<ToolResult, AppError> {
        debug!("Dispatching tool {name} with arguments {arguments}");
        let service = &self.service;

        match name {
            GET_USER => {
                let args: UserArgs = parse_args(name, arguments)?;
                into_tool_result(name, service.get_user(&args.username_or_id).await)
            }
            GET_USER_LEAGUES => {
                let args: UserSeasonArgs = parse_args(name, arguments)?;
                let season = self.season_or_default(args.season);
                into_tool_result(
                    name,
                    service
                        .get_user_leagues(&args.user_id, &args.sport, &season)
                        .await,
                )
            }
            GET_LEAGUE => {
                let args: LeagueArgs = parse_args(name, arguments)?;
                into_tool_result(name, service.get_league(&args.league_id).await)
            }
            GET_LEAGUE_ROSTERS => {
                let args: RostersArgs = parse_args(name, arguments)?;
                into_tool_result(
                    name,
                    service
                        .get_league_rosters(&args.league_id, args.enrich_players)
                        .await,
                )
            }
            GET_LEAGUE_USERS => {
                let args: LeagueArgs = parse_args(name, arguments)?;
                into_tool_result(name, service.get_league_users(&args.league_id).await)
            }
            GET_MATCHUPS => {
                let args: MatchupsArgs = parse_args(name, arguments)?;
                into_tool_result(
                    name,
                    service.get_matchups(&args.league_id, args.week).await,
                )
            }
            GET_USER_DRAFTS => {
                let args: UserSeasonArgs = parse_args(name, arguments)?;
                let season = self.season_or_default(args.season);
                into_tool_result(
                    name,
                    service
                        .get_user_drafts(&args.user_id, &args.sport, &season)
                        .await,
                )
            }
            GET_DRAFT_PICKS => {
                let args: DraftArgs = parse_args(name, arguments)?;
                into_tool_result(name, service.get_draft_picks(&args.draft_id).await)
            }
            GET_PLAYERS => {
                let args: PlayersArgs = parse_args(name, arguments)?;
                into_tool_result(name, service.get_players(&args.sport).await)
            }
            GET_TRENDING_PLAYERS => {
                let args: TrendingArgs = parse_args(name, arguments)?;
                into_tool_result(
                    name,
                    service
                        .get_trending_players(&args.sport, &args.trend_type, args.enrich_players)
                        .await,
                )
            }
            GET_WINNERS_BRACKET => {
                let args: LeagueArgs = parse_args(name, arguments)?;
                into_tool_result(name, service.get_winners_bracket(&args.league_id).await)
            }
            GET_LOSERS_BRACKET => {
                let args: LeagueArgs = parse_args(name, arguments)?;
                into_tool_result(name, service.get_losers_bracket(&args.league_id).await)
            }
            GET_PLAYOFF_RESULTS => {
                let args: LeagueArgs = parse_args(name, arguments)?;
                match service.get_playoff_results(&args.league_id).await {
                    Ok(text) => Ok(ToolResult::text(text)),
                    Err(e) => Ok(failed(name, e)),
                }
            }
            other => Err(AppError::UnknownTool(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::PlayerDirectory;
    use crate::testing_utils::FakeSleeperApi;
    use serde_json::json;
    use tempfile::TempDir;

    fn handlers(api: FakeSleeperApi) -> (ToolHandlers, Arc<FakeSleeperApi>, TempDir) {
        let dir = TempDir::new().unwrap();
        let api = Arc::new(api);
        let players = PlayerDirectory::with_default_ttl(api.clone(), dir.path().join("p.json"));
        let service = SleeperService::new(api.clone(), players, "2023".to_string());
        (ToolHandlers::new(Arc::new(service)), api, dir)
    }

    #[tokio::test]
    async fn test_defaults_applied() {
        let (handlers, api, _dir) = handlers(FakeSleeperApi::new());
        handlers
            .dispatch(GET_USER_LEAGUES, &json!({"user_id": "u1"}))
            .await
            .unwrap();
        handlers
            .dispatch(GET_USER_DRAFTS, &json!({"user_id": "u1", "sport": "nba", "season": "2022"}))
            .await
            .unwrap();
        assert_eq!(
            api.calls(),
            vec!["get_user_leagues:u1/nfl/2023", "get_user_drafts:u1/nba/2022"]
        );
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let (handlers, _api, _dir) = handlers(FakeSleeperApi::new());
        let err = handlers.dispatch(GET_LEAGUE, &json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToolArguments { .. }));
    }

    #[tokio::test]
    async fn test_week_must_be_integer() {
        let (handlers, _api, _dir) = handlers(FakeSleeperApi::new());
        let err = handlers
            .dispatch(GET_MATCHUPS, &json!({"league_id": "L1", "week": "three"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidToolArguments { .. }));
    }

    #[tokio::test]
    async fn test_null_arguments_use_defaults() {
        let (handlers, api, _dir) = handlers(FakeSleeperApi::with_sample_league());
        let result = handlers
            .dispatch(GET_TRENDING_PLAYERS, &Value::Null)
            .await
            .unwrap();
        assert!(!result.is_error);
        let trending: Vec<Value> = serde_json::from_str(result.first_text().unwrap()).unwrap();
        assert_eq!(trending[0]["player_info"]["name"], "Patrick Mahomes");
        assert_eq!(trending[1]["player_info"]["name"], "Unknown Player");
        assert!(api.calls().contains(&"get_trending_players:nfl/add".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let (handlers, _api, _dir) = handlers(FakeSleeperApi::new());
        let err = handlers.dispatch("get_weather", &json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::UnknownTool(name) if name == "get_weather"));
    }

    #[tokio::test]
    async fn test_service_failure_is_error_result() {
        let (handlers, _api, _dir) =
            handlers(FakeSleeperApi::with_sample_league().failing_winners_bracket());
        let result = handlers
            .dispatch(GET_PLAYOFF_RESULTS, &json!({"league_id": "L1"}))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(result.first_text().unwrap().contains("bracket unavailable"));
    }

    #[tokio::test]
    async fn test_missing_league_is_phrased_as_not_found() {
        let (handlers, _api, _dir) = handlers(FakeSleeperApi::new().missing_league());
        let result = handlers
            .dispatch(GET_LEAGUE, &json!({"league_id": "L404"}))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(
            result
                .first_text()
                .unwrap()
                .starts_with("Nothing found for get_league: ")
        );
    }

    #[tokio::test]
    async fn test_other_failures_keep_plain_message() {
        let (handlers, _api, _dir) = handlers(FakeSleeperApi::new().failing_players());
        let result = handlers
            .dispatch(GET_PLAYERS, &json!({"sport": "nba"}))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(!result.first_text().unwrap().starts_with("Nothing found"));
    }

    #[tokio::test]
    async fn test_null_body_is_passed_through() {
        let (handlers, _api, _dir) = handlers(FakeSleeperApi::new().with_losers_bracket(Value::Null));
        let result = handlers
            .dispatch(GET_LOSERS_BRACKET, &json!({"league_id": "L1"}))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(result.first_text(), Some("null"));
    }

    #[tokio::test]
    async fn test_players_tool_keeps_provider_json() {
        let body = json!({"1": {"first_name": "Faker", "team": null, "status": 5}});
        let (handlers, _api, _dir) = handlers(FakeSleeperApi::new().with_players(body.clone()));

        for sport in ["nfl", "lcs"] {
            let result = handlers
                .dispatch(GET_PLAYERS, &json!({"sport": sport}))
                .await
                .unwrap();
            assert!(!result.is_error);
            let returned: Value = serde_json::from_str(result.first_text().unwrap()).unwrap();
            assert_eq!(returned, body, "{sport}");
        }
    }

    #[tokio::test]
    async fn test_playoff_results_text() {
        let (handlers, _api, _dir) = handlers(FakeSleeperApi::with_sample_league());
        let result = handlers
            .dispatch(GET_PLAYOFF_RESULTS, &json!({"league_id": "L1"}))
            .await
            .unwrap();
        let text = result.first_text().unwrap();
        assert!(text.contains("🥇 1st Place: A"));
        assert!(text.contains("   4th Place: D"));
    }
}
