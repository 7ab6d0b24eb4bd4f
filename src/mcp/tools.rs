//! Tool names and their input schemas.

use serde_json::{Value, json};

use super::protocol::ToolDefinition;
use crate::constants::tool_defaults;

pub const GET_USER: &str = "get_user";
pub const GET_USER_LEAGUES: &str = "get_user_leagues";
pub const GET_LEAGUE: &str = "get_league";
pub const GET_LEAGUE_ROSTERS: &str = "get_league_rosters";
pub const GET_LEAGUE_USERS: &str = "get_league_users";
pub const GET_MATCHUPS: &str = "get_matchups";
pub const GET_USER_DRAFTS: &str = "get_user_drafts";
pub const GET_DRAFT_PICKS: &str = "get_draft_picks";
pub const GET_PLAYERS: &str = "get_players";
pub const GET_TRENDING_PLAYERS: &str = "get_trending_players";
pub const GET_WINNERS_BRACKET: &str = "get_winners_bracket";
pub const GET_LOSERS_BRACKET: &str = "get_losers_bracket";
pub const GET_PLAYOFF_RESULTS: &str = "get_playoff_results";

fn string_param(description: &str) -> Value {
    json!({"type": "string", "description": description})
}

fn sport_param() -> Value {
    json!({
        "type": "string",
        "description": "Sport identifier",
        "default": tool_defaults::SPORT
    })
}

fn season_param(default_season: &str) -> Value {
    json!({
        "type": "string",
        "description": "Season year, e.g. \"2024\"",
        "default": default_season
    })
}

fn enrich_param() -> Value {
    json!({
        "type": "boolean",
        "description": "Attach player names, positions and teams to player ids",
        "default": tool_defaults::ENRICH_PLAYERS
    })
}

fn schema(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

fn league_only_schema() -> Value {
    schema(
        json!({"league_id": string_param("Sleeper league id")}),
        &["league_id"],
    )
}

fn tool(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

/// Every tool the server exposes. `default_season` is advertised as the
/// season default for the tools that take one.
pub fn get_tool_definitions(default_season: &str) -> Vec<ToolDefinition> {
    vec![
        tool(
            GET_USER,
            "Look up a Sleeper user by username or user id",
            schema(
                json!({"username_or_id": string_param("Username or user id")}),
                &["username_or_id"],
            ),
        ),
        tool(
            GET_USER_LEAGUES,
            "List the leagues a user belongs to for a sport and season",
            schema(
                json!({
                    "user_id": string_param("Sleeper user id"),
                    "sport": sport_param(),
                    "season": season_param(default_season)
                }),
                &["user_id"],
            ),
        ),
        tool(GET_LEAGUE, "Get league settings and metadata", league_only_schema()),
        tool(
            GET_LEAGUE_ROSTERS,
            "Get all rosters in a league, optionally with player details",
            schema(
                json!({
                    "league_id": string_param("Sleeper league id"),
                    "enrich_players": enrich_param()
                }),
                &["league_id"],
            ),
        ),
        tool(
            GET_LEAGUE_USERS,
            "Get all users in a league",
            league_only_schema(),
        ),
        tool(
            GET_MATCHUPS,
            "Get matchups in a league for one week",
            schema(
                json!({
                    "league_id": string_param("Sleeper league id"),
                    "week": {"type": "integer", "minimum": 0, "description": "Week number"}
                }),
                &["league_id", "week"],
            ),
        ),
        tool(
            GET_USER_DRAFTS,
            "List a user's drafts for a sport and season",
            schema(
                json!({
                    "user_id": string_param("Sleeper user id"),
                    "sport": sport_param(),
                    "season": season_param(default_season)
                }),
                &["user_id"],
            ),
        ),
        tool(
            GET_DRAFT_PICKS,
            "Get every pick made in a draft",
            schema(
                json!({"draft_id": string_param("Sleeper draft id")}),
                &["draft_id"],
            ),
        ),
        tool(
            GET_PLAYERS,
            "Get the full player directory for a sport (large)",
            schema(json!({"sport": sport_param()}), &[]),
        ),
        tool(
            GET_TRENDING_PLAYERS,
            "Get players trending by adds or drops, optionally with player details",
            schema(
                json!({
                    "sport": sport_param(),
                    "trend_type": {
                        "type": "string",
                        "enum": ["add", "drop"],
                        "default": tool_defaults::TREND_TYPE
                    },
                    "enrich_players": enrich_param()
                }),
                &[],
            ),
        ),
        tool(
            GET_WINNERS_BRACKET,
            "Get the raw winners playoff bracket",
            league_only_schema(),
        ),
        tool(
            GET_LOSERS_BRACKET,
            "Get the raw losers playoff bracket",
            league_only_schema(),
        ),
        tool(
            GET_PLAYOFF_RESULTS,
            "Render both playoff brackets with team names and final standings",
            league_only_schema(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tool_names_unique() {
        let tools = get_tool_definitions("2024");
        let names: HashSet<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), tools.len());
        assert_eq!(tools.len(), 13);
        assert!(names.contains(GET_PLAYOFF_RESULTS));
    }

    #[test]
    fn test_schemas_are_objects() {
        for tool in get_tool_definitions("2024") {
            assert_eq!(tool.input_schema["type"], "object", "{}", tool.name);
            assert!(tool.input_schema["required"].is_array(), "{}", tool.name);
        }
    }

    #[test]
    fn test_season_default_advertised() {
        let tools = get_tool_definitions("2031");
        let leagues = tools.iter().find(|t| t.name == GET_USER_LEAGUES).unwrap();
        assert_eq!(
            leagues.input_schema["properties"]["season"]["default"],
            "2031"
        );
        assert_eq!(leagues.input_schema["required"], json!(["user_id"]));
    }
}
