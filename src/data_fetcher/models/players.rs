use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Player directory keyed by Sleeper player id.
pub type PlayerMap = HashMap<String, Player>;

/// A player record from the bulk players endpoint.
///
/// The provider's record is kept exactly as received, so serializing a
/// `Player` reproduces the original JSON, nulls included. The attributes used
/// for enrichment are read on demand: a missing, null or wrongly typed field
/// reads as absent instead of rejecting the record.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Player(Value);

impl Player {
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn first_name(&self) -> Option<&str> {
        self.text("first_name")
    }

    pub fn last_name(&self) -> Option<&str> {
        self.text("last_name")
    }

    pub fn position(&self) -> Option<&str> {
        self.text("position")
    }

    pub fn team(&self) -> Option<&str> {
        self.text("team")
    }

    pub fn status(&self) -> Option<&str> {
        self.text("status")
    }

    /// Eligible fantasy positions; non-string entries are skipped.
    pub fn fantasy_positions(&self) -> Vec<String> {
        self.0
            .get("fantasy_positions")
            .and_then(Value::as_array)
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// "First Last" with surrounding whitespace trimmed; empty when both are missing.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name().unwrap_or_default(),
            self.last_name().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

impl From<Value> for Player {
    fn from(record: Value) -> Self {
        Self(record)
    }
}

/// Splits a bulk players body into a directory. Returns `None` unless the
/// body is a JSON object keyed by player id.
pub fn parse_player_map(body: Value) -> Option<PlayerMap> {
    match body {
        Value::Object(records) => Some(
            records
                .into_iter()
                .map(|(id, record)| (id, Player::from(record)))
                .collect(),
        ),
        _ => None,
    }
}

/// Human-readable player attributes attached to roster and trending payloads.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EnrichedPlayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    pub name: String,
    pub position: String,
    pub team: String,
    pub status: String,
    pub fantasy_positions: Vec<String>,
}

impl EnrichedPlayer {
    pub const UNKNOWN_NAME: &'static str = "Unknown Player";
    pub const UNKNOWN_STATUS: &'static str = "Unknown";

    pub fn from_player(player_id: Option<&str>, player: &Player) -> Self {
        Self {
            player_id: player_id.map(str::to_string),
            name: player.display_name(),
            position: player.position().unwrap_or_default().to_string(),
            team: player.team().unwrap_or_default().to_string(),
            status: player.status().unwrap_or_default().to_string(),
            fantasy_positions: player.fantasy_positions(),
        }
    }

    /// Placeholder for ids missing from the directory. The id is preserved.
    pub fn unknown(player_id: Option<&str>) -> Self {
        Self {
            player_id: player_id.map(str::to_string),
            name: Self::UNKNOWN_NAME.to_string(),
            position: String::new(),
            team: String::new(),
            status: Self::UNKNOWN_STATUS.to_string(),
            fantasy_positions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_deserialization_keeps_unknown_fields() {
        let value = json!({
            "first_name": "Patrick",
            "last_name": "Mahomes",
            "position": "QB",
            "team": "KC",
            "status": "Active",
            "fantasy_positions": ["QB"],
            "age": 29,
            "college": "Texas Tech"
        });

        let player: Player = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(player.display_name(), "Patrick Mahomes");
        assert_eq!(player.as_value()["age"], json!(29));
        assert_eq!(serde_json::to_value(&player).unwrap(), value);
    }

    #[test]
    fn test_player_null_fields() {
        let player: Player = serde_json::from_value(json!({
            "first_name": "Free",
            "last_name": null,
            "team": null,
            "fantasy_positions": null
        }))
        .unwrap();

        assert_eq!(player.display_name(), "Free");
        let enriched = EnrichedPlayer::from_player(Some("42"), &player);
        assert_eq!(enriched.team, "");
        assert!(enriched.fantasy_positions.is_empty());
    }

    #[test]
    fn test_null_and_odd_typed_fields_round_trip_unchanged() {
        let record = json!({"first_name": "Patrick", "team": null, "status": 5});
        let player: Player = serde_json::from_value(record.clone()).unwrap();

        assert_eq!(player.team(), None);
        assert_eq!(player.status(), None);
        assert_eq!(serde_json::to_value(&player).unwrap(), record);
    }

    #[test]
    fn test_mixed_fantasy_positions_keep_strings() {
        let player = Player::from(json!({"fantasy_positions": ["WR", 3, null, "KR"]}));
        assert_eq!(player.fantasy_positions(), vec!["WR", "KR"]);
    }

    #[test]
    fn test_team_defense_display_name() {
        // Team defenses only carry a first/last split like "Kansas City" / "Chiefs"
        let player = Player::from(json!({"first_name": "Kansas City", "last_name": "Chiefs"}));
        assert_eq!(player.display_name(), "Kansas City Chiefs");
        assert_eq!(Player::default().display_name(), "");
    }

    #[test]
    fn test_parse_player_map() {
        let players = parse_player_map(json!({
            "4046": {"first_name": "Patrick", "last_name": "Mahomes"},
            "1": {"status": 5},
            "2": "not a record"
        }))
        .unwrap();
        assert_eq!(players.len(), 3);
        assert_eq!(players["4046"].display_name(), "Patrick Mahomes");
        assert_eq!(players["2"].display_name(), "");

        assert!(parse_player_map(json!(null)).is_none());
        assert!(parse_player_map(json!([])).is_none());
    }

    #[test]
    fn test_unknown_placeholder() {
        let unknown = EnrichedPlayer::unknown(Some("9999"));
        assert_eq!(unknown.player_id.as_deref(), Some("9999"));
        assert_eq!(unknown.name, "Unknown Player");
        assert_eq!(unknown.status, "Unknown");
        assert_eq!(unknown.position, "");
        assert_eq!(unknown.team, "");
        assert!(unknown.fantasy_positions.is_empty());
    }

    #[test]
    fn test_enriched_without_id_omits_field() {
        let info = EnrichedPlayer::unknown(None);
        let value = serde_json::to_value(&info).unwrap();
        assert!(value.get("player_id").is_none());
        assert_eq!(value["name"], "Unknown Player");
    }
}
