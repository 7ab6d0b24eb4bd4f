use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::bracket::RosterId;

/// The parts of a league member used to label rosters.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct LeagueUser {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl LeagueUser {
    /// Display name, then username, then "Unknown".
    pub fn label(&self) -> String {
        self.display_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("Unknown")
            .to_string()
    }
}

/// The parts of a roster used to link it to its owner.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct RosterOwnership {
    pub roster_id: RosterId,
    #[serde(default)]
    pub owner_id: Option<String>,
}

/// Parses each element on its own; entries missing required ids are skipped.
pub fn parse_users(values: &[Value]) -> Vec<LeagueUser> {
    parse_each(values, "league user")
}

pub fn parse_roster_ownership(values: &[Value]) -> Vec<RosterOwnership> {
    parse_each(values, "roster")
}

fn parse_each<T: serde::de::DeserializeOwned>(values: &[Value], kind: &str) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Skipping malformed {kind} entry: {e}");
                None
            }
        })
        .collect()
}
