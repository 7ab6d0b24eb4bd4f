//! Player enrichment for roster and trending payloads
//!
//! Rosters and trending entries carry bare player ids. These helpers attach
//! readable attributes from the player directory while leaving the rest of
//! each payload untouched.

use serde_json::{Value, json};
use tracing::debug;

use crate::data_fetcher::models::{EnrichedPlayer, PlayerMap};

/// Roster list fields and the keys their enriched copies are stored under.
pub const ROSTER_PLAYER_FIELDS: [(&str, &str); 3] = [
    ("players", "players_enriched"),
    ("starters", "starters_enriched"),
    ("reserve", "reserve_enriched"),
];

/// Looks up one player id, falling back to the unknown placeholder.
pub fn lookup_player(players: &PlayerMap, player_id: &str, keep_id: bool) -> EnrichedPlayer {
    let id = keep_id.then_some(player_id);
    match players.get(player_id) {
        Some(player) => EnrichedPlayer::from_player(id, player),
        None => EnrichedPlayer::unknown(id),
    }
}

/// Converts a list of player ids into enriched records, preserving order.
pub fn enrich_player_ids(players: &PlayerMap, player_ids: &[Value]) -> Vec<EnrichedPlayer> {
    player_ids
        .iter()
        .map(|id| match id.as_str() {
            Some(id) => lookup_player(players, id, true),
            // Non-string ids cannot match the directory; keep their text form
            None => EnrichedPlayer::unknown(Some(id.to_string().as_str())),
        })
        .collect()
}

/// Adds `players_enriched`, `starters_enriched` and `reserve_enriched` next
/// to each present, non-empty id list of a roster.
pub fn enrich_roster(players: &PlayerMap, roster: &mut Value) {
    let Some(fields) = roster.as_object_mut() else {
        return;
    };

    for (source, target) in ROSTER_PLAYER_FIELDS {
        let enriched = match fields.get(source).and_then(Value::as_array) {
            Some(ids) if !ids.is_empty() => enrich_player_ids(players, ids),
            _ => continue,
        };
        fields.insert(target.to_string(), json!(enriched));
    }
}

pub fn enrich_rosters(players: &PlayerMap, rosters: &mut [Value]) {
    for roster in rosters.iter_mut() {
        enrich_roster(players, roster);
    }
    debug!("Enriched {} rosters", rosters.len());
}

/// Attaches `player_info` to every trending entry, keyed by its `player_id`.
pub fn enrich_trending(players: &PlayerMap, trending: &mut [Value]) {
    for item in trending.iter_mut() {
        let info = match item.get("player_id").and_then(Value::as_str) {
            Some(id) => lookup_player(players, id, false),
            None => EnrichedPlayer::unknown(None),
        };
        if let Some(fields) = item.as_object_mut() {
            fields.insert("player_info".to_string(), json!(info));
        }
    }
    debug!("Enriched {} trending entries", trending.len());
}
