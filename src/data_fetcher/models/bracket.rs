//! Playoff bracket entries as served by the winners/losers bracket endpoints.
//!
//! Sleeper encodes each match with short keys:
//! `r` round, `m` match number, `t1`/`t2` roster ids, `w`/`l` winner and
//! loser roster ids, `t1_from`/`t2_from` references such as `{"w": 3}`, and
//! `p` the placement the match decides.

use serde_json::Value;

/// League-local team identifier.
pub type RosterId = u32;

/// Where a not-yet-known team slot gets its team from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    WinnerOf(u32),
    LoserOf(u32),
}

impl MatchSource {
    fn from_json(value: &Value) -> Option<Self> {
        if let Some(id) = as_u32(value.get("w")) {
            Some(MatchSource::WinnerOf(id))
        } else {
            as_u32(value.get("l")).map(MatchSource::LoserOf)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketMatch {
    pub round: u32,
    pub match_id: u32,
    pub team1: Option<RosterId>,
    pub team2: Option<RosterId>,
    pub team1_from: Option<MatchSource>,
    pub team2_from: Option<MatchSource>,
    pub winner: Option<RosterId>,
    pub loser: Option<RosterId>,
    pub position: Option<u32>,
}

impl BracketMatch {
    /// Reads a match leniently. Missing or mistyped fields become absent
    /// (round and match number fall back to 0) so one bad entry cannot
    /// break the rest of the bracket.
    pub fn from_json(value: &Value) -> Self {
        Self {
            round: as_u32(value.get("r")).unwrap_or(0),
            match_id: as_u32(value.get("m")).unwrap_or(0),
            team1: as_u32(value.get("t1")),
            team2: as_u32(value.get("t2")),
            team1_from: value.get("t1_from").and_then(MatchSource::from_json),
            team2_from: value.get("t2_from").and_then(MatchSource::from_json),
            winner: as_u32(value.get("w")),
            loser: as_u32(value.get("l")),
            // p = 0 carries no placement
            position: as_u32(value.get("p")).filter(|p| *p != 0),
        }
    }

    /// A match is decided exactly when a winner is recorded.
    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }
}

/// Parses a raw bracket payload into matches, preserving input order.
pub fn parse_bracket(values: &[Value]) -> Vec<BracketMatch> {
    values.iter().map(BracketMatch::from_json).collect()
}

fn as_u32(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}
