//! In-memory [`SleeperApi`] for tests.
//!
//! Serves canned payloads, counts player-list fetches and records every call
//! so tests can assert on request ordering and cache behaviour without a
//! network.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::data_fetcher::api::SleeperApi;
use crate::data_fetcher::models::{PlayerMap, parse_player_map};
use crate::error::AppError;

/// Delay applied to player-list fetches so concurrent loaders overlap.
const PLAYERS_FETCH_DELAY: Duration = Duration::from_millis(50);

fn player(first: &str, last: &str, position: &str, team: &str) -> Value {
    json!({
        "first_name": first,
        "last_name": last,
        "position": position,
        "team": team,
        "status": "Active",
        "fantasy_positions": [position]
    })
}

/// The bulk players body every fake serves, keyed by player id.
pub fn sample_player_records() -> Value {
    json!({
        "4046": player("Patrick", "Mahomes", "QB", "KC"),
        "4034": player("Christian", "McCaffrey", "RB", "SF"),
        "6794": player("Justin", "Jefferson", "WR", "MIN")
    })
}

/// [`sample_player_records`] as a player directory.
pub fn sample_players() -> PlayerMap {
    parse_player_map(sample_player_records()).unwrap_or_default()
}

/// Four users, each owning one roster: A owns 1, B owns 2, C owns 3, D owns 4.
pub fn sample_users() -> Vec<Value> {
    ["A", "B", "C", "D"]
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"user_id": format!("u{}", i + 1), "display_name": name}))
        .collect()
}

pub fn sample_rosters() -> Vec<Value> {
    vec![
        json!({"roster_id": 1, "owner_id": "u1", "players": ["4046", "9999"], "starters": ["4046"]}),
        json!({"roster_id": 2, "owner_id": "u2", "players": ["4034"], "starters": ["4034"]}),
        json!({"roster_id": 3, "owner_id": "u3", "players": ["6794"]}),
        json!({"roster_id": 4, "owner_id": "u4", "players": []}),
    ]
}

/// A completed two-bracket playoff: 1 beats 2 for the title, 3 beats 4 for third.
pub fn completed_winners_bracket() -> Vec<Value> {
    vec![json!({"r": 1, "m": 1, "t1": 1, "t2": 2, "w": 1, "l": 2, "p": 1})]
}

pub fn completed_losers_bracket() -> Vec<Value> {
    vec![json!({"r": 1, "m": 1, "t1": 3, "t2": 4, "w": 3, "l": 4, "p": 3})]
}

pub fn sample_trending() -> Vec<Value> {
    vec![
        json!({"player_id": "4046", "count": 120}),
        json!({"player_id": "0000", "count": 7}),
    ]
}

pub struct FakeSleeperApi {
    players: Value,
    users: Value,
    rosters: Value,
    winners: Value,
    losers: Value,
    trending: Value,
    fail_players: bool,
    fail_winners: bool,
    league_missing: bool,
    players_calls: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl Default for FakeSleeperApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSleeperApi {
    /// A fake with the sample player directory and no league data.
    pub fn new() -> Self {
        Self {
            players: sample_player_records(),
            users: json!([]),
            rosters: json!([]),
            winners: json!([]),
            losers: json!([]),
            trending: json!([]),
            fail_players: false,
            fail_winners: false,
            league_missing: false,
            players_calls: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A league of four rosters with a completed playoff and trending data.
    pub fn with_sample_league() -> Self {
        Self::new()
            .with_users(sample_users())
            .with_rosters(sample_rosters())
            .with_winners_bracket(completed_winners_bracket())
            .with_losers_bracket(completed_losers_bracket())
            .with_trending(sample_trending())
    }

    /// Replaces the bulk players body, which need not be well formed.
    pub fn with_players(mut self, players: impl Into<Value>) -> Self {
        self.players = players.into();
        self
    }

    pub fn with_users(mut self, users: impl Into<Value>) -> Self {
        self.users = users.into();
        self
    }

    pub fn with_rosters(mut self, rosters: impl Into<Value>) -> Self {
        self.rosters = rosters.into();
        self
    }

    pub fn with_winners_bracket(mut self, bracket: impl Into<Value>) -> Self {
        self.winners = bracket.into();
        self
    }

    pub fn with_losers_bracket(mut self, bracket: impl Into<Value>) -> Self {
        self.losers = bracket.into();
        self
    }

    pub fn with_trending(mut self, trending: impl Into<Value>) -> Self {
        self.trending = trending.into();
        self
    }

    /// Player-list fetches fail with a server error.
    pub fn failing_players(mut self) -> Self {
        self.fail_players = true;
        self
    }

    /// Winners-bracket fetches fail with a server error.
    pub fn failing_winners_bracket(mut self) -> Self {
        self.fail_winners = true;
        self
    }

    /// League lookups answer 404.
    pub fn missing_league(mut self) -> Self {
        self.league_missing = true;
        self
    }

    /// Number of player-list fetches made so far, failed ones included.
    pub fn players_calls(&self) -> usize {
        self.players_calls.load(Ordering::SeqCst)
    }

    /// Number of records in the served players body.
    pub fn player_fixture_len(&self) -> usize {
        self.players.as_object().map_or(0, |records| records.len())
    }

    /// Every call made so far, as `method:argument`.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, method: &str, argument: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(format!("{method}:{argument}"));
        }
    }
}

#[async_trait]
impl SleeperApi for FakeSleeperApi {
    async fn get_user(&self, username_or_id: &str) -> Result<Value, AppError> {
        self.record("get_user", username_or_id);
        Ok(json!({"user_id": "u1", "username": username_or_id, "display_name": "A"}))
    }

    async fn get_user_leagues(
        &self,
        user_id: &str,
        sport: &str,
        season: &str,
    ) -> Result<Value, AppError> {
        self.record("get_user_leagues", &format!("{user_id}/{sport}/{season}"));
        Ok(json!([{"league_id": "L1", "season": season, "sport": sport}]))
    }

    async fn get_league(&self, league_id: &str) -> Result<Value, AppError> {
        self.record("get_league", league_id);
        if self.league_missing {
            return Err(AppError::api_not_found(format!("fake://league/{league_id}")));
        }
        Ok(json!({"league_id": league_id, "name": "Fake League"}))
    }

    async fn get_league_rosters(&self, league_id: &str) -> Result<Value, AppError> {
        self.record("get_league_rosters", league_id);
        Ok(self.rosters.clone())
    }

    async fn get_league_users(&self, league_id: &str) -> Result<Value, AppError> {
        self.record("get_league_users", league_id);
        Ok(self.users.clone())
    }

    async fn get_matchups(&self, league_id: &str, week: u32) -> Result<Value, AppError> {
        self.record("get_matchups", &format!("{league_id}/{week}"));
        Ok(json!([{"roster_id": 1, "matchup_id": 1, "points": 101.5}]))
    }

    async fn get_user_drafts(
        &self,
        user_id: &str,
        sport: &str,
        season: &str,
    ) -> Result<Value, AppError> {
        self.record("get_user_drafts", &format!("{user_id}/{sport}/{season}"));
        Ok(json!([{"draft_id": "D1"}]))
    }

    async fn get_draft_picks(&self, draft_id: &str) -> Result<Value, AppError> {
        self.record("get_draft_picks", draft_id);
        Ok(json!([{"pick_no": 1, "player_id": "4046"}]))
    }

    async fn get_players(&self, sport: &str) -> Result<Value, AppError> {
        self.record("get_players", sport);
        self.players_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(PLAYERS_FETCH_DELAY).await;
        if self.fail_players {
            return Err(AppError::api_server_error(
                500,
                "players unavailable",
                format!("fake://players/{sport}"),
            ));
        }
        Ok(self.players.clone())
    }

    async fn get_trending_players(
        &self,
        sport: &str,
        trend_type: &str,
    ) -> Result<Value, AppError> {
        self.record("get_trending_players", &format!("{sport}/{trend_type}"));
        Ok(self.trending.clone())
    }

    async fn get_winners_bracket(&self, league_id: &str) -> Result<Value, AppError> {
        self.record("get_winners_bracket", league_id);
        if self.fail_winners {
            return Err(AppError::api_server_error(
                500,
                "bracket unavailable",
                format!("fake://league/{league_id}/winners_bracket"),
            ));
        }
        Ok(self.winners.clone())
    }

    async fn get_losers_bracket(&self, league_id: &str) -> Result<Value, AppError> {
        self.record("get_losers_bracket", league_id);
        Ok(self.losers.clone())
    }
}
