//! The object every tool call goes through.
//!
//! Wraps an API implementation and the player directory that enrichment
//! depends on. Constructed once and passed in, never global.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::constants::player_cache;
use crate::data_fetcher::api::{SleeperApi, SleeperClient};
use crate::data_fetcher::cache::PlayerDirectory;
use crate::data_fetcher::models::PlayerMap;
use crate::data_fetcher::processors::{enrich_rosters, enrich_trending};
use crate::error::AppError;
use crate::playoffs;

/// What the `get_players` operation returns: the cached directory for the
/// enrichment sport, the provider's body unchanged for any other.
#[derive(Debug, Clone)]
pub enum PlayerListing {
    Directory(Arc<PlayerMap>),
    Raw(Value),
}

impl Serialize for PlayerListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Directory(players) => players.as_ref().serialize(serializer),
            Self::Raw(body) => body.serialize(serializer),
        }
    }
}

pub struct SleeperService {
    api: Arc<dyn SleeperApi>,
    players: PlayerDirectory,
    default_season: String,
}

impl SleeperService {
    pub fn new(api: Arc<dyn SleeperApi>, players: PlayerDirectory, default_season: String) -> Self {
        Self {
            api,
            players,
            default_season,
        }
    }

    /// Wires the HTTP client and the on-disk player directory from config.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let api: Arc<dyn SleeperApi> = Arc::new(SleeperClient::from_config(config)?);
        let players = PlayerDirectory::new(
            Arc::clone(&api),
            config.resolved_player_cache_path(),
            config.player_cache_ttl(),
        );
        Ok(Self::new(api, players, config.default_season.clone()))
    }

    pub fn player_directory(&self) -> &PlayerDirectory {
        &self.players
    }

    pub fn default_season(&self) -> &str {
        &self.default_season
    }

    pub async fn get_user(&self, username_or_id: &str) -> Result<Value, AppError> {
        self.api.get_user(username_or_id).await
    }

    pub async fn get_user_leagues(
        &self,
        user_id: &str,
        sport: &str,
        season: &str,
    ) -> Result<Value, AppError> {
        self.api.get_user_leagues(user_id, sport, season).await
    }

    pub async fn get_league(&self, league_id: &str) -> Result<Value, AppError> {
        self.api.get_league(league_id).await
    }

    /// Rosters with `*_enriched` player lists when `enrich_players` is set.
    /// The player directory is loaded only after the rosters arrive, and not
    /// at all when the body is not a list.
    #[instrument(skip(self))]
    pub async fn get_league_rosters(
        &self,
        league_id: &str,
        enrich_players: bool,
    ) -> Result<Value, AppError> {
        let mut rosters = self.api.get_league_rosters(league_id).await?;
        if enrich_players {
            match rosters.as_array_mut() {
                Some(list) => {
                    let players = self.players.ensure_loaded().await?;
                    enrich_rosters(&players, list);
                }
                None => debug!("Rosters body is not a list, returned as is"),
            }
        }
        Ok(rosters)
    }

    pub async fn get_league_users(&self, league_id: &str) -> Result<Value, AppError> {
        self.api.get_league_users(league_id).await
    }

    pub async fn get_matchups(&self, league_id: &str, week: u32) -> Result<Value, AppError> {
        self.api.get_matchups(league_id, week).await
    }

    pub async fn get_user_drafts(
        &self,
        user_id: &str,
        sport: &str,
        season: &str,
    ) -> Result<Value, AppError> {
        self.api.get_user_drafts(user_id, sport, season).await
    }

    pub async fn get_draft_picks(&self, draft_id: &str) -> Result<Value, AppError> {
        self.api.get_draft_picks(draft_id).await
    }

    /// The full player list. The cached sport is served from the player
    /// directory; other sports are fetched directly.
    #[instrument(skip(self))]
    pub async fn get_players(&self, sport: &str) -> Result<PlayerListing, AppError> {
        if sport == player_cache::SPORT {
            Ok(PlayerListing::Directory(self.players.ensure_loaded().await?))
        } else {
            Ok(PlayerListing::Raw(self.api.get_players(sport).await?))
        }
    }

    /// Trending adds/drops, each with `player_info` when `enrich_players` is set.
    #[instrument(skip(self))]
    pub async fn get_trending_players(
        &self,
        sport: &str,
        trend_type: &str,
        enrich_players: bool,
    ) -> Result<Value, AppError> {
        let mut trending = self.api.get_trending_players(sport, trend_type).await?;
        if enrich_players {
            match trending.as_array_mut() {
                Some(list) => {
                    let players = self.players.ensure_loaded().await?;
                    enrich_trending(&players, list);
                }
                None => debug!("Trending body is not a list, returned as is"),
            }
        }
        Ok(trending)
    }

    pub async fn get_winners_bracket(&self, league_id: &str) -> Result<Value, AppError> {
        self.api.get_winners_bracket(league_id).await
    }

    pub async fn get_losers_bracket(&self, league_id: &str) -> Result<Value, AppError> {
        self.api.get_losers_bracket(league_id).await
    }

    pub async fn get_playoff_results(&self, league_id: &str) -> Result<String, AppError> {
        playoffs::format_playoff_results(self.api.as_ref(), league_id).await
    }
}
