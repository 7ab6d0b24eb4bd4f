use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use crate::config::Config;
use crate::error::AppError;

use super::fetch_utils::fetch;
use super::http_client::create_http_client_with_timeout;
use super::urls::*;

/// One method per Sleeper endpoint. Each call performs exactly one request.
///
/// Payloads are returned as parsed JSON without reshaping, so a literal
/// `null` body (Sleeper's answer for unknown ids) comes back as `Value::Null`.
/// Callers hold an `Arc<dyn SleeperApi>` so the HTTP client can be swapped
/// for a fake in tests.
#[async_trait]
pub trait SleeperApi: Send + Sync {
    async fn get_user(&self, username_or_id: &str) -> Result<Value, AppError>;

    async fn get_user_leagues(
        &self,
        user_id: &str,
        sport: &str,
        season: &str,
    ) -> Result<Value, AppError>;

    async fn get_league(&self, league_id: &str) -> Result<Value, AppError>;

    async fn get_league_rosters(&self, league_id: &str) -> Result<Value, AppError>;

    async fn get_league_users(&self, league_id: &str) -> Result<Value, AppError>;

    async fn get_matchups(&self, league_id: &str, week: u32) -> Result<Value, AppError>;

    async fn get_user_drafts(
        &self,
        user_id: &str,
        sport: &str,
        season: &str,
    ) -> Result<Value, AppError>;

    async fn get_draft_picks(&self, draft_id: &str) -> Result<Value, AppError>;

    async fn get_players(&self, sport: &str) -> Result<Value, AppError>;

    async fn get_trending_players(
        &self,
        sport: &str,
        trend_type: &str,
    ) -> Result<Value, AppError>;

    async fn get_winners_bracket(&self, league_id: &str) -> Result<Value, AppError>;

    async fn get_losers_bracket(&self, league_id: &str) -> Result<Value, AppError>;
}

/// HTTP implementation of [`SleeperApi`] over one reusable connection pool.
#[derive(Debug, Clone)]
pub struct SleeperClient {
    client: Client,
    base_url: String,
}

impl SleeperClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds a client with the configured base URL and timeout.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.api_base_url.as_str()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SleeperApi for SleeperClient {
    #[instrument(skip(self))]
    async fn get_user(&self, username_or_id: &str) -> Result<Value, AppError> {
        fetch(&self.client, &build_user_url(&self.base_url, username_or_id)).await
    }

    #[instrument(skip(self))]
    async fn get_user_leagues(
        &self,
        user_id: &str,
        sport: &str,
        season: &str,
    ) -> Result<Value, AppError> {
        let url = build_user_leagues_url(&self.base_url, user_id, sport, season);
        fetch(&self.client, &url).await
    }

    #[instrument(skip(self))]
    async fn get_league(&self, league_id: &str) -> Result<Value, AppError> {
        fetch(&self.client, &build_league_url(&self.base_url, league_id)).await
    }

    #[instrument(skip(self))]
    async fn get_league_rosters(&self, league_id: &str) -> Result<Value, AppError> {
        fetch(&self.client, &build_league_rosters_url(&self.base_url, league_id)).await
    }

    #[instrument(skip(self))]
    async fn get_league_users(&self, league_id: &str) -> Result<Value, AppError> {
        fetch(&self.client, &build_league_users_url(&self.base_url, league_id)).await
    }

    #[instrument(skip(self))]
    async fn get_matchups(&self, league_id: &str, week: u32) -> Result<Value, AppError> {
        fetch(&self.client, &build_matchups_url(&self.base_url, league_id, week)).await
    }

    #[instrument(skip(self))]
    async fn get_user_drafts(
        &self,
        user_id: &str,
        sport: &str,
        season: &str,
    ) -> Result<Value, AppError> {
        let url = build_user_drafts_url(&self.base_url, user_id, sport, season);
        fetch(&self.client, &url).await
    }

    #[instrument(skip(self))]
    async fn get_draft_picks(&self, draft_id: &str) -> Result<Value, AppError> {
        fetch(&self.client, &build_draft_picks_url(&self.base_url, draft_id)).await
    }

    #[instrument(skip(self))]
    async fn get_players(&self, sport: &str) -> Result<Value, AppError> {
        fetch(&self.client, &build_players_url(&self.base_url, sport)).await
    }

    #[instrument(skip(self))]
    async fn get_trending_players(
        &self,
        sport: &str,
        trend_type: &str,
    ) -> Result<Value, AppError> {
        let url = build_trending_players_url(&self.base_url, sport, trend_type);
        fetch(&self.client, &url).await
    }

    #[instrument(skip(self))]
    async fn get_winners_bracket(&self, league_id: &str) -> Result<Value, AppError> {
        fetch(&self.client, &build_winners_bracket_url(&self.base_url, league_id)).await
    }

    #[instrument(skip(self))]
    async fn get_losers_bracket(&self, league_id: &str) -> Result<Value, AppError> {
        fetch(&self.client, &build_losers_bracket_url(&self.base_url, league_id)).await
    }
}
