//! Persisted player directory with time-based invalidation
//!
//! The directory is loaded lazily on first use. A snapshot file younger than
//! the TTL (judged by file modification time) is reused; otherwise the full
//! player list is fetched and written back before use.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::constants::player_cache;
use crate::data_fetcher::api::SleeperApi;
use crate::data_fetcher::models::{PlayerMap, parse_player_map};
use crate::error::AppError;

/// On-disk layout: `{ "timestamp": <epoch seconds>, "players": { id: record } }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerCacheFile {
    pub timestamp: i64,
    pub players: PlayerMap,
}

pub struct PlayerDirectory {
    api: Arc<dyn SleeperApi>,
    cache_path: PathBuf,
    ttl: Duration,
    // Holding this lock across the load makes initialization single-flight.
    loaded: Mutex<Option<Arc<PlayerMap>>>,
}

impl PlayerDirectory {
    pub fn new(api: Arc<dyn SleeperApi>, cache_path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            api,
            cache_path: cache_path.into(),
            ttl,
            loaded: Mutex::new(None),
        }
    }

    pub fn with_default_ttl(api: Arc<dyn SleeperApi>, cache_path: impl Into<PathBuf>) -> Self {
        Self::new(
            api,
            cache_path,
            Duration::from_secs(player_cache::TTL_HOURS * 3600),
        )
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Returns the loaded directory, loading it on first use.
    ///
    /// Concurrent callers wait for the first load instead of starting their
    /// own. A failed fetch installs nothing and is returned to the caller.
    /// If the fetch succeeds but the snapshot cannot be written, the data is
    /// returned for this call only and the next call fetches again.
    #[instrument(skip(self), fields(path = %self.cache_path.display()))]
    pub async fn ensure_loaded(&self) -> Result<Arc<PlayerMap>, AppError> {
        let mut slot = self.loaded.lock().await;
        if let Some(players) = slot.as_ref() {
            return Ok(Arc::clone(players));
        }

        if let Some(players) = self.read_snapshot().await {
            let players = Arc::new(players);
            *slot = Some(Arc::clone(&players));
            return Ok(players);
        }

        self.fetch_and_install(&mut slot).await
    }

    /// Fetches and persists a fresh snapshot regardless of the current one's age.
    #[instrument(skip(self), fields(path = %self.cache_path.display()))]
    pub async fn refresh(&self) -> Result<Arc<PlayerMap>, AppError> {
        let mut slot = self.loaded.lock().await;
        self.fetch_and_install(&mut slot).await
    }

    /// Whether the in-process directory has been installed.
    pub async fn is_loaded(&self) -> bool {
        self.loaded.lock().await.is_some()
    }

    async fn fetch_and_install(
        &self,
        slot: &mut Option<Arc<PlayerMap>>,
    ) -> Result<Arc<PlayerMap>, AppError> {
        info!("Fetching full player directory");
        let body = self.api.get_players(player_cache::SPORT).await?;
        let players = parse_player_map(body).ok_or_else(|| {
            AppError::api_unexpected_structure(
                "player list is not an object keyed by player id",
                format!("players/{}", player_cache::SPORT),
            )
        })?;
        let players = Arc::new(players);
        info!("Fetched {} players", players.len());

        match write_snapshot(&self.cache_path, &players).await {
            Ok(()) => {
                *slot = Some(Arc::clone(&players));
            }
            Err(e) => {
                error!("Failed to persist player cache, will refetch on next use: {e}");
                *slot = None;
            }
        }

        Ok(players)
    }

    /// Reads the snapshot when it exists and is younger than the TTL.
    /// Any problem reading it is logged and treated as a miss.
    async fn read_snapshot(&self) -> Option<PlayerMap> {
        let age = match snapshot_age(&self.cache_path).await {
            Ok(age) => age,
            Err(e) => {
                debug!("No usable player cache file: {e}");
                return None;
            }
        };

        if age >= self.ttl {
            info!("Player cache is stale (age {:?}, ttl {:?})", age, self.ttl);
            return None;
        }

        let content = match fs::read_to_string(&self.cache_path).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read player cache file: {e}");
                return None;
            }
        };

        match serde_json::from_str::<PlayerCacheFile>(&content) {
            Ok(file) => {
                info!(
                    "Loaded {} players from cache (written at {})",
                    file.players.len(),
                    file.timestamp
                );
                Some(file.players)
            }
            Err(e) => {
                warn!("Player cache file is corrupt, refetching: {e}");
                None
            }
        }
    }
}

async fn snapshot_age(path: &Path) -> Result<Duration, std::io::Error> {
    let modified = fs::metadata(path).await?.modified()?;
    // A modification time in the future counts as fresh
    Ok(SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO))
}

/// Writes the snapshot to a sibling temporary file and renames it over the
/// target so readers never observe a partial file.
pub async fn write_snapshot(path: &Path, players: &PlayerMap) -> Result<(), AppError> {
    let display = path.display().to_string();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::player_cache(&display, e.to_string()))?;
    }

    let payload = serde_json::to_string_pretty(&SnapshotRef {
        timestamp: Utc::now().timestamp(),
        players,
    })?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, payload)
        .await
        .map_err(|e| AppError::player_cache(&display, e.to_string()))?;

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(AppError::player_cache(&display, e.to_string()));
    }

    debug!("Wrote player cache with {} players", players.len());
    Ok(())
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    timestamp: i64,
    players: &'a PlayerMap,
}
