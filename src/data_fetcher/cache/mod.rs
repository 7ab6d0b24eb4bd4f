pub mod player_cache;

pub use player_cache::{PlayerCacheFile, PlayerDirectory, write_snapshot};
