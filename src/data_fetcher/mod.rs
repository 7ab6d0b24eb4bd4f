pub mod api;
pub mod cache;
pub mod models;
pub mod processors;
pub mod service;

pub use api::{SleeperApi, SleeperClient};
pub use cache::PlayerDirectory;
pub use models::{BracketMatch, EnrichedPlayer, Player, PlayerMap};
pub use service::{PlayerListing, SleeperService};
