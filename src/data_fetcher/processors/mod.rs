pub mod enrichment;

pub use enrichment::{
    enrich_player_ids, enrich_roster, enrich_rosters, enrich_trending, lookup_player,
};
