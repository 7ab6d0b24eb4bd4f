pub mod bracket;
pub mod league;
pub mod players;

pub use bracket::{BracketMatch, MatchSource, RosterId, parse_bracket};
pub use league::{LeagueUser, RosterOwnership, parse_roster_ownership, parse_users};
pub use players::{EnrichedPlayer, Player, PlayerMap, parse_player_map};
