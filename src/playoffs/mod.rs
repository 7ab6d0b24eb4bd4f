//! Double-elimination playoff rendering.
//!
//! Turns raw winners/losers bracket payloads into grouped, ordered text and
//! derives final standings once every match is decided.

pub mod formatting;
pub mod results;
pub mod standings;

pub use formatting::{NameMap, format_bracket, format_match, team_label};
pub use results::{build_roster_name_map, format_playoff_results, render_playoff_results};
pub use standings::{Placement, derive_standings, format_standings};
