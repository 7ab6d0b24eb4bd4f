//! Final standings from a completed double-elimination playoff.
//!
//! Places 1 and 2 come from the championship match: the winners-bracket match
//! in the highest round. Places 3/4, 5/6 and 7/8 come from losers-bracket
//! matches tagged with position 3, 5 or 7.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::formatting::{NameMap, roster_label};
use crate::data_fetcher::models::BracketMatch;

/// Losers-bracket position markers that decide a placement pair.
const PLACEMENT_MARKERS: [u32; 3] = [3, 5, 7];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub place: u32,
    pub name: String,
}

impl Placement {
    pub fn render(&self) -> String {
        match self.place {
            1 => format!("🥇 1st Place: {}", self.name),
            2 => format!("🥈 2nd Place: {}", self.name),
            3 => format!("🥉 3rd Place: {}", self.name),
            n => format!("   {n}th Place: {}", self.name),
        }
    }
}

/// Picks the championship match among the highest-round winners matches.
///
/// When a malformed bracket has several matches in that round, the one
/// tagged position 1 wins, otherwise the lowest match number.
pub fn championship_match(winners: &[BracketMatch]) -> Option<&BracketMatch> {
    let final_round = winners.iter().map(|m| m.round).max()?;
    let mut finals: Vec<&BracketMatch> =
        winners.iter().filter(|m| m.round == final_round).collect();

    if finals.len() > 1 {
        warn!(
            "{} winners-bracket matches share final round {}, choosing by position marker then match number",
            finals.len(),
            final_round
        );
    }

    finals.sort_by_key(|m| (m.position != Some(1), m.match_id));
    finals.into_iter().next()
}

/// Derives placements once every match in both brackets has a winner.
///
/// Returns `None` while any match is pending, or when fewer than two
/// placements could be derived. Placements are sorted ascending and may have
/// gaps when a marker match is absent.
pub fn derive_standings(
    winners: &[BracketMatch],
    losers: &[BracketMatch],
    names: &NameMap,
) -> Option<Vec<Placement>> {
    if !winners.iter().chain(losers).all(BracketMatch::is_decided) {
        debug!("Playoffs still in progress, no final standings");
        return None;
    }

    let mut places: BTreeMap<u32, String> = BTreeMap::new();
    let mut assign = |place: u32, roster: Option<u32>| {
        if let Some(roster) = roster {
            places.insert(place, roster_label(roster, names));
        }
    };

    if let Some(final_match) = championship_match(winners) {
        assign(1, final_match.winner);
        assign(2, final_match.loser);
    }

    for m in losers {
        if let Some(marker) = m.position.filter(|p| PLACEMENT_MARKERS.contains(p)) {
            assign(marker, m.winner);
            assign(marker + 1, m.loser);
        }
    }

    if places.len() < 2 {
        return None;
    }

    Some(
        places
            .into_iter()
            .map(|(place, name)| Placement { place, name })
            .collect(),
    )
}

pub fn format_standings(placements: &[Placement]) -> Vec<String> {
    placements.iter().map(Placement::render).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::parse_bracket;
    use serde_json::json;

    fn names() -> NameMap {
        NameMap::from([
            (10, "A".to_string()),
            (20, "B".to_string()),
            (30, "C".to_string()),
            (40, "D".to_string()),
        ])
    }

    #[test]
    fn test_simple_complete_playoff() {
        let winners = parse_bracket(&[json!({"r": 1, "m": 1, "t1": 10, "t2": 20, "w": 10, "l": 20})]);
        let losers =
            parse_bracket(&[json!({"r": 1, "m": 1, "t1": 30, "t2": 40, "w": 30, "l": 40, "p": 3})]);

        let standings = derive_standings(&winners, &losers, &names()).unwrap();
        let rendered = format_standings(&standings);
        assert_eq!(
            rendered,
            vec![
                "🥇 1st Place: A",
                "🥈 2nd Place: B",
                "🥉 3rd Place: C",
                "   4th Place: D",
            ]
        );
    }

    #[test]
    fn test_pending_match_means_no_standings() {
        let winners = parse_bracket(&[
            json!({"r": 1, "m": 1, "w": 10, "l": 20}),
            json!({"r": 2, "m": 2, "t1_from": {"w": 1}}),
        ]);
        assert!(derive_standings(&winners, &[], &names()).is_none());

        let done = parse_bracket(&[json!({"r": 1, "m": 1, "w": 10, "l": 20})]);
        let pending_losers = parse_bracket(&[json!({"r": 1, "m": 1, "p": 3})]);
        assert!(derive_standings(&done, &pending_losers, &names()).is_none());
    }

    #[test]
    fn test_empty_brackets_yield_none() {
        assert!(derive_standings(&[], &[], &names()).is_none());
    }

    #[test]
    fn test_championship_uses_highest_round() {
        let winners = parse_bracket(&[
            json!({"r": 3, "m": 5, "w": 20, "l": 10}),
            json!({"r": 1, "m": 1, "w": 10, "l": 30}),
            json!({"r": 2, "m": 3, "w": 20, "l": 40}),
        ]);
        let standings = derive_standings(&winners, &[], &names()).unwrap();
        assert_eq!(standings[0], Placement { place: 1, name: "B".into() });
        assert_eq!(standings[1], Placement { place: 2, name: "A".into() });
    }

    #[test]
    fn test_final_round_tie_prefers_position_one() {
        let winners = parse_bracket(&[
            json!({"r": 3, "m": 6, "w": 30, "l": 40, "p": 3}),
            json!({"r": 3, "m": 7, "w": 10, "l": 20, "p": 1}),
        ]);
        let chosen = championship_match(&winners).unwrap();
        assert_eq!(chosen.match_id, 7);
    }

    #[test]
    fn test_final_round_tie_without_marker_uses_lowest_match() {
        let winners = parse_bracket(&[
            json!({"r": 3, "m": 9, "w": 30, "l": 40}),
            json!({"r": 3, "m": 8, "w": 10, "l": 20}),
        ]);
        assert_eq!(championship_match(&winners).unwrap().match_id, 8);
    }

    #[test]
    fn test_gaps_and_ignored_markers() {
        let winners = parse_bracket(&[json!({"r": 2, "m": 3, "w": 10, "l": 20})]);
        let losers = parse_bracket(&[
            json!({"r": 2, "m": 4, "w": 30, "l": 40, "p": 5}),
            // Markers other than 3/5/7 decide nothing
            json!({"r": 2, "m": 5, "w": 50, "l": 60, "p": 9}),
            json!({"r": 1, "m": 1, "w": 30, "l": 50}),
        ]);

        let standings = derive_standings(&winners, &losers, &names()).unwrap();
        let places: Vec<u32> = standings.iter().map(|p| p.place).collect();
        assert_eq!(places, vec![1, 2, 5, 6]);
        assert_eq!(standings[2].render(), "   5th Place: C");
    }

    #[test]
    fn test_fewer_than_two_placements_is_none() {
        // Winner recorded without a loser gives a single placement
        let winners = parse_bracket(&[json!({"r": 1, "m": 1, "w": 10})]);
        assert!(derive_standings(&winners, &[], &names()).is_none());
    }

    #[test]
    fn test_unknown_roster_names() {
        let winners = parse_bracket(&[json!({"r": 1, "m": 1, "w": 11, "l": 12})]);
        let standings = derive_standings(&winners, &[], &NameMap::new()).unwrap();
        assert_eq!(standings[0].name, "Roster 11");
        assert_eq!(standings[1].name, "Roster 12");
    }

    #[test]
    fn test_seven_eight_place_render() {
        let placement = Placement { place: 8, name: "Z".into() };
        assert_eq!(placement.render(), "   8th Place: Z");
    }
}
