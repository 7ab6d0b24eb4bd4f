//! Bracket rendering: rounds in ascending order, matches in ascending match
//! number, one line per match.

use std::collections::{BTreeMap, HashMap};

use crate::data_fetcher::models::{BracketMatch, MatchSource, RosterId};

/// Roster id to owner display name for one league.
pub type NameMap = HashMap<RosterId, String>;

pub const NO_BRACKET_DATA: &str = "No bracket data available";
pub const TBD: &str = "TBD";

const ROUND_RULE_WIDTH: usize = 20;

/// Owner name for a roster, or `Roster <id>` when the league has no owner for it.
pub fn roster_label(roster_id: RosterId, names: &NameMap) -> String {
    names
        .get(&roster_id)
        .cloned()
        .unwrap_or_else(|| format!("Roster {roster_id}"))
}

fn optional_roster_label(roster_id: Option<RosterId>, names: &NameMap) -> String {
    roster_id
        .map(|id| roster_label(id, names))
        .unwrap_or_else(|| TBD.to_string())
}

/// Label for one side of a match.
///
/// A `from` reference is always shown as "Winner/Loser of Match X", even once
/// X is decided and a roster id is present. References are followed one level
/// only; chains through several matches are never resolved.
pub fn team_label(
    team: Option<RosterId>,
    source: Option<MatchSource>,
    names: &NameMap,
) -> String {
    match (source, team) {
        (Some(MatchSource::WinnerOf(id)), _) => format!("Winner of Match {id}"),
        (Some(MatchSource::LoserOf(id)), _) => format!("Loser of Match {id}"),
        (None, Some(id)) => roster_label(id, names),
        (None, None) => TBD.to_string(),
    }
}

pub fn format_match(m: &BracketMatch, names: &NameMap) -> String {
    let team1 = team_label(m.team1, m.team1_from, names);
    let team2 = team_label(m.team2, m.team2_from, names);

    let status = match m.winner {
        Some(winner) => format!(
            "✅ {} defeats {}",
            roster_label(winner, names),
            optional_roster_label(m.loser, names)
        ),
        None => "⏳ Pending".to_string(),
    };

    let position = m
        .position
        .map(|p| format!(" (Position {p})"))
        .unwrap_or_default();

    format!(
        "  Match {}: {} vs {} - {}{}",
        m.match_id, team1, team2, status, position
    )
}

/// Renders a bracket grouped by round. An empty bracket yields a single
/// explanatory line.
pub fn format_bracket(matches: &[BracketMatch], names: &NameMap) -> Vec<String> {
    if matches.is_empty() {
        return vec![NO_BRACKET_DATA.to_string()];
    }

    let mut rounds: BTreeMap<u32, Vec<&BracketMatch>> = BTreeMap::new();
    for m in matches {
        rounds.entry(m.round).or_default().push(m);
    }

    let mut lines = Vec::with_capacity(matches.len() + rounds.len() * 3);
    for (round, mut round_matches) in rounds {
        round_matches.sort_by_key(|m| m.match_id);

        lines.push(String::new());
        lines.push(format!("ROUND {round}:"));
        lines.push("-".repeat(ROUND_RULE_WIDTH));
        lines.extend(round_matches.into_iter().map(|m| format_match(m, names)));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::parse_bracket;
    use serde_json::json;

    fn names() -> NameMap {
        NameMap::from([(10, "Alice".to_string()), (20, "Bob".to_string())])
    }

    #[test]
    fn test_empty_bracket_has_explanatory_line() {
        let lines = format_bracket(&[], &names());
        assert_eq!(lines, vec![NO_BRACKET_DATA.to_string()]);
    }

    #[test]
    fn test_round_and_match_ordering() {
        let matches = parse_bracket(&[
            json!({"r": 2, "m": 5}),
            json!({"r": 1, "m": 2}),
            json!({"r": 1, "m": 1}),
            json!({"r": 2, "m": 4}),
        ]);

        let lines = format_bracket(&matches, &names());
        let headers: Vec<&String> = lines.iter().filter(|l| l.starts_with("ROUND")).collect();
        assert_eq!(headers, vec!["ROUND 1:", "ROUND 2:"]);

        let match_lines: Vec<&String> = lines
            .iter()
            .filter(|l| l.trim_start().starts_with("Match"))
            .collect();
        assert!(match_lines[0].contains("Match 1:"));
        assert!(match_lines[1].contains("Match 2:"));
        assert!(match_lines[2].contains("Match 4:"));
        assert!(match_lines[3].contains("Match 5:"));
    }

    #[test]
    fn test_team_resolution() {
        let m = BracketMatch::from_json(&json!({"r": 2, "m": 4, "t1": 5, "t2_from": {"w": 3}}));
        let line = format_match(&m, &names());
        assert_eq!(
            line,
            "  Match 4: Roster 5 vs Winner of Match 3 - ⏳ Pending"
        );
    }

    #[test]
    fn test_loser_reference_and_tbd() {
        let m = BracketMatch::from_json(&json!({"r": 3, "m": 7, "t1_from": {"l": 5}}));
        assert_eq!(
            format_match(&m, &names()),
            "  Match 7: Loser of Match 5 vs TBD - ⏳ Pending"
        );
    }

    #[test]
    fn test_reference_wins_over_resolved_team() {
        let m = BracketMatch::from_json(&json!({
            "r": 2, "m": 3, "t1": 10, "t2": 20,
            "t1_from": {"w": 1}, "t2_from": {"w": 2},
            "w": 10, "l": 20, "p": 1
        }));
        assert_eq!(
            format_match(&m, &names()),
            "  Match 3: Winner of Match 1 vs Winner of Match 2 - ✅ Alice defeats Bob (Position 1)"
        );
    }

    #[test]
    fn test_decided_match_with_missing_loser() {
        let m = BracketMatch::from_json(&json!({"r": 1, "m": 1, "t1": 10, "t2": 30, "w": 10}));
        assert_eq!(
            format_match(&m, &names()),
            "  Match 1: Alice vs Roster 30 - ✅ Alice defeats TBD"
        );
    }

    #[test]
    fn test_round_section_layout() {
        let matches = parse_bracket(&[json!({"r": 1, "m": 1, "t1": 10, "t2": 20})]);
        let lines = format_bracket(&matches, &names());
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "ROUND 1:");
        assert_eq!(lines[2], "-".repeat(20));
        assert_eq!(lines[3], "  Match 1: Alice vs Bob - ⏳ Pending");
    }
}
