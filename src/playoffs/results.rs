use serde_json::Value;
use tracing::{info, instrument, warn};

use super::formatting::{NameMap, format_bracket};
use super::standings::{derive_standings, format_standings};
use crate::data_fetcher::api::SleeperApi;
use crate::data_fetcher::models::{parse_bracket, parse_roster_ownership, parse_users};
use crate::error::AppError;

pub const WINNERS_HEADER: &str = "🏆 WINNERS BRACKET";
pub const LOSERS_HEADER: &str = "🥉 LOSERS BRACKET";
pub const STANDINGS_HEADER: &str = "🏅 FINAL STANDINGS";
pub const NO_PLAYOFF_DATA: &str = "No playoff bracket data available";

const SECTION_RULE_WIDTH: usize = 50;

/// Joins league users with rosters: roster id to the owner's display name.
/// Rosters without a known owner are labelled "Unknown".
pub fn build_roster_name_map(users: &[Value], rosters: &[Value]) -> NameMap {
    let user_names: std::collections::HashMap<String, String> = parse_users(users)
        .into_iter()
        .map(|user| {
            let label = user.label();
            (user.user_id, label)
        })
        .collect();

    parse_roster_ownership(rosters)
        .into_iter()
        .map(|roster| {
            let name = roster
                .owner_id
                .as_ref()
                .and_then(|owner| user_names.get(owner))
                .cloned()
                .unwrap_or_else(|| "Unknown".to_string());
            (roster.roster_id, name)
        })
        .collect()
}

/// Renders winners, losers and standings sections in that order. Empty
/// brackets and undeterminable standings are left out.
pub fn render_playoff_results(winners: &[Value], losers: &[Value], names: &NameMap) -> String {
    let winners = parse_bracket(winners);
    let losers = parse_bracket(losers);
    let mut lines: Vec<String> = Vec::new();

    for (header, bracket) in [(WINNERS_HEADER, &winners), (LOSERS_HEADER, &losers)] {
        if bracket.is_empty() {
            continue;
        }
        push_header(&mut lines, header);
        lines.extend(format_bracket(bracket, names));
        lines.push(String::new());
    }

    if let Some(standings) = derive_standings(&winners, &losers, names) {
        push_header(&mut lines, STANDINGS_HEADER);
        lines.extend(format_standings(&standings));
    }

    if lines.is_empty() {
        return NO_PLAYOFF_DATA.to_string();
    }
    lines.join("\n")
}

fn push_header(lines: &mut Vec<String>, header: &str) {
    lines.push(header.to_string());
    lines.push("=".repeat(SECTION_RULE_WIDTH));
}

/// The entries of a list body. `null` (no bracket yet) and any other
/// non-list body read as empty.
fn list_entries<'a>(body: &'a Value, what: &str) -> &'a [Value] {
    match body {
        Value::Array(entries) => entries.as_slice(),
        Value::Null => &[],
        other => {
            warn!("Ignoring {what} body that is not a list: {other}");
            &[]
        }
    }
}

/// Fetches both brackets and the league users concurrently, then the rosters,
/// and renders the playoff summary. Any failed request fails the whole call.
#[instrument(skip(api))]
pub async fn format_playoff_results(
    api: &dyn SleeperApi,
    league_id: &str,
) -> Result<String, AppError> {
    let (winners, losers, users) = futures::try_join!(
        api.get_winners_bracket(league_id),
        api.get_losers_bracket(league_id),
        api.get_league_users(league_id),
    )?;
    let rosters = api.get_league_rosters(league_id).await?;

    let winners = list_entries(&winners, "winners bracket");
    let losers = list_entries(&losers, "losers bracket");
    let users = list_entries(&users, "league users");
    let rosters = list_entries(&rosters, "rosters");

    info!(
        "Rendering playoffs: {} winners matches, {} losers matches, {} rosters",
        winners.len(),
        losers.len(),
        rosters.len()
    );

    let names = build_roster_name_map(users, rosters);
    Ok(render_playoff_results(winners, losers, &names))
}
