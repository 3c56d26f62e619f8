//! Text and JSON rendering shared by the command handlers.

use crate::cli::types::TeamId;
use crate::league::PredictionRow;
use crate::storage::{Match, Team};
use crate::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::info;

const TABLE_HEADER: &str = " Rank | Team              | Pld | W | D | L | GF | GA | GD  | Pts";
const TABLE_RULE: &str = "------|-------------------|-----|---|---|---|----|----|-----|----";

/// Standings as a fixed-width text table, one team per line.
pub fn format_table(table: &[Team]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TABLE_HEADER);
    let _ = writeln!(out, "{}", TABLE_RULE);
    for (rank, team) in table.iter().enumerate() {
        let _ = writeln!(
            out,
            " {:<4} | {:<17} | {:<3} | {:<1} | {:<1} | {:<1} | {:<2} | {:<2} | {:<3} | {:<3}",
            rank + 1,
            team.name.chars().take(17).collect::<String>(),
            team.played,
            team.wins,
            team.draws,
            team.losses,
            team.goals_for,
            team.goals_against,
            team.goal_difference,
            team.points
        );
    }
    out
}

/// Write the standings to the log, one line per row.
pub fn log_table(header: &str, table: &[Team]) {
    info!("--- {} ---", header);
    for line in format_table(table).lines() {
        info!("{}", line);
    }
}

/// Team id to name lookup built from a table.
pub fn team_names(table: &[Team]) -> BTreeMap<TeamId, String> {
    table
        .iter()
        .map(|team| (team.id, team.name.clone()))
        .collect()
}

/// One match line: `Week 2  #5  Chelsea 2-1 Arsenal`, or `vs` if unplayed.
pub fn format_match(m: &Match, names: &BTreeMap<TeamId, String>) -> String {
    let name = |id: &TeamId| {
        names
            .get(id)
            .cloned()
            .unwrap_or_else(|| format!("Team {}", id))
    };
    let result = m
        .score()
        .map(|score| score.to_string())
        .unwrap_or_else(|| "vs".to_string());
    format!(
        "Week {:<2} #{:<4} {} {} {}",
        m.week.as_u32(),
        m.id.as_i64(),
        name(&m.home_team_id),
        result,
        name(&m.away_team_id)
    )
}

pub fn format_matches(matches: &[Match], names: &BTreeMap<TeamId, String>) -> String {
    let mut out = String::new();
    for m in matches {
        let _ = writeln!(out, "{}", format_match(m, names));
    }
    out
}

/// Prediction rows as `name  percentage` lines.
pub fn format_predictions(rows: &[PredictionRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:>8}", "Team", "Chance");
    let _ = writeln!(out, "{:<20} {:>8}", "----", "------");
    for row in rows {
        let _ = writeln!(
            out,
            "{:<20} {:>7.2}%",
            row.team_name.chars().take(20).collect::<String>(),
            row.probability_percentage
        );
    }
    out
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
