//! Season commands: table, weeks, predictions, edits and resets

use super::{
    render::{
        format_matches, format_predictions, format_table, log_table, print_json, team_names,
    },
    CommandContext,
};
use crate::{
    cli::types::{MatchId, Score, Week},
    league::WeekOutcome,
    storage::LeagueStore,
    Result,
};
use serde_json::json;
use tracing::warn;

/// Handle the table command
pub fn handle_table<S: LeagueStore>(ctx: &CommandContext<S>) -> Result<()> {
    let table = ctx.league.table()?;

    if ctx.as_json {
        return print_json(&table);
    }
    if table.is_empty() {
        println!("League table is currently empty.");
    } else {
        print!("{}", format_table(&table));
    }
    Ok(())
}

/// Handle the current-week command
pub fn handle_current_week<S: LeagueStore>(ctx: &CommandContext<S>) -> Result<()> {
    let report = ctx.league.current_week_report()?;

    if ctx.as_json {
        return print_json(&report);
    }
    match report.current_week {
        -1 => println!("Season {} ({} weeks played)", report.status, report.total_weeks),
        week => println!(
            "Week {} of {}: {} ({} completed)",
            week, report.total_weeks, report.status, report.completed_weeks
        ),
    }
    Ok(())
}

/// Handle the matches command
pub fn handle_matches<S: LeagueStore>(ctx: &CommandContext<S>, week: Option<Week>) -> Result<()> {
    let matches = ctx.league.matches(week)?;

    if ctx.as_json {
        return print_json(&matches);
    }
    if matches.is_empty() {
        match week {
            Some(week) => println!("No matches scheduled for week {}.", week),
            None => println!("No fixture has been generated."),
        }
        return Ok(());
    }
    let names = team_names(&ctx.league.table()?);
    print!("{}", format_matches(&matches, &names));
    Ok(())
}

/// Handle the next-week command
pub fn handle_next_week<S: LeagueStore>(ctx: &mut CommandContext<S>) -> Result<()> {
    match ctx.league.play_next_week()? {
        WeekOutcome::Played {
            week,
            matches,
            table,
        } => {
            log_table(&format!("League table after week {}", week), &table);
            let message = format!("Week {} played successfully.", week);
            if ctx.as_json {
                return print_json(&json!({
                    "played_week": week,
                    "week_matches": matches,
                    "league_table": table,
                    "message": message,
                }));
            }
            println!("✓ {}", message);
            print!("{}", format_matches(&matches, &team_names(&table)));
            println!();
            print!("{}", format_table(&table));
        }
        WeekOutcome::SeasonComplete { table } => {
            log_table("Final league table", &table);
            let message = "League completed. No more weeks to play.";
            if ctx.as_json {
                return print_json(&json!({ "league_table": table, "message": message }));
            }
            println!("{}", message);
            print!("{}", format_table(&table));
        }
    }
    Ok(())
}

/// Handle the play-all command
///
/// Weeks played before a failure are still printed before the error is returned.
pub fn handle_play_all<S: LeagueStore>(ctx: &mut CommandContext<S>) -> Result<()> {
    let (played, table, error) = match ctx.league.play_all_remaining() {
        Ok(report) => (report.played, report.table, None),
        Err(failure) => {
            warn!("{}", failure);
            let table = ctx.league.table()?;
            (failure.played, table, Some(failure.error))
        }
    };

    log_table("League table after play-all", &table);
    let message = match &error {
        None if played.is_empty() => "League already completed. No more weeks to play.".to_string(),
        None => format!("{} week(s) played.", played.len()),
        Some(e) => format!("Stopped after {} week(s): {}", played.len(), e),
    };

    if ctx.as_json {
        print_json(&json!({
            "played_weeks": played,
            "league_table": table,
            "message": message,
        }))?;
    } else {
        let names = team_names(&table);
        for matches in played.values() {
            print!("{}", format_matches(matches, &names));
        }
        println!("{}", message);
        print!("{}", format_table(&table));
    }

    match error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Handle the predictions command
pub fn handle_predictions<S: LeagueStore>(ctx: &mut CommandContext<S>) -> Result<()> {
    let rows = ctx.league.prediction_report()?;

    if ctx.as_json {
        return print_json(&rows);
    }
    println!("Championship predictions");
    print!("{}", format_predictions(&rows));
    Ok(())
}

/// Handle the edit-match command
pub fn handle_edit_match<S: LeagueStore>(
    ctx: &mut CommandContext<S>,
    match_id: MatchId,
    home_goals: i64,
    away_goals: i64,
) -> Result<()> {
    let score = Score::try_from_goals(home_goals, away_goals)?;
    let edit = ctx.league.edit_match_score(match_id, score)?;

    log_table(&format!("League table after editing match {}", match_id), &edit.table);
    let message = match edit.previous.score() {
        Some(old) => format!("Match {} updated from {} to {}.", match_id, old, score),
        None => format!("Match {} recorded as {}.", match_id, score),
    };

    if ctx.as_json {
        return print_json(&json!({
            "message": message,
            "previous": edit.previous,
            "updated": edit.updated,
            "league_table": edit.table,
        }));
    }
    println!("✓ {}", message);
    print!("{}", format_table(&edit.table));
    Ok(())
}

/// Handle the reset command
pub fn handle_reset<S: LeagueStore>(ctx: &mut CommandContext<S>) -> Result<()> {
    let table = ctx.league.reset_league()?;
    log_table("League table after reset", &table);

    let message = "League has been reset and a new fixture generated.";
    if ctx.as_json {
        return print_json(&json!({ "message": message, "league_table": table }));
    }
    println!("✓ {}", message);
    Ok(())
}
