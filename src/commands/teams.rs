//! Team administration commands

use super::{
    render::{format_table, log_table, print_json},
    CommandContext,
};
use crate::{
    cli::types::{Strength, TeamId},
    storage::LeagueStore,
    Result,
};
use serde_json::json;

/// Handle the set-strength command
pub fn handle_set_strength<S: LeagueStore>(
    ctx: &mut CommandContext<S>,
    team_id: TeamId,
    strength: Strength,
) -> Result<()> {
    let team = ctx.league.set_team_strength(team_id, strength)?;

    if ctx.as_json {
        return print_json(&team);
    }
    println!("✓ {} strength set to {}", team.name, team.strength);
    Ok(())
}

/// Handle the set-name command
pub fn handle_set_name<S: LeagueStore>(
    ctx: &mut CommandContext<S>,
    team_id: TeamId,
    name: &str,
) -> Result<()> {
    let team = ctx.league.set_team_name(team_id, name)?;

    if ctx.as_json {
        return print_json(&team);
    }
    println!("✓ Team {} is now called {}", team.id, team.name);
    Ok(())
}

/// Handle the reset-defaults command
pub fn handle_reset_defaults<S: LeagueStore>(ctx: &mut CommandContext<S>) -> Result<()> {
    let table = ctx.league.reset_teams_to_defaults(&ctx.defaults)?;
    log_table("League table after restoring default teams", &table);

    let message = "Teams restored to defaults and the league has been reset.";
    if ctx.as_json {
        return print_json(&json!({ "message": message, "league_table": table }));
    }
    println!("✓ {}", message);
    print!("{}", format_table(&table));
    Ok(())
}
