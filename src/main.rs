//! Entry point: parse CLI and dispatch to command handlers.

use anyhow::{Context, Result};
use clap::Parser;
use league_sim::{
    cli::{Commands, LeagueSim},
    commands::{
        league::{
            handle_current_week, handle_edit_match, handle_matches, handle_next_week,
            handle_play_all, handle_predictions, handle_reset, handle_table,
        },
        teams::{handle_reset_defaults, handle_set_name, handle_set_strength},
        CommandContext,
    },
    LeagueConfig, LeagueError,
};
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let app = LeagueSim::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&app.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let code = err
                .downcast_ref::<LeagueError>()
                .map(LeagueError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

/// Run the CLI.
fn run(app: LeagueSim) -> Result<()> {
    let config =
        LeagueConfig::load(app.config.as_deref()).context("failed to load configuration")?;
    let mut ctx = CommandContext::open(&config, app.db.as_deref(), app.json)
        .context("failed to open the league database")?;

    match app.command {
        Commands::Table => handle_table(&ctx)?,
        Commands::CurrentWeek => handle_current_week(&ctx)?,
        Commands::NextWeek => handle_next_week(&mut ctx)?,
        Commands::PlayAll => handle_play_all(&mut ctx)?,
        Commands::Predictions => handle_predictions(&mut ctx)?,
        Commands::Reset => handle_reset(&mut ctx)?,
        Commands::EditMatch {
            match_id,
            home_goals,
            away_goals,
        } => handle_edit_match(&mut ctx, match_id, home_goals, away_goals)?,
        Commands::SetStrength { team_id, strength } => {
            handle_set_strength(&mut ctx, team_id, strength)?
        }
        Commands::SetName { team_id, name } => handle_set_name(&mut ctx, team_id, &name)?,
        Commands::ResetDefaults => handle_reset_defaults(&mut ctx)?,
        Commands::Matches { week } => handle_matches(&ctx, week)?,
    }

    Ok(())
}
