//! CLI argument definitions and parsing.

pub mod types;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use types::{MatchId, Strength, TeamId, Week};

#[derive(Debug, Parser)]
#[clap(
    name = "league-sim",
    about = "Four-team football league simulator",
    version
)]
pub struct LeagueSim {
    /// Output results as JSON instead of text lines.
    #[clap(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to `<config dir>/league-sim/config.json`).
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (or set `LEAGUE_SIM_DB` env var).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level when `RUST_LOG` is not set (trace, debug, info, warn, error).
    #[clap(long, global = true, default_value = "info")]
    pub log_level: String,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current league table
    Table,

    /// Show the current playable week (-1 once the season is complete)
    CurrentWeek,

    /// Simulate every unplayed match of the current week
    NextWeek,

    /// Simulate the rest of the season
    PlayAll,

    /// Monte-Carlo championship probabilities
    Predictions,

    /// Zero all statistics and generate a new fixture
    Reset,

    /// Overwrite a match score, adjusting both teams' statistics
    EditMatch {
        /// Match ID.
        match_id: MatchId,

        /// Home team goals.
        #[clap(allow_negative_numbers = true)]
        home_goals: i64,

        /// Away team goals.
        #[clap(allow_negative_numbers = true)]
        away_goals: i64,
    },

    /// Change a team's strength rating (1-100)
    SetStrength {
        /// Team ID.
        team_id: TeamId,

        /// New strength rating.
        strength: Strength,
    },

    /// Rename a team
    SetName {
        /// Team ID.
        team_id: TeamId,

        /// New, unique team name.
        name: String,
    },

    /// Restore default team names and strengths, then reset the league
    ResetDefaults,

    /// List fixture matches
    Matches {
        /// Only show this week.
        #[clap(long, short)]
        week: Option<Week>,
    },
}
