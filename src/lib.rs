//! Football League Simulator Library
//!
//! Simulates a four-team double round-robin league: fixture generation,
//! strength-based match simulation, standings, retroactive score edits and
//! Monte-Carlo championship predictions.
//!
//! ## Features
//!
//! - **Fixture Generation**: Six-week home-and-away schedule for four teams
//! - **Match Simulation**: Binomial scoring model driven by team strength
//! - **Score Edits**: Statistics adjusted by the difference between old and new results
//! - **Predictions**: Parallel Monte-Carlo replays of the remaining season
//! - **Storage**: SQLite database or in-memory store behind the same traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use league_sim::{config::LeagueConfig, league::League, storage::LeagueDatabase};
//!
//! # fn example() -> league_sim::Result<()> {
//! let config = LeagueConfig::default();
//! let db = LeagueDatabase::open_in_memory()?;
//! let mut league = League::new(db, config.simulation.clone());
//! league.bootstrap(&config.default_teams)?;
//!
//! league.play_next_week()?;
//! for team in league.table()? {
//!     println!("{} {}", team.name, team.points);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at a specific database file:
//! ```bash
//! export LEAGUE_SIM_DB=/tmp/league.db
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod league;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{MatchId, Score, Strength, TeamId, Week};
pub use config::{LeagueConfig, DB_PATH_ENV_VAR};
pub use error::{ErrorKind, LeagueError, Result};
pub use league::League;
