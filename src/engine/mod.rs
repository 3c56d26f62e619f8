//! League simulation engine
//!
//! Pure building blocks with no storage access:
//! - `fixture`: four-team double round-robin schedule
//! - `outcome`: strength-driven match simulator
//! - `standings`: table ordering
//! - `stats`: win/draw/loss deltas for results and score edits
//! - `progress`: current playable week from the match set
//! - `predictor`: Monte-Carlo championship odds

pub mod fixture;
pub mod outcome;
pub mod predictor;
pub mod progress;
pub mod standings;
pub mod stats;

pub use fixture::{generate_fixture, FIXTURE_TEAM_COUNT, SEASON_WEEKS};
pub use outcome::OutcomeModel;
pub use predictor::{leader_takes_all, simulate_championship, ChampionshipOdds};
pub use progress::{season_progress, SeasonProgress};
pub use standings::{compare_standings, rank_teams, standings};
pub use stats::{edit_deltas, outcome_metrics, result_deltas, OutcomeMetrics, StatDelta};
