//! Type-safe wrappers for league data.

pub mod ids;
pub mod score;

pub use ids::{MatchId, TeamId, Week};
pub use score::{normalize_team_name, Score, Strength, MAX_STRENGTH, MIN_STRENGTH};
