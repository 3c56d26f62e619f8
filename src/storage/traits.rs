//! Storage capabilities consumed by the league orchestrator.
//!
//! Both the SQLite database and the in-memory store implement these traits.
//! Lookups of unknown ids return [`LeagueError::NotFound`](crate::LeagueError::NotFound)
//! so callers can tell a missing row apart from a storage failure.

use super::models::{Match, NewMatch, Team};
use crate::cli::types::{MatchId, Score, Strength, TeamId, Week};
use crate::config::TeamSeed;
use crate::engine::stats::StatDelta;
use crate::error::Result;

pub trait TeamStore {
    /// Insert a team with zeroed statistics. If the name already exists the
    /// existing team's id is returned instead.
    fn create_team(&mut self, name: &str, strength: Strength) -> Result<TeamId>;

    fn team(&self, id: TeamId) -> Result<Team>;

    /// All teams ordered by points, goal difference, goals for, then name.
    fn teams_ranked(&self) -> Result<Vec<Team>>;

    /// Add `delta` to a team's counters and recompute its goal difference.
    fn apply_stat_delta(&mut self, id: TeamId, delta: &StatDelta) -> Result<()>;

    fn set_strength(&mut self, id: TeamId, strength: Strength) -> Result<()>;

    /// Rename a team. The name is trimmed and must be unique.
    fn set_name(&mut self, id: TeamId, name: &str) -> Result<()>;

    fn reset_all_stats(&mut self) -> Result<()>;

    /// Zero all statistics and give the teams, in id order, the default
    /// names and strengths. Missing default teams are created.
    fn reset_to_defaults(&mut self, defaults: &[TeamSeed]) -> Result<()>;

    /// Record a newly played match for one side.
    fn apply_result_delta(&mut self, id: TeamId, goals_for: u32, goals_against: u32) -> Result<()> {
        self.apply_stat_delta(id, &StatDelta::for_result(goals_for, goals_against))
    }

    /// Replace one side's contribution from `old` to `new` for an edited match.
    fn apply_edit_delta(
        &mut self,
        id: TeamId,
        old: Option<(u32, u32)>,
        new: (u32, u32),
    ) -> Result<()> {
        self.apply_stat_delta(id, &StatDelta::for_edit(old, new))
    }
}

pub trait MatchStore {
    /// Delete every match and insert `fixture` as one unit.
    fn replace_fixture(&mut self, fixture: &[NewMatch]) -> Result<()>;

    /// Matches of one week, in id order.
    fn matches_by_week(&self, week: Week) -> Result<Vec<Match>>;

    fn match_by_id(&self, id: MatchId) -> Result<Match>;

    /// Overwrite the score and mark the match played.
    fn update_result(&mut self, id: MatchId, score: Score) -> Result<()>;

    /// Every match, ordered by week then id.
    fn all_matches(&self) -> Result<Vec<Match>>;
}

/// A store holding both teams and matches that can group writes atomically.
pub trait LeagueStore: TeamStore + MatchStore {
    /// Run `f` as a single unit of work: if it returns `Err`, every write it
    /// made is rolled back before the error is returned.
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>;
}
