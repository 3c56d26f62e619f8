//! League table ordering.

use crate::storage::Team;
use std::cmp::Ordering;

/// Points, then goal difference, then goals scored; all descending.
///
/// Teams equal on all three keys compare equal; with no name or id fallback
/// their relative order is whatever the input had.
pub fn compare_standings(a: &Team, b: &Team) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Sort `teams` into table order in place. The sort is stable.
pub fn rank_teams(teams: &mut [Team]) {
    teams.sort_by(compare_standings);
}

/// Owned variant of [`rank_teams`].
pub fn standings(mut teams: Vec<Team>) -> Vec<Team> {
    rank_teams(&mut teams);
    teams
}
