//! Points, wins, draws and losses derived from goal tallies.
//!
//! Both normal play and score correction go through [`outcome_metrics`]; the
//! edit path only ever applies the difference between two of its results.

use crate::cli::types::Score;
use std::ops::Sub;


/// Table contribution of a single result from one side's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeMetrics {
    pub points: i32,
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

/// 3 points for a win, 1 for a draw, none for a loss.
pub fn outcome_metrics(goals_for: u32, goals_against: u32) -> OutcomeMetrics {
    if goals_for > goals_against {
        OutcomeMetrics {
            points: 3,
            win: 1,
            draw: 0,
            loss: 0,
        }
    } else if goals_for < goals_against {
        OutcomeMetrics {
            points: 0,
            win: 0,
            draw: 0,
            loss: 1,
        }
    } else {
        OutcomeMetrics {
            points: 1,
            win: 0,
            draw: 1,
            loss: 0,
        }
    }
}

/// Signed change to a team's cumulative statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatDelta {
    pub played: i32,
    pub wins: i32,
    pub draws: i32,
    pub losses: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
}

impl StatDelta {
    /// Contribution of one result, excluding the played count. Goal counts
    /// past `i32::MAX` saturate; edits reject them before this point.
    fn contribution(goals_for: u32, goals_against: u32) -> Self {
        let metrics = outcome_metrics(goals_for, goals_against);
        Self {
            played: 0,
            wins: metrics.win,
            draws: metrics.draw,
            losses: metrics.loss,
            goals_for: i32::try_from(goals_for).unwrap_or(i32::MAX),
            goals_against: i32::try_from(goals_against).unwrap_or(i32::MAX),
            points: metrics.points,
        }
    }

    /// Delta for a newly played match.
    pub fn for_result(goals_for: u32, goals_against: u32) -> Self {
        Self {
            played: 1,
            ..Self::contribution(goals_for, goals_against)
        }
    }

    /// Delta for replacing `old` with `new` as the result of the same match.
    ///
    /// A match that was never played has no prior contribution, so the edit
    /// counts it as played for the first time: `played` goes up by one rather
    /// than staying untouched, and no 0-0 draw is subtracted.
    pub fn for_edit(old: Option<(u32, u32)>, new: (u32, u32)) -> Self {
        match old {
            Some((old_for, old_against)) => {
                Self::contribution(new.0, new.1) - Self::contribution(old_for, old_against)
            }
            None => Self::for_result(new.0, new.1),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl Sub for StatDelta {
    type Output = StatDelta;

    fn sub(self, rhs: StatDelta) -> StatDelta {
        StatDelta {
            played: self.played - rhs.played,
            wins: self.wins - rhs.wins,
            draws: self.draws - rhs.draws,
            losses: self.losses - rhs.losses,
            goals_for: self.goals_for - rhs.goals_for,
            goals_against: self.goals_against - rhs.goals_against,
            points: self.points - rhs.points,
        }
    }
}

/// Deltas for `(home, away)` after a freshly simulated match.
pub fn result_deltas(score: Score) -> (StatDelta, StatDelta) {
    let (home_for, home_against) = score.home_view();
    let (away_for, away_against) = score.away_view();
    (
        StatDelta::for_result(home_for, home_against),
        StatDelta::for_result(away_for, away_against),
    )
}

/// Deltas for `(home, away)` when a match result changes from `old` to `new`.
pub fn edit_deltas(old: Option<Score>, new: Score) -> (StatDelta, StatDelta) {
    (
        StatDelta::for_edit(old.map(|s| s.home_view()), new.home_view()),
        StatDelta::for_edit(old.map(|s| s.away_view()), new.away_view()),
    )
}
