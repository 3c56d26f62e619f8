//! Data models for the storage layer

use crate::cli::types::{MatchId, Score, TeamId, Week};
use crate::engine::stats::StatDelta;
use serde::{Deserialize, Serialize};

/// A league team with its cumulative table statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub strength: u8,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
}

impl Team {
    /// A freshly seeded team with zeroed statistics.
    pub fn new(id: TeamId, name: impl Into<String>, strength: u8) -> Self {
        Self {
            id,
            name: name.into(),
            strength,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    /// Add `delta` to the counters. Goal difference is recomputed, never offset.
    pub fn apply(&mut self, delta: &StatDelta) {
        self.played = self.played.saturating_add_signed(delta.played);
        self.wins = self.wins.saturating_add_signed(delta.wins);
        self.draws = self.draws.saturating_add_signed(delta.draws);
        self.losses = self.losses.saturating_add_signed(delta.losses);
        self.goals_for = self.goals_for.saturating_add_signed(delta.goals_for);
        self.goals_against = self.goals_against.saturating_add_signed(delta.goals_against);
        self.points = self.points.saturating_add_signed(delta.points);
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;
    }

    /// Zero every statistic, keeping identity, name and strength.
    pub fn reset_stats(&mut self) {
        *self = Team::new(self.id, std::mem::take(&mut self.name), self.strength);
    }
}

/// A fixture entry. Goals are present exactly when `is_played` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub week: Week,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_goals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_goals: Option<u32>,
    pub is_played: bool,
}

impl Match {
    /// The recorded score, if the match has been played.
    pub fn score(&self) -> Option<Score> {
        match (self.is_played, self.home_goals, self.away_goals) {
            (true, Some(home), Some(away)) => Some(Score::new(home, away)),
            _ => None,
        }
    }

    /// Mark the match as played with `score`.
    pub fn record(&mut self, score: Score) {
        self.home_goals = Some(score.home);
        self.away_goals = Some(score.away);
        self.is_played = true;
    }
}

/// A match produced by the fixture generator, before it has been stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    pub week: Week,
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
}
