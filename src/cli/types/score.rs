//! Validated match scores and team strength ratings.

use crate::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted strength rating.
pub const MIN_STRENGTH: i64 = 1;
/// Highest accepted strength rating.
pub const MAX_STRENGTH: i64 = 100;
/// Most goals one side may be credited with in a single match.
pub const MAX_GOALS: u32 = 99;

/// Final score of a match from the home side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }

    /// Build a score from untrusted input, rejecting negative goal counts and
    /// anything above [`MAX_GOALS`].
    pub fn try_from_goals(home: i64, away: i64) -> Result<Self> {
        if home < 0 || away < 0 {
            return Err(LeagueError::validation(format!(
                "goals cannot be negative (received {}-{})",
                home, away
            )));
        }
        let home = u32::try_from(home)
            .map_err(|_| LeagueError::validation(format!("home goals {} out of range", home)))?;
        let away = u32::try_from(away)
            .map_err(|_| LeagueError::validation(format!("away goals {} out of range", away)))?;
        let score = Self { home, away };
        score.validate()?;
        Ok(score)
    }

    /// Reject goal counts above [`MAX_GOALS`].
    pub fn validate(&self) -> Result<()> {
        if self.home > MAX_GOALS || self.away > MAX_GOALS {
            return Err(LeagueError::validation(format!(
                "goals cannot exceed {} (received {})",
                MAX_GOALS, self
            )));
        }
        Ok(())
    }

    /// `(goals_for, goals_against)` for the home team.
    pub fn home_view(&self) -> (u32, u32) {
        (self.home, self.away)
    }

    /// `(goals_for, goals_against)` for the away team.
    pub fn away_view(&self) -> (u32, u32) {
        (self.away, self.home)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Team strength rating, always within `MIN_STRENGTH..=MAX_STRENGTH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Strength(u8);

impl Strength {
    pub fn new(value: i64) -> Result<Self> {
        if !(MIN_STRENGTH..=MAX_STRENGTH).contains(&value) {
            return Err(LeagueError::InvalidStrength { value });
        }
        Ok(Self(value as u8))
    }

    /// Clamp `value` into the accepted range.
    pub const fn saturating(value: u8) -> Self {
        if value < MIN_STRENGTH as u8 {
            Self(MIN_STRENGTH as u8)
        } else if value > MAX_STRENGTH as u8 {
            Self(MAX_STRENGTH as u8)
        } else {
            Self(value)
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Strength {
    type Error = LeagueError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Strength> for i64 {
    fn from(strength: Strength) -> i64 {
        strength.0 as i64
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Strength {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| LeagueError::validation(format!("invalid strength '{}'", s)))?;
        Self::new(value)
    }
}

/// Trim a team name and reject empty ones.
pub fn normalize_team_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LeagueError::validation("team name cannot be empty"));
    }
    Ok(trimmed.to_string())
}
