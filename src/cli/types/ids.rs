//! ID types for teams, matches and fixture weeks.

use crate::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for team ids.
///
/// Keeps team ids from being mixed up with match ids or week numbers.
///
/// # Examples
///
/// ```rust
/// use league_sim::TeamId;
///
/// let team_id = TeamId::new(3);
/// assert_eq!(team_id.as_i64(), 3);
/// assert_eq!(team_id.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub i64);

impl TeamId {
    /// Create a new TeamId from a raw row id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying row id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TeamId {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        parse_id(s, "team").map(Self)
    }
}

/// Type-safe wrapper for match ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchId(pub i64);

impl MatchId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MatchId {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        parse_id(s, "match").map(Self)
    }
}

/// Fixture round number, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Week(pub u32);

impl Week {
    pub fn new(week: u32) -> Self {
        Self(week)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        let week: u32 = s
            .trim()
            .parse()
            .map_err(|_| LeagueError::validation(format!("invalid week number '{}'", s)))?;
        if week == 0 {
            return Err(LeagueError::validation("week numbers start at 1"));
        }
        Ok(Self(week))
    }
}

fn parse_id(s: &str, what: &str) -> Result<i64> {
    s.trim()
        .parse()
        .map_err(|_| LeagueError::validation(format!("invalid {} id '{}': must be a number", what, s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_id_from_str() {
        assert_eq!("12".parse::<TeamId>().unwrap(), TeamId::new(12));
        assert!("abc".parse::<TeamId>().is_err());
    }

    #[test]
    fn test_match_id_display() {
        assert_eq!(MatchId::new(7).to_string(), "7");
    }

    #[test]
    fn test_week_rejects_zero() {
        assert!("0".parse::<Week>().is_err());
        assert_eq!(" 3 ".parse::<Week>().unwrap(), Week::new(3));
    }

    #[test]
    fn test_weeks_order_numerically() {
        let mut weeks = vec![Week::new(10), Week::new(2), Week::new(5)];
        weeks.sort();
        assert_eq!(weeks, vec![Week::new(2), Week::new(5), Week::new(10)]);
    }
}
