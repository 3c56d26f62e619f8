//! Season progress derived from the stored match set.

use crate::cli::types::Week;
use crate::storage::Match;
use serde::Serialize;
use std::collections::BTreeMap;

/// Where the season stands. Always recomputed from the full match list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "week", rename_all = "snake_case")]
pub enum SeasonProgress {
    /// No fixture has been generated yet.
    NotStarted,
    /// Earliest week that still has an unplayed match.
    InProgress(Week),
    /// Every stored match has been played.
    Complete,
}

impl SeasonProgress {
    /// Numeric form used by the external interface: 1 before the fixture
    /// exists, -1 once the season is over, otherwise the playable week.
    pub fn current_week_number(&self) -> i64 {
        match self {
            SeasonProgress::NotStarted => 1,
            SeasonProgress::InProgress(week) => week.as_u32() as i64,
            SeasonProgress::Complete => -1,
        }
    }

    /// Number of leading weeks that are fully played.
    pub fn completed_weeks(&self, total_weeks: u32) -> u32 {
        match self {
            SeasonProgress::NotStarted => 0,
            SeasonProgress::InProgress(week) => week.as_u32().saturating_sub(1),
            SeasonProgress::Complete => total_weeks,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SeasonProgress::Complete)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeasonProgress::NotStarted => "Not Started",
            SeasonProgress::InProgress(_) => "In Progress",
            SeasonProgress::Complete => "Completed",
        }
    }
}

/// Group `matches` by week and find the earliest week with unplayed games.
pub fn season_progress(matches: &[Match]) -> SeasonProgress {
    if matches.is_empty() {
        return SeasonProgress::NotStarted;
    }

    let mut weeks: BTreeMap<Week, bool> = BTreeMap::new();
    for m in matches {
        let all_played = weeks.entry(m.week).or_insert(true);
        *all_played &= m.is_played;
    }

    weeks
        .into_iter()
        .find(|(_, all_played)| !all_played)
        .map(|(week, _)| SeasonProgress::InProgress(week))
        .unwrap_or(SeasonProgress::Complete)
}

/// Number of distinct weeks in the fixture.
pub fn fixture_weeks(matches: &[Match]) -> u32 {
    let mut weeks: Vec<Week> = matches.iter().map(|m| m.week).collect();
    weeks.sort();
    weeks.dedup();
    weeks.len() as u32
}
