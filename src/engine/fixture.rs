//! Double round-robin fixture for a four-team league.

use crate::cli::types::{TeamId, Week};
use crate::error::{LeagueError, Result};
use crate::storage::NewMatch;

/// Number of teams the pairing template is defined for.
pub const FIXTURE_TEAM_COUNT: usize = 4;

/// Weeks in a full season (two legs of three rounds).
pub const SEASON_WEEKS: u32 = 6;

/// First-leg rounds as index pairs `(home, away)` into the team list.
/// The second leg replays the same rounds with home and away swapped.
const FIRST_LEG: [[(usize, usize); 2]; 3] = [
    [(0, 1), (2, 3)],
    [(0, 2), (1, 3)],
    [(0, 3), (1, 2)],
];

/// Build the 12-match, 6-week schedule for exactly four teams.
///
/// Every pair of teams meets twice, once at each ground. Any other team count
/// is rejected before a single match is produced.
pub fn generate_fixture(team_ids: &[TeamId]) -> Result<Vec<NewMatch>> {
    if team_ids.len() != FIXTURE_TEAM_COUNT {
        return Err(LeagueError::InvalidTeamCount {
            expected: FIXTURE_TEAM_COUNT,
            found: team_ids.len(),
        });
    }

    let first_leg = FIRST_LEG.iter().map(|round| {
        round
            .iter()
            .map(|&(home, away)| (team_ids[home], team_ids[away]))
            .collect::<Vec<_>>()
    });
    let second_leg = FIRST_LEG.iter().map(|round| {
        round
            .iter()
            .map(|&(home, away)| (team_ids[away], team_ids[home]))
            .collect::<Vec<_>>()
    });

    let fixture = first_leg
        .chain(second_leg)
        .zip(1..)
        .flat_map(|(round, week)| {
            round.into_iter().map(move |(home, away)| NewMatch {
                week: Week::new(week),
                home_team_id: home,
                away_team_id: away,
            })
        })
        .collect();

    Ok(fixture)
}
