//! Monte-Carlo championship odds.
//!
//! Each trial clones the current table, plays every remaining match through
//! the [`OutcomeModel`], ranks the result and credits the leader. Trials run in
//! parallel on rayon's pool; each owns its table clone and RNG, and the
//! per-thread tallies are merged after the join.

use super::outcome::OutcomeModel;
use super::standings::{rank_teams, standings};
use super::stats::result_deltas;
use crate::cli::types::TeamId;
use crate::storage::{Match, Team};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};


/// Championship probability per team, in `[0, 1]`.
pub type ChampionshipOdds = BTreeMap<TeamId, f64>;

/// Leader of `teams` (after ranking) gets 1.0, everyone else 0.0.
pub fn leader_takes_all(teams: &[Team]) -> ChampionshipOdds {
    let table = standings(teams.to_vec());
    table
        .iter()
        .enumerate()
        .map(|(rank, team)| (team.id, if rank == 0 { 1.0 } else { 0.0 }))
        .collect()
}

/// Estimate championship odds by replaying `remaining` matches `trials` times.
///
/// `teams` is the current snapshot in table order; strengths are read from it
/// and never change during a trial. Trial `n` is seeded with `seed + n`, so a
/// given seed reproduces the same odds regardless of thread scheduling.
pub fn simulate_championship(
    teams: &[Team],
    remaining: &[Match],
    model: &OutcomeModel,
    trials: u32,
    seed: u64,
) -> ChampionshipOdds {
    if remaining.is_empty() || trials == 0 || teams.is_empty() {
        return leader_takes_all(teams);
    }

    let index: HashMap<TeamId, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, team)| (team.id, i))
        .collect();
    let pairings: Vec<(usize, usize)> = remaining
        .iter()
        .filter_map(|m| Some((*index.get(&m.home_team_id)?, *index.get(&m.away_team_id)?)))
        .collect();

    let tally = (0..trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(trial as u64));
            run_trial(teams, &pairings, model, &mut rng)
        })
        .fold(BTreeMap::new, |mut acc: BTreeMap<TeamId, u32>, champion| {
            if let Some(id) = champion {
                *acc.entry(id).or_default() += 1;
            }
            acc
        })
        .reduce(BTreeMap::new, |mut left, right| {
            for (id, wins) in right {
                *left.entry(id).or_default() += wins;
            }
            left
        });

    teams
        .iter()
        .map(|team| {
            let wins = tally.get(&team.id).copied().unwrap_or(0);
            (team.id, wins as f64 / trials as f64)
        })
        .collect()
}

/// Play one season completion on a private copy of the table.
fn run_trial(
    teams: &[Team],
    pairings: &[(usize, usize)],
    model: &OutcomeModel,
    rng: &mut StdRng,
) -> Option<TeamId> {
    let mut table = teams.to_vec();
    for &(home, away) in pairings {
        let score = model.simulate(
            rng,
            teams[home].strength as i64,
            teams[away].strength as i64,
        );
        let (home_delta, away_delta) = result_deltas(score);
        table[home].apply(&home_delta);
        table[away].apply(&away_delta);
    }
    rank_teams(&mut table);
    table.first().map(|team| team.id)
}
