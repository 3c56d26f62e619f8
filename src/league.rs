//! League orchestration: playing weeks, editing scores and resetting the season.
//!
//! `League` owns a store and the simulation settings. Every operation reads
//! the authoritative state from the store, so the current week is never cached.
//! Writes that span several rows run inside [`LeagueStore::atomically`].

use crate::cli::types::{MatchId, Score, Strength, TeamId, Week};
use crate::config::{SimulationConfig, TeamSeed};
use crate::engine::fixture::{generate_fixture, FIXTURE_TEAM_COUNT};
use crate::engine::predictor::{leader_takes_all, simulate_championship, ChampionshipOdds};
use crate::engine::progress::{fixture_weeks, season_progress, SeasonProgress};
use crate::engine::standings::standings;
use crate::error::{LeagueError, Result};
use crate::storage::{LeagueStore, Match, Team};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};


/// Result of asking for the next week to be played.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WeekOutcome {
    Played {
        week: Week,
        matches: Vec<Match>,
        table: Vec<Team>,
    },
    /// Nothing left to play; carries the final table.
    SeasonComplete { table: Vec<Team> },
}

impl WeekOutcome {
    pub fn table(&self) -> &[Team] {
        match self {
            WeekOutcome::Played { table, .. } | WeekOutcome::SeasonComplete { table } => table,
        }
    }
}

/// Weeks played by a successful play-all run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayAllReport {
    pub played: BTreeMap<Week, Vec<Match>>,
    pub table: Vec<Team>,
}

/// A play-all run that stopped on an error. Weeks played before the failure
/// stay committed and are reported here.
#[derive(Debug, Error)]
#[error("play-all stopped after {} completed week(s): {}", .played.len(), .error)]
pub struct PlayAllFailure {
    pub played: BTreeMap<Week, Vec<Match>>,
    #[source]
    pub error: LeagueError,
}

/// Outcome of a score edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEdit {
    pub previous: Match,
    pub updated: Match,
    pub table: Vec<Team>,
}

/// Where the season currently stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeekReport {
    pub current_week: i64,
    pub status: &'static str,
    pub total_weeks: u32,
    pub completed_weeks: u32,
}

/// One line of the prediction report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRow {
    pub team_id: TeamId,
    pub team_name: String,
    pub probability_percentage: f64,
}

/// Season orchestrator over any [`LeagueStore`].
pub struct League<S: LeagueStore> {
    store: S,
    config: SimulationConfig,
    rng: StdRng,
}

impl<S: LeagueStore> League<S> {
    /// Build a league over `store`. The RNG is seeded once here: from the
    /// configured seed if there is one, otherwise from entropy.
    pub fn new(store: S, config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { store, config, rng }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed the default teams when fewer than four exist, and generate the
    /// fixture when no matches are stored yet.
    pub fn bootstrap(&mut self, defaults: &[TeamSeed]) -> Result<()> {
        let existing = self.store.teams_ranked()?.len();
        if existing < FIXTURE_TEAM_COUNT {
            info!(
                "Found {} team(s), seeding {} default team(s)",
                existing,
                defaults.len()
            );
            for seed in defaults {
                self.store.create_team(&seed.name, seed.strength)?;
            }
        }

        if self.store.all_matches()?.is_empty() {
            info!("No fixture stored, generating a new season");
            self.reset_league()?;
        }
        Ok(())
    }

    /// Current standings.
    pub fn table(&self) -> Result<Vec<Team>> {
        Ok(standings(self.store.teams_ranked()?))
    }

    pub fn progress(&self) -> Result<SeasonProgress> {
        Ok(season_progress(&self.store.all_matches()?))
    }

    /// Current playable week: 1 before the fixture exists, -1 once complete.
    pub fn current_week(&self) -> Result<i64> {
        Ok(self.progress()?.current_week_number())
    }

    pub fn current_week_report(&self) -> Result<CurrentWeekReport> {
        let matches = self.store.all_matches()?;
        let progress = season_progress(&matches);
        let total_weeks = fixture_weeks(&matches);
        Ok(CurrentWeekReport {
            current_week: progress.current_week_number(),
            status: progress.label(),
            total_weeks,
            completed_weeks: progress.completed_weeks(total_weeks),
        })
    }

    /// All matches, or only those of `week`.
    pub fn matches(&self, week: Option<Week>) -> Result<Vec<Match>> {
        match week {
            Some(week) => self.store.matches_by_week(week),
            None => self.store.all_matches(),
        }
    }

    /// Simulate every unplayed match of the current week.
    ///
    /// Matches already played in that week are returned unchanged, so a week
    /// interrupted by a failure can be resumed by calling this again.
    pub fn play_next_week(&mut self) -> Result<WeekOutcome> {
        let week = match self.progress()? {
            SeasonProgress::Complete => {
                info!("Season complete, nothing left to play");
                return Ok(WeekOutcome::SeasonComplete {
                    table: self.table()?,
                });
            }
            SeasonProgress::NotStarted => Week::new(1),
            SeasonProgress::InProgress(week) => week,
        };

        let scheduled = self.store.matches_by_week(week)?;
        if scheduled.is_empty() {
            return Err(LeagueError::FixtureMissing {
                week: week.as_u32(),
            });
        }

        let mut results = Vec::with_capacity(scheduled.len());
        for m in scheduled {
            if m.is_played {
                debug!("Match {} of week {} already played, skipping", m.id, week);
                results.push(m);
                continue;
            }
            results.push(self.simulate_match(&m)?);
        }

        info!("Week {} played ({} match(es))", week, results.len());
        Ok(WeekOutcome::Played {
            week,
            matches: results,
            table: self.table()?,
        })
    }

    /// Simulate one match and record it with both teams' statistics.
    fn simulate_match(&mut self, m: &Match) -> Result<Match> {
        let model = self.config.outcome;
        let rng = &mut self.rng;
        let (home_id, away_id, match_id) = (m.home_team_id, m.away_team_id, m.id);

        let played = self.store.atomically(|store| {
            let home = store.team(home_id)?;
            let away = store.team(away_id)?;
            let score = model.simulate(rng, home.strength as i64, away.strength as i64);

            store.update_result(match_id, score)?;
            store.apply_result_delta(home_id, score.home, score.away)?;
            store.apply_result_delta(away_id, score.away, score.home)?;
            debug!("{} {} {}", home.name, score, away.name);
            store.match_by_id(match_id)
        })?;
        Ok(played)
    }

    /// Play weeks until the season is complete, at most
    /// `max_play_iterations` times. Stops on the first failing week.
    pub fn play_all_remaining(&mut self) -> std::result::Result<PlayAllReport, PlayAllFailure> {
        let mut played = BTreeMap::new();

        for _ in 0..self.config.max_play_iterations {
            match self.play_next_week() {
                Ok(WeekOutcome::Played { week, matches, .. }) => {
                    played.insert(week, matches);
                }
                Ok(WeekOutcome::SeasonComplete { .. }) => break,
                Err(error) => {
                    warn!("Play-all stopped after {} week(s): {}", played.len(), error);
                    return Err(PlayAllFailure { played, error });
                }
            }
        }

        let finished = self
            .progress()
            .and_then(|progress| Ok((progress.is_complete(), self.table()?)));
        match finished {
            Ok((complete, table)) => {
                if !complete {
                    warn!(
                        "Play-all hit the cap of {} week(s) before the season finished",
                        self.config.max_play_iterations
                    );
                }
                Ok(PlayAllReport { played, table })
            }
            Err(error) => Err(PlayAllFailure { played, error }),
        }
    }

    /// Overwrite a match score and adjust both teams by the difference
    /// between the old and new results.
    pub fn edit_match_score(&mut self, id: MatchId, score: Score) -> Result<ScoreEdit> {
        score.validate()?;
        let (previous, updated) = self.store.atomically(|store| {
            let previous = store.match_by_id(id)?;
            let old = previous.score();

            store.update_result(id, score)?;
            store.apply_edit_delta(
                previous.home_team_id,
                old.map(|s| s.home_view()),
                score.home_view(),
            )?;
            store.apply_edit_delta(
                previous.away_team_id,
                old.map(|s| s.away_view()),
                score.away_view(),
            )?;

            let updated = store.match_by_id(id)?;
            Ok((previous, updated))
        })?;

        match previous.score() {
            Some(old) => info!("Match {} edited from {} to {}", id, old, score),
            None => info!("Match {} recorded as {} (was unplayed)", id, score),
        }

        Ok(ScoreEdit {
            previous,
            updated,
            table: self.table()?,
        })
    }

    /// Championship probability per team.
    pub fn predictions(&mut self) -> Result<ChampionshipOdds> {
        let matches = self.store.all_matches()?;
        let progress = season_progress(&matches);
        let table = self.table()?;

        if progress.is_complete() {
            return Ok(leader_takes_all(&table));
        }

        let completed_weeks = progress.completed_weeks(fixture_weeks(&matches));
        if completed_weeks < self.config.min_completed_weeks {
            return Err(LeagueError::PredictionsNotReady {
                completed_weeks,
                required: self.config.min_completed_weeks,
            });
        }

        let remaining: Vec<Match> = matches.into_iter().filter(|m| !m.is_played).collect();
        if remaining.is_empty() {
            warn!("Season reported unfinished but no unplayed matches remain, using current table");
            return Ok(leader_takes_all(&table));
        }

        let seed: u64 = self.rng.gen();
        info!(
            "Running {} trial(s) over {} remaining match(es)",
            self.config.trials,
            remaining.len()
        );
        Ok(simulate_championship(
            &table,
            &remaining,
            &self.config.outcome,
            self.config.trials,
            seed,
        ))
    }

    /// Predictions joined with team names, highest probability first.
    pub fn prediction_report(&mut self) -> Result<Vec<PredictionRow>> {
        let odds = self.predictions()?;
        let mut rows: Vec<PredictionRow> = self
            .table()?
            .into_iter()
            .filter_map(|team| {
                odds.get(&team.id).map(|p| PredictionRow {
                    team_id: team.id,
                    team_name: team.name,
                    probability_percentage: p * 100.0,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.probability_percentage.total_cmp(&a.probability_percentage));
        Ok(rows)
    }

    /// Zero every statistic and regenerate the fixture from the top four teams.
    pub fn reset_league(&mut self) -> Result<Vec<Team>> {
        self.store.atomically(|store| {
            store.reset_all_stats()?;

            let teams = standings(store.teams_ranked()?);
            if teams.len() < FIXTURE_TEAM_COUNT {
                return Err(LeagueError::InsufficientTeams {
                    required: FIXTURE_TEAM_COUNT,
                    found: teams.len(),
                });
            }

            let ids: Vec<TeamId> = teams
                .iter()
                .take(FIXTURE_TEAM_COUNT)
                .map(|team| team.id)
                .collect();
            let fixture = generate_fixture(&ids)?;
            store.replace_fixture(&fixture)
        })?;

        info!("League reset, new fixture generated");
        self.table()
    }

    /// Restore the default names and strengths, then reset the league.
    pub fn reset_teams_to_defaults(&mut self, defaults: &[TeamSeed]) -> Result<Vec<Team>> {
        self.store.reset_to_defaults(defaults)?;
        info!("Teams restored to {} default(s)", defaults.len());
        self.reset_league()
    }

    pub fn set_team_strength(&mut self, id: TeamId, strength: Strength) -> Result<Team> {
        self.store.set_strength(id, strength)?;
        info!("Team {} strength set to {}", id, strength);
        self.store.team(id)
    }

    pub fn set_team_name(&mut self, id: TeamId, name: &str) -> Result<Team> {
        self.store.set_name(id, name)?;
        let team = self.store.team(id)?;
        info!("Team {} renamed to '{}'", id, team.name);
        Ok(team)
    }
}
