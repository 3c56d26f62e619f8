//! In-memory store with the same semantics as the SQLite database.

use super::{
    models::{Match, NewMatch, Team},
    traits::{LeagueStore, MatchStore, TeamStore},
};
use crate::cli::types::{normalize_team_name, MatchId, Score, Strength, TeamId, Week};
use crate::config::TeamSeed;
use crate::engine::standings::rank_teams;
use crate::engine::stats::StatDelta;
use crate::error::{LeagueError, Result};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    teams: BTreeMap<TeamId, Team>,
    matches: BTreeMap<MatchId, Match>,
    last_team_id: i64,
    last_match_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn team_mut(&mut self, id: TeamId) -> Result<&mut Team> {
        self.teams.get_mut(&id).ok_or(LeagueError::NotFound {
            entity: "Team",
            id: id.as_i64(),
        })
    }

    fn team_id_by_name(&self, name: &str) -> Option<TeamId> {
        self.teams
            .values()
            .find(|team| team.name == name)
            .map(|team| team.id)
    }

    fn insert_team(&mut self, name: String, strength: Strength) -> TeamId {
        self.last_team_id += 1;
        let id = TeamId::new(self.last_team_id);
        self.teams.insert(id, Team::new(id, name, strength.value()));
        id
    }
}

impl TeamStore for InMemoryStore {
    fn create_team(&mut self, name: &str, strength: Strength) -> Result<TeamId> {
        let name = normalize_team_name(name)?;
        if let Some(existing) = self.team_id_by_name(&name) {
            return Ok(existing);
        }
        Ok(self.insert_team(name, strength))
    }

    fn team(&self, id: TeamId) -> Result<Team> {
        self.teams.get(&id).cloned().ok_or(LeagueError::NotFound {
            entity: "Team",
            id: id.as_i64(),
        })
    }

    fn teams_ranked(&self) -> Result<Vec<Team>> {
        let mut teams: Vec<Team> = self.teams.values().cloned().collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        rank_teams(&mut teams);
        Ok(teams)
    }

    fn apply_stat_delta(&mut self, id: TeamId, delta: &StatDelta) -> Result<()> {
        self.team_mut(id)?.apply(delta);
        Ok(())
    }

    fn set_strength(&mut self, id: TeamId, strength: Strength) -> Result<()> {
        self.team_mut(id)?.strength = strength.value();
        Ok(())
    }

    fn set_name(&mut self, id: TeamId, name: &str) -> Result<()> {
        let name = normalize_team_name(name)?;
        if let Some(owner) = self.team_id_by_name(&name) {
            if owner != id {
                return Err(LeagueError::validation(format!(
                    "name '{}' is already in use by team {}",
                    name, owner
                )));
            }
        }
        self.team_mut(id)?.name = name;
        Ok(())
    }

    fn reset_all_stats(&mut self) -> Result<()> {
        self.teams.values_mut().for_each(Team::reset_stats);
        Ok(())
    }

    fn reset_to_defaults(&mut self, defaults: &[TeamSeed]) -> Result<()> {
        let mut staged = self.clone();
        staged.reset_all_stats()?;

        let ids: Vec<TeamId> = staged.teams.keys().copied().collect();
        for (i, seed) in defaults.iter().enumerate() {
            match ids.get(i) {
                Some(id) => {
                    let team = staged.team_mut(*id)?;
                    team.name = seed.name.clone();
                    team.strength = seed.strength.value();
                }
                None => {
                    staged.insert_team(seed.name.clone(), seed.strength);
                }
            }
        }

        let mut names: Vec<&str> = staged.teams.values().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(LeagueError::validation(format!(
                "default name '{}' is already in use by another team",
                pair[0]
            )));
        }

        *self = staged;
        Ok(())
    }
}

impl MatchStore for InMemoryStore {
    fn replace_fixture(&mut self, fixture: &[NewMatch]) -> Result<()> {
        for m in fixture {
            for id in [m.home_team_id, m.away_team_id] {
                if !self.teams.contains_key(&id) {
                    return Err(LeagueError::NotFound {
                        entity: "Team",
                        id: id.as_i64(),
                    });
                }
            }
        }

        self.matches.clear();
        for m in fixture {
            self.last_match_id += 1;
            let id = MatchId::new(self.last_match_id);
            self.matches.insert(
                id,
                Match {
                    id,
                    week: m.week,
                    home_team_id: m.home_team_id,
                    away_team_id: m.away_team_id,
                    home_goals: None,
                    away_goals: None,
                    is_played: false,
                },
            );
        }
        Ok(())
    }

    fn matches_by_week(&self, week: Week) -> Result<Vec<Match>> {
        Ok(self
            .matches
            .values()
            .filter(|m| m.week == week)
            .cloned()
            .collect())
    }

    fn match_by_id(&self, id: MatchId) -> Result<Match> {
        self.matches.get(&id).cloned().ok_or(LeagueError::NotFound {
            entity: "Match",
            id: id.as_i64(),
        })
    }

    fn update_result(&mut self, id: MatchId, score: Score) -> Result<()> {
        self.matches
            .get_mut(&id)
            .ok_or(LeagueError::NotFound {
                entity: "Match",
                id: id.as_i64(),
            })?
            .record(score);
        Ok(())
    }

    fn all_matches(&self) -> Result<Vec<Match>> {
        let mut matches: Vec<Match> = self.matches.values().cloned().collect();
        matches.sort_by_key(|m| (m.week, m.id));
        Ok(matches)
    }
}

impl LeagueStore for InMemoryStore {
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.clone();
        let outcome = f(self);
        if outcome.is_err() {
            *self = snapshot;
        }
        outcome
    }
}
