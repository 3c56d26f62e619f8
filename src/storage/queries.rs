//! SQLite implementation of the team and match stores

use super::{
    models::{Match, NewMatch, Team},
    schema::LeagueDatabase,
    traits::{LeagueStore, MatchStore, TeamStore},
};
use crate::cli::types::{normalize_team_name, MatchId, Score, Strength, TeamId, Week};
use crate::config::TeamSeed;
use crate::engine::stats::StatDelta;
use crate::error::{LeagueError, Result, StorageContext};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

const TEAM_COLUMNS: &str = "id, name, strength, played, wins, draws, losses,
     goals_for, goals_against, goal_difference, points";

const MATCH_COLUMNS: &str =
    "id, week, home_team_id, away_team_id, home_goals, away_goals, is_played";

const RESET_STATS_SQL: &str = "UPDATE teams
     SET played = 0, wins = 0, draws = 0, losses = 0,
         goals_for = 0, goals_against = 0, goal_difference = 0, points = 0";

/// Savepoint wrapping a whole unit of work
const UNIT_SAVEPOINT: &str = "league_unit";

impl LeagueDatabase {
    fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
        Ok(Team {
            id: TeamId::new(row.get(0)?),
            name: row.get(1)?,
            strength: row.get(2)?,
            played: row.get(3)?,
            wins: row.get(4)?,
            draws: row.get(5)?,
            losses: row.get(6)?,
            goals_for: row.get(7)?,
            goals_against: row.get(8)?,
            goal_difference: row.get(9)?,
            points: row.get(10)?,
        })
    }

    fn row_to_match(row: &Row) -> rusqlite::Result<Match> {
        Ok(Match {
            id: MatchId::new(row.get(0)?),
            week: Week::new(row.get(1)?),
            home_team_id: TeamId::new(row.get(2)?),
            away_team_id: TeamId::new(row.get(3)?),
            home_goals: row.get(4)?,
            away_goals: row.get(5)?,
            is_played: row.get(6)?,
        })
    }

    fn query_matches(&self, sql: &str, week: Option<Week>) -> Result<Vec<Match>> {
        let context = match week {
            Some(week) => format!("loading matches for week {}", week),
            None => "loading all matches".to_string(),
        };
        let mut stmt = self.conn.prepare(sql).step(context.as_str())?;
        let rows = match week {
            Some(week) => stmt.query_map(params![week.as_u32()], Self::row_to_match),
            None => stmt.query_map([], Self::row_to_match),
        }
        .step(context.as_str())?;

        let mut matches = Vec::new();
        for row in rows {
            matches.push(row.step(context.as_str())?);
        }
        Ok(matches)
    }
}

fn team_id_by_name(conn: &Connection, name: &str) -> Result<Option<TeamId>> {
    conn.query_row("SELECT id FROM teams WHERE name = ?", [name], |row| {
        row.get::<_, i64>(0)
    })
    .optional()
    .step(format!("looking up team '{}'", name))
    .map(|id| id.map(TeamId::new))
}

impl TeamStore for LeagueDatabase {
    fn create_team(&mut self, name: &str, strength: Strength) -> Result<TeamId> {
        let name = normalize_team_name(name)?;
        if let Some(existing) = team_id_by_name(&self.conn, &name)? {
            debug!("Team '{}' already exists with id {}", name, existing);
            return Ok(existing);
        }

        self.conn
            .execute(
                "INSERT INTO teams (name, strength) VALUES (?, ?)",
                params![name, strength.value()],
            )
            .step(format!("inserting team '{}'", name))?;
        Ok(TeamId::new(self.conn.last_insert_rowid()))
    }

    fn team(&self, id: TeamId) -> Result<Team> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM teams WHERE id = ?", TEAM_COLUMNS),
                [id.as_i64()],
                Self::row_to_team,
            )
            .optional()
            .step(format!("loading team {}", id))?
            .ok_or(LeagueError::NotFound {
                entity: "Team",
                id: id.as_i64(),
            })
    }

    fn teams_ranked(&self) -> Result<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {} FROM teams
                 ORDER BY points DESC, goal_difference DESC, goals_for DESC, name ASC",
                TEAM_COLUMNS
            ))
            .step("loading teams")?;
        let rows = stmt
            .query_map([], Self::row_to_team)
            .step("loading teams")?;

        let mut teams = Vec::new();
        for row in rows {
            teams.push(row.step("reading team row")?);
        }
        Ok(teams)
    }

    fn apply_stat_delta(&mut self, id: TeamId, delta: &StatDelta) -> Result<()> {
        let context = format!("adjusting statistics of team {}", id);
        let sp = self.conn.savepoint().step(context.as_str())?;

        let updated = sp
            .execute(
                "UPDATE teams
                 SET played = played + ?1,
                     wins = wins + ?2,
                     draws = draws + ?3,
                     losses = losses + ?4,
                     goals_for = goals_for + ?5,
                     goals_against = goals_against + ?6,
                     points = points + ?7
                 WHERE id = ?8",
                params![
                    delta.played,
                    delta.wins,
                    delta.draws,
                    delta.losses,
                    delta.goals_for,
                    delta.goals_against,
                    delta.points,
                    id.as_i64()
                ],
            )
            .step(context.as_str())?;
        if updated == 0 {
            return Err(LeagueError::NotFound {
                entity: "Team",
                id: id.as_i64(),
            });
        }

        sp.execute(
            "UPDATE teams SET goal_difference = goals_for - goals_against WHERE id = ?",
            [id.as_i64()],
        )
        .step(format!("recomputing goal difference of team {}", id))?;

        sp.commit().step(context.as_str())?;
        Ok(())
    }

    fn set_strength(&mut self, id: TeamId, strength: Strength) -> Result<()> {
        let updated = self
            .conn
            .execute(
                "UPDATE teams SET strength = ? WHERE id = ?",
                params![strength.value(), id.as_i64()],
            )
            .step(format!("updating strength of team {}", id))?;
        if updated == 0 {
            return Err(LeagueError::NotFound {
                entity: "Team",
                id: id.as_i64(),
            });
        }
        Ok(())
    }

    fn set_name(&mut self, id: TeamId, name: &str) -> Result<()> {
        let name = normalize_team_name(name)?;
        if let Some(owner) = team_id_by_name(&self.conn, &name)? {
            if owner != id {
                return Err(LeagueError::validation(format!(
                    "name '{}' is already in use by team {}",
                    name, owner
                )));
            }
        }

        let updated = self
            .conn
            .execute(
                "UPDATE teams SET name = ? WHERE id = ?",
                params![name, id.as_i64()],
            )
            .step(format!("renaming team {}", id))?;
        if updated == 0 {
            return Err(LeagueError::NotFound {
                entity: "Team",
                id: id.as_i64(),
            });
        }
        Ok(())
    }

    fn reset_all_stats(&mut self) -> Result<()> {
        let updated = self
            .conn
            .execute(RESET_STATS_SQL, [])
            .step("resetting team statistics")?;
        if updated == 0 {
            warn!("Resetting statistics touched no rows; the teams table is empty");
        }
        debug!("Statistics reset for {} team(s)", updated);
        Ok(())
    }

    fn reset_to_defaults(&mut self, defaults: &[TeamSeed]) -> Result<()> {
        let sp = self
            .conn
            .savepoint()
            .step("starting reset to default teams")?;
        sp.execute(RESET_STATS_SQL, [])
            .step("resetting team statistics")?;

        let ids: Vec<i64> = {
            let mut stmt = sp
                .prepare("SELECT id FROM teams ORDER BY id ASC")
                .step("loading team ids")?;
            let rows = stmt
                .query_map([], |row| row.get(0))
                .step("loading team ids")?;
            rows.collect::<rusqlite::Result<_>>()
                .step("reading team ids")?
        };

        // Park the names being replaced so the defaults cannot collide with each other
        for &id in ids.iter().take(defaults.len()) {
            sp.execute(
                "UPDATE teams SET name = ? WHERE id = ?",
                params![format!("__reset_{}", id), id],
            )
            .step(format!("clearing name of team {}", id))?;
        }

        for (i, seed) in defaults.iter().enumerate() {
            match ids.get(i) {
                Some(&id) => {
                    debug!(
                        "Resetting team {} to '{}' (strength {})",
                        id, seed.name, seed.strength
                    );
                    sp.execute(
                        "UPDATE teams SET name = ?, strength = ? WHERE id = ?",
                        params![seed.name, seed.strength.value(), id],
                    )
                    .step(format!("restoring default name '{}'", seed.name))?;
                }
                None => {
                    warn!(
                        "No team at position {} for default '{}'; creating it",
                        i + 1,
                        seed.name
                    );
                    sp.execute(
                        "INSERT INTO teams (name, strength) VALUES (?, ?)",
                        params![seed.name, seed.strength.value()],
                    )
                    .step(format!("inserting default team '{}'", seed.name))?;
                }
            }
        }

        sp.commit().step("committing reset to default teams")?;
        Ok(())
    }
}

impl MatchStore for LeagueDatabase {
    fn replace_fixture(&mut self, fixture: &[NewMatch]) -> Result<()> {
        let sp = self.conn.savepoint().step("starting fixture replacement")?;
        sp.execute("DELETE FROM matches", [])
            .step("clearing existing fixture")?;

        for m in fixture {
            sp.execute(
                "INSERT INTO matches (week, home_team_id, away_team_id, is_played)
                 VALUES (?, ?, ?, 0)",
                params![
                    m.week.as_u32(),
                    m.home_team_id.as_i64(),
                    m.away_team_id.as_i64()
                ],
            )
            .step(format!(
                "inserting week {} match {} vs {}",
                m.week, m.home_team_id, m.away_team_id
            ))?;
        }

        sp.commit().step("committing fixture")?;
        debug!("Stored fixture of {} matches", fixture.len());
        Ok(())
    }

    fn matches_by_week(&self, week: Week) -> Result<Vec<Match>> {
        self.query_matches(
            &format!(
                "SELECT {} FROM matches WHERE week = ? ORDER BY id ASC",
                MATCH_COLUMNS
            ),
            Some(week),
        )
    }

    fn match_by_id(&self, id: MatchId) -> Result<Match> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM matches WHERE id = ?", MATCH_COLUMNS),
                [id.as_i64()],
                Self::row_to_match,
            )
            .optional()
            .step(format!("loading match {}", id))?
            .ok_or(LeagueError::NotFound {
                entity: "Match",
                id: id.as_i64(),
            })
    }

    fn update_result(&mut self, id: MatchId, score: Score) -> Result<()> {
        let updated = self
            .conn
            .execute(
                "UPDATE matches SET home_goals = ?, away_goals = ?, is_played = 1 WHERE id = ?",
                params![score.home, score.away, id.as_i64()],
            )
            .step(format!("recording result {} for match {}", score, id))?;
        if updated == 0 {
            return Err(LeagueError::NotFound {
                entity: "Match",
                id: id.as_i64(),
            });
        }
        Ok(())
    }

    fn all_matches(&self) -> Result<Vec<Match>> {
        self.query_matches(
            &format!(
                "SELECT {} FROM matches ORDER BY week ASC, id ASC",
                MATCH_COLUMNS
            ),
            None,
        )
    }
}

impl LeagueStore for LeagueDatabase {
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.conn
            .execute_batch(&format!("SAVEPOINT {}", UNIT_SAVEPOINT))
            .step("opening unit of work")?;

        let outcome = f(self).and_then(|value| {
            self.conn
                .execute_batch(&format!("RELEASE {}", UNIT_SAVEPOINT))
                .step("committing unit of work")?;
            Ok(value)
        });

        if outcome.is_err() && !self.conn.is_autocommit() {
            if let Err(e) = self.conn.execute_batch(&format!(
                "ROLLBACK TO {0}; RELEASE {0}",
                UNIT_SAVEPOINT
            )) {
                warn!("Rolling back unit of work failed: {}", e);
            }
        }
        outcome
    }
}
