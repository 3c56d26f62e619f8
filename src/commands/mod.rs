//! Command implementations for the league simulator CLI

pub mod league;
pub mod render;
pub mod teams;

#[cfg(test)]
mod tests;

use crate::{
    config::{LeagueConfig, TeamSeed},
    league::League,
    storage::{LeagueDatabase, LeagueStore},
    Result,
};
use std::path::Path;
use tracing::info;

/// Context containing the resources every command needs
pub struct CommandContext<S: LeagueStore> {
    pub league: League<S>,
    pub defaults: Vec<TeamSeed>,
    pub as_json: bool,
}

impl CommandContext<LeagueDatabase> {
    /// Open the database (`db_path`, else the configured location) and
    /// bootstrap the league
    pub fn open(config: &LeagueConfig, db_path: Option<&Path>, as_json: bool) -> Result<Self> {
        let path = match db_path {
            Some(path) => path.to_path_buf(),
            None => config.database.resolve_path()?,
        };
        info!("Using database at {}", path.display());
        let db = LeagueDatabase::open(&path)?;
        Self::new(db, config, as_json)
    }
}

impl<S: LeagueStore> CommandContext<S> {
    /// Wrap `store` in a league, seeding teams and fixture if they are missing
    pub fn new(store: S, config: &LeagueConfig, as_json: bool) -> Result<Self> {
        let mut league = League::new(store, config.simulation.clone());
        league.bootstrap(&config.default_teams)?;
        Ok(Self {
            league,
            defaults: config.default_teams.clone(),
            as_json,
        })
    }
}
