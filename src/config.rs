//! Runtime configuration for the league simulator
//!
//! Everything is optional: a missing field takes its default, and a missing
//! config file at the default location means "all defaults".

use crate::cli::types::{normalize_team_name, Strength};
use crate::engine::outcome::OutcomeModel;
use crate::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};


/// Environment variable that overrides the database location.
pub const DB_PATH_ENV_VAR: &str = "LEAGUE_SIM_DB";

const APP_DIR: &str = "league-sim";
const CONFIG_FILE: &str = "config.json";
const DB_FILE: &str = "league.db";

/// Name and strength a team gets when the league is seeded or reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeed {
    pub name: String,
    pub strength: Strength,
}

impl TeamSeed {
    pub fn new(name: impl Into<String>, strength: u8) -> Self {
        Self {
            name: name.into(),
            strength: Strength::saturating(strength),
        }
    }
}

/// Where the SQLite database lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Explicit database file. `None` means the per-user cache directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl DatabaseConfig {
    /// Resolve the database file: `LEAGUE_SIM_DB`, then the configured path,
    /// then `<cache_dir>/league-sim/league.db`.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(DB_PATH_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        dirs::cache_dir()
            .map(|dir| dir.join(APP_DIR).join(DB_FILE))
            .ok_or_else(|| LeagueError::Config {
                message: "could not determine a cache directory for the database".to_string(),
            })
    }
}

/// Knobs for match simulation and season control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub outcome: OutcomeModel,

    /// Monte Carlo trials per prediction request.
    #[serde(default = "default_trials")]
    pub trials: u32,

    /// Weeks that must be fully played before predictions are offered.
    #[serde(default = "default_min_completed_weeks")]
    pub min_completed_weeks: u32,

    /// Safety cap on the number of weeks a single play-all may advance.
    #[serde(default = "default_max_play_iterations")]
    pub max_play_iterations: u32,

    /// Fixed RNG seed for reproducible runs. `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_trials() -> u32 {
    2000
}

fn default_min_completed_weeks() -> u32 {
    4
}

fn default_max_play_iterations() -> u32 {
    10
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            outcome: OutcomeModel::default(),
            trials: default_trials(),
            min_completed_weeks: default_min_completed_weeks(),
            max_play_iterations: default_max_play_iterations(),
            seed: None,
        }
    }
}

/// Top-level configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default = "default_teams")]
    pub default_teams: Vec<TeamSeed>,
}

/// The four clubs a fresh league starts with.
pub fn default_teams() -> Vec<TeamSeed> {
    vec![
        TeamSeed::new("Chelsea", 85),
        TeamSeed::new("Arsenal", 82),
        TeamSeed::new("Manchester City", 90),
        TeamSeed::new("Liverpool", 88),
    ]
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            simulation: SimulationConfig::default(),
            default_teams: default_teams(),
        }
    }
}

impl LeagueConfig {
    /// `<config_dir>/league-sim/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                Some(path) => {
                    debug!("No config file at {}, using defaults", path.display());
                    return Ok(Self::default());
                }
                None => {
                    warn!("Could not determine a config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(&path)?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LeagueConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;
        if sim.outcome.divisor == 0 {
            return Err(config_error("simulation divisor must be greater than 0"));
        }
        if sim.trials == 0 {
            return Err(config_error("simulation trials must be greater than 0"));
        }
        if sim.max_play_iterations == 0 {
            return Err(config_error("play-all iteration cap must be greater than 0"));
        }

        if self.default_teams.is_empty() {
            return Err(config_error("at least one default team is required"));
        }
        let mut seen = BTreeSet::new();
        for seed in &self.default_teams {
            let name = normalize_team_name(&seed.name)
                .map_err(|_| config_error("default team names cannot be empty"))?;
            if name != seed.name {
                return Err(config_error(format!(
                    "default team name '{}' has surrounding whitespace",
                    seed.name
                )));
            }
            if !seen.insert(name) {
                return Err(config_error(format!(
                    "default team '{}' is listed more than once",
                    seed.name
                )));
            }
        }

        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> LeagueError {
    LeagueError::Config {
        message: message.into(),
    }
}
