//! Error types for the league simulator

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, LeagueError>;

/// Coarse classification of failures, used by callers to pick a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input from the caller. Never retried.
    Validation,
    /// Unknown team or match id.
    NotFound,
    /// The operation is not available yet (e.g. predictions before week 5).
    PreconditionFailed,
    /// Stored state contradicts itself (e.g. a week with no fixture).
    StateConflict,
    /// Transaction, commit or connection failure.
    StorageFailure,
    /// Local I/O or configuration failure.
    Internal,
}

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Fixture generation requires exactly {expected} teams, received {found}")]
    InvalidTeamCount { expected: usize, found: usize },

    #[error("Invalid strength value {value}: strength must be between 1 and 100")]
    InvalidStrength { value: i64 },

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error(
        "Championship predictions are available after at least {required} weeks are completed ({completed_weeks} completed so far)"
    )]
    PredictionsNotReady { completed_weeks: u32, required: u32 },

    #[error("No matches found for week {week}; the fixture is missing or incomplete")]
    FixtureMissing { week: u32 },

    #[error("At least {required} teams are required to generate a fixture, found {found}")]
    InsufficientTeams { required: usize, found: usize },

    #[error("Storage failure while {context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl LeagueError {
    pub fn validation(message: impl Into<String>) -> Self {
        LeagueError::Validation {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LeagueError::Validation { .. }
            | LeagueError::InvalidTeamCount { .. }
            | LeagueError::InvalidStrength { .. } => ErrorKind::Validation,
            LeagueError::NotFound { .. } => ErrorKind::NotFound,
            LeagueError::PredictionsNotReady { .. } => ErrorKind::PreconditionFailed,
            LeagueError::FixtureMissing { .. } | LeagueError::InsufficientTeams { .. } => {
                ErrorKind::StateConflict
            }
            LeagueError::Storage { .. } => ErrorKind::StorageFailure,
            LeagueError::Json(_) | LeagueError::Io(_) | LeagueError::Config { .. } => {
                ErrorKind::Internal
            }
        }
    }

    /// Process exit code used by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Validation => 2,
            ErrorKind::NotFound => 3,
            ErrorKind::PreconditionFailed => 4,
            ErrorKind::StateConflict => 5,
            ErrorKind::StorageFailure | ErrorKind::Internal => 1,
        }
    }
}

/// Attaches the failing step to a raw SQLite error.
pub trait StorageContext<T> {
    fn step(self, context: impl Into<String>) -> Result<T>;
}

impl<T> StorageContext<T> for std::result::Result<T, rusqlite::Error> {
    fn step(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|source| LeagueError::Storage {
            context: context.into(),
            source,
        })
    }
}
