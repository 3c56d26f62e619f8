//! Database schema and connection management

use crate::error::{Result, StorageContext};
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// SQLite-backed team and match store
pub struct LeagueDatabase {
    pub(crate) conn: Connection,
}

impl LeagueDatabase {
    /// Open (or create) the database file at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!("Opening league database at {}", path.display());
        let conn = Connection::open(path).step(format!("opening {}", path.display()))?;
        Self::with_connection(conn)
    }

    /// Fresh private database, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().step("opening in-memory database")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON")
            .step("enabling foreign keys")?;
        let db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS teams (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL UNIQUE,
                    strength INTEGER NOT NULL CHECK (strength BETWEEN 1 AND 100),
                    played INTEGER NOT NULL DEFAULT 0,
                    wins INTEGER NOT NULL DEFAULT 0,
                    draws INTEGER NOT NULL DEFAULT 0,
                    losses INTEGER NOT NULL DEFAULT 0,
                    goals_for INTEGER NOT NULL DEFAULT 0,
                    goals_against INTEGER NOT NULL DEFAULT 0,
                    goal_difference INTEGER NOT NULL DEFAULT 0,
                    points INTEGER NOT NULL DEFAULT 0
                )",
                [],
            )
            .step("creating teams table")?;

        // Goals are present exactly when the match has been played
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS matches (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    week INTEGER NOT NULL CHECK (week >= 1),
                    home_team_id INTEGER NOT NULL REFERENCES teams(id),
                    away_team_id INTEGER NOT NULL REFERENCES teams(id),
                    home_goals INTEGER CHECK (home_goals >= 0),
                    away_goals INTEGER CHECK (away_goals >= 0),
                    is_played INTEGER NOT NULL DEFAULT 0,
                    CHECK (
                        (is_played = 0 AND home_goals IS NULL AND away_goals IS NULL)
                        OR (is_played = 1 AND home_goals IS NOT NULL AND away_goals IS NOT NULL)
                    )
                )",
                [],
            )
            .step("creating matches table")?;

        self.conn
            .execute(
                "CREATE INDEX IF NOT EXISTS idx_matches_week ON matches(week)",
                [],
            )
            .step("creating week index")?;

        Ok(())
    }
}
