//! Storage layer for the league simulator
//!
//! The orchestrator only sees the traits in `traits`; two implementations
//! back them:
//! - `schema` + `queries`: SQLite database (rusqlite)
//! - `memory`: in-memory store with identical semantics
//! - `models`: Data structures shared by both

pub mod memory;
pub mod models;
pub mod queries;
pub mod schema;
pub mod traits;

#[cfg(test)]
mod tests;

// Re-export the main types and database struct for easy access
pub use memory::InMemoryStore;
pub use models::*;
pub use schema::LeagueDatabase;
pub use traits::{LeagueStore, MatchStore, TeamStore};
