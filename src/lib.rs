//! # Matchdesk - Manual catalog reconciliation
//!
//! Lets an operator record that leagues and teams coming from two
//! independently maintained catalogs (SourceA and SourceB) denote the same
//! real-world entity.
//!
//! Matchdesk provides:
//! - Typed catalog records (sports, leagues, teams) and association records
//! - SQLite-backed storage for catalogs and operator-recorded associations
//! - Unmatched-set resolution for a chosen league pair
//! - A matching service that validates and records operator choices
//! - A CLI and an HTTP surface over the same core

pub mod model;
pub mod storage;
pub mod matching;
pub mod server;
pub mod ui;
pub mod config;

// Re-exports for convenient access
pub use model::{
    EntityId, League, LeagueAssociation, LeagueListing, LeaguePairView, Source, Sport, Team,
    UnmatchedTeams,
};
pub use storage::SqliteStore;
pub use matching::{MatchDesk, MatchOutcome, MatchingService, UnmatchedSetResolver};

/// Result type alias for Matchdesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Matchdesk operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// A write addressed a row that does not exist. Surfaced like any other
    /// storage failure.
    #[error("Storage error: {0}")]
    Integrity(String),

    #[error("Invalid source: {0}")]
    InvalidSource(String),

    #[error("Invalid league pair: {0}")]
    InvalidLeaguePair(String),

    #[error("Invalid catalog file: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Storage-class failures abort the request in flight.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Integrity(_))
    }
}
