//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - sports(id, name)
//! - source_a_leagues / source_b_leagues(id, sport_id, name)
//! - source_a_teams(id, league_id, name, matched_source_b_team_id)
//! - source_b_teams(id, league_id, name)
//! - league_associations(id, source_a_league_id, source_b_league_id)

pub mod schema;
pub mod snapshot;
pub mod sqlite;

pub use snapshot::CatalogSnapshot;
pub use sqlite::{DbStats, SqliteStore};
