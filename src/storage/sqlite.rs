//! SQLite storage implementation

use std::collections::HashSet;
use std::path::Path;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use crate::{Error, Result};
use crate::model::{
    EntityId, League, LeagueAssociation, LeagueListing, LeaguePairView, Source, Team,
};
use super::schema;
use super::snapshot::CatalogSnapshot;

/// SQLite-backed storage for both catalogs and the recorded associations
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(schema::ENABLE_FOREIGN_KEYS)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Catalog Operations ==========

    /// List a source's leagues ordered by sport name, then league name
    pub fn list_leagues(&self, source: Source) -> Result<Vec<LeagueListing>> {
        let sql = format!(
            "SELECT l.id, l.sport_id, l.name, s.name
             FROM {} l
             JOIN sports s ON l.sport_id = s.id
             ORDER BY s.name, l.name, l.id",
            source.leagues_table()
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let leagues = stmt
            .query_map([], |row| {
                Ok(LeagueListing {
                    league: League {
                        id: row.get(0)?,
                        sport_id: row.get(1)?,
                        name: row.get(2)?,
                        source,
                    },
                    sport_name: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(leagues)
    }

    /// List the teams of one league ordered by name
    pub fn list_teams_in_league(&self, league_id: EntityId, source: Source) -> Result<Vec<Team>> {
        let matched_column = match source {
            Source::A => "matched_source_b_team_id",
            Source::B => "NULL",
        };
        let sql = format!(
            "SELECT id, league_id, name, {} FROM {} WHERE league_id = ?1 ORDER BY name, id",
            matched_column,
            source.teams_table()
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let teams = stmt
            .query_map([league_id], |row| self.row_to_team(row, source))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(teams)
    }

    /// Get a single team by id
    pub fn get_team(&self, id: EntityId, source: Source) -> Result<Option<Team>> {
        let matched_column = match source {
            Source::A => "matched_source_b_team_id",
            Source::B => "NULL",
        };
        let sql = format!(
            "SELECT id, league_id, name, {} FROM {} WHERE id = ?1",
            matched_column,
            source.teams_table()
        );

        self.conn
            .query_row(&sql, [id], |row| self.row_to_team(row, source))
            .optional()
            .map_err(Into::into)
    }

    /// Every SourceB team id referenced by any SourceA team, in any league
    pub fn referenced_source_b_team_ids(&self) -> Result<HashSet<EntityId>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT matched_source_b_team_id FROM source_a_teams
             WHERE matched_source_b_team_id IS NOT NULL",
        )?;

        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<HashSet<EntityId>>>()?;

        Ok(ids)
    }

    /// Helper to convert a row to a Team
    fn row_to_team(&self, row: &rusqlite::Row, source: Source) -> rusqlite::Result<Team> {
        Ok(Team {
            id: row.get(0)?,
            league_id: row.get(1)?,
            name: row.get(2)?,
            source,
            matched_source_b_team_id: row.get(3)?,
        })
    }

    /// Load a catalog snapshot in one transaction.
    ///
    /// Rows are upserted by id. An existing team-level match is left intact.
    pub fn import_catalog(&mut self, snapshot: &CatalogSnapshot) -> Result<ImportSummary> {
        let tx = self.conn.transaction()?;
        let mut summary = ImportSummary::default();

        for sport in &snapshot.sports {
            tx.execute(
                "INSERT INTO sports (id, name) VALUES (?1, ?2)
                 ON CONFLICT(id) DO UPDATE SET name = excluded.name",
                params![sport.id, sport.name],
            )?;
            summary.sports += 1;
        }

        for source in Source::all() {
            let sql = format!(
                "INSERT INTO {} (id, sport_id, name) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET sport_id = excluded.sport_id, name = excluded.name",
                source.leagues_table()
            );
            for league in snapshot.leagues_of(*source) {
                tx.execute(&sql, params![league.id, league.sport_id, league.name])?;
                summary.leagues += 1;
            }
        }

        // SourceB first: SourceA teams may already reference them
        for source in [Source::B, Source::A] {
            let sql = format!(
                "INSERT INTO {} (id, league_id, name) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET league_id = excluded.league_id, name = excluded.name",
                source.teams_table()
            );
            for team in snapshot.teams_of(source) {
                tx.execute(&sql, params![team.id, team.league_id, team.name])?;
                summary.teams += 1;
            }
        }

        tx.commit()?;
        tracing::info!(
            sports = summary.sports,
            leagues = summary.leagues,
            teams = summary.teams,
            "Imported catalog snapshot"
        );
        Ok(summary)
    }

    // ========== Association Operations ==========

    /// Record a league pair. No de-duplication: identical calls add rows.
    pub fn create_league_association(
        &self,
        source_a_league_id: EntityId,
        source_b_league_id: EntityId,
    ) -> Result<LeagueAssociation> {
        self.conn.execute(
            "INSERT INTO league_associations (source_a_league_id, source_b_league_id) VALUES (?1, ?2)",
            params![source_a_league_id, source_b_league_id],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(id, source_a_league_id, source_b_league_id, "Created league association");

        Ok(LeagueAssociation { id, source_a_league_id, source_b_league_id })
    }

    /// List league pairs ordered by SourceA sport name, then SourceA league name
    pub fn list_league_associations(&self) -> Result<Vec<LeaguePairView>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT la.id, la.source_a_league_id, la.source_b_league_id,
                   al.name, asp.name, bl.name, bsp.name
            FROM league_associations la
            JOIN source_a_leagues al ON la.source_a_league_id = al.id
            JOIN sports asp ON al.sport_id = asp.id
            JOIN source_b_leagues bl ON la.source_b_league_id = bl.id
            JOIN sports bsp ON bl.sport_id = bsp.id
            ORDER BY asp.name, al.name, la.id
            "#,
        )?;

        let pairs = stmt
            .query_map([], |row| {
                Ok(LeaguePairView {
                    association: LeagueAssociation {
                        id: row.get(0)?,
                        source_a_league_id: row.get(1)?,
                        source_b_league_id: row.get(2)?,
                    },
                    source_a_league_name: row.get(3)?,
                    source_a_sport_name: row.get(4)?,
                    source_b_league_name: row.get(5)?,
                    source_b_sport_name: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(pairs)
    }

    /// Point a SourceA team at its SourceB counterpart, replacing any previous one
    pub fn set_team_association(
        &self,
        source_a_team_id: EntityId,
        source_b_team_id: EntityId,
    ) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE source_a_teams SET matched_source_b_team_id = ?1 WHERE id = ?2",
            params![source_b_team_id, source_a_team_id],
        )?;
        if changed == 0 {
            return Err(Error::Integrity(format!(
                "no source A team with id {}",
                source_a_team_id
            )));
        }
        tracing::info!(source_a_team_id, source_b_team_id, "Set team association");
        Ok(())
    }

    // ========== Statistics ==========

    fn count(&self, sql: &str) -> Result<usize> {
        let count: i64 = self.conn.query_row(sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            sports: self.count("SELECT COUNT(*) FROM sports")?,
            source_a_leagues: self.count("SELECT COUNT(*) FROM source_a_leagues")?,
            source_b_leagues: self.count("SELECT COUNT(*) FROM source_b_leagues")?,
            source_a_teams: self.count("SELECT COUNT(*) FROM source_a_teams")?,
            source_b_teams: self.count("SELECT COUNT(*) FROM source_b_teams")?,
            league_associations: self.count("SELECT COUNT(*) FROM league_associations")?,
            matched_teams: self.count(
                "SELECT COUNT(*) FROM source_a_teams WHERE matched_source_b_team_id IS NOT NULL",
            )?,
        })
    }
}

/// Rows touched by a catalog import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub sports: usize,
    pub leagues: usize,
    pub teams: usize,
}

/// Database statistics
#[derive(Debug, Clone, Serialize)]
pub struct DbStats {
    pub sports: usize,
    pub source_a_leagues: usize,
    pub source_b_leagues: usize,
    pub source_a_teams: usize,
    pub source_b_teams: usize,
    pub league_associations: usize,
    pub matched_teams: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Sports: {}", self.sports)?;
        writeln!(f, "  Leagues (A/B): {}/{}", self.source_a_leagues, self.source_b_leagues)?;
        writeln!(f, "  Teams (A/B): {}/{}", self.source_a_teams, self.source_b_teams)?;
        writeln!(f, "  League pairs: {}", self.league_associations)?;
        writeln!(f, "  Matched teams: {}", self.matched_teams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sport;

    fn league(id: EntityId, sport_id: EntityId, name: &str, source: Source) -> League {
        League { id, sport_id, name: name.to_string(), source }
    }

    fn team(id: EntityId, league_id: EntityId, name: &str, source: Source) -> Team {
        Team { id, league_id, name: name.to_string(), source, matched_source_b_team_id: None }
    }

    fn seeded_store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let snapshot = CatalogSnapshot {
            sports: vec![
                Sport { id: 1, name: "Soccer".to_string() },
                Sport { id: 2, name: "Basketball".to_string() },
            ],
            leagues: vec![
                league(10, 1, "Premier League", Source::A),
                league(11, 2, "NBA", Source::A),
                league(12, 1, "La Liga", Source::A),
                league(20, 1, "EPL", Source::B),
            ],
            teams: vec![
                team(101, 10, "Team X", Source::A),
                team(102, 10, "Arsenal", Source::A),
                team(55, 20, "Team Y", Source::B),
            ],
        };
        store.import_catalog(&snapshot).unwrap();
        store
    }

    #[test]
    fn test_list_leagues_ordering() {
        let store = seeded_store();

        let leagues = store.list_leagues(Source::A).unwrap();
        let names: Vec<_> = leagues.iter().map(|l| l.league.name.as_str()).collect();
        assert_eq!(names, vec!["NBA", "La Liga", "Premier League"]);
        assert_eq!(leagues[0].sport_name, "Basketball");
        assert!(leagues.iter().all(|l| l.league.source == Source::A));
    }

    #[test]
    fn test_list_teams_ordered_by_name() {
        let store = seeded_store();

        let teams = store.list_teams_in_league(10, Source::A).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "Arsenal");
        assert_eq!(teams[1].name, "Team X");

        let other = store.list_teams_in_league(10, Source::B).unwrap();
        assert!(other.is_empty());
    }

    #[test]
    fn test_league_association_requires_existing_leagues() {
        let store = seeded_store();

        // 20 is a SourceB league, not a SourceA one
        let err = store.create_league_association(20, 20).unwrap_err();
        assert!(err.is_storage());

        let err = store.create_league_association(10, 999).unwrap_err();
        assert!(err.is_storage());
        assert!(store.list_league_associations().unwrap().is_empty());
    }

    #[test]
    fn test_league_association_join() {
        let store = seeded_store();

        let created = store.create_league_association(10, 20).unwrap();
        let pairs = store.list_league_associations().unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].association, created);
        assert_eq!(pairs[0].source_a_league_name, "Premier League");
        assert_eq!(pairs[0].source_b_sport_name, "Soccer");
    }

    #[test]
    fn test_set_team_association_overwrites() {
        let mut store = seeded_store();
        store
            .import_catalog(&CatalogSnapshot {
                teams: vec![team(56, 20, "Team Z", Source::B)],
                ..Default::default()
            })
            .unwrap();

        store.set_team_association(101, 55).unwrap();
        store.set_team_association(101, 56).unwrap();

        let t = store.get_team(101, Source::A).unwrap().unwrap();
        assert_eq!(t.matched_source_b_team_id, Some(56));
        assert_eq!(store.stats().unwrap().matched_teams, 1);
    }

    #[test]
    fn test_set_team_association_unknown_team() {
        let store = seeded_store();

        let err = store.set_team_association(999, 55).unwrap_err();
        assert!(matches!(err, Error::Integrity(_)));

        // SourceB ids are not SourceA teams
        let err = store.set_team_association(55, 55).unwrap_err();
        assert!(err.is_storage());

        let err = store.set_team_association(101, 4242).unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_reimport_keeps_matches() {
        let mut store = seeded_store();
        store.set_team_association(101, 55).unwrap();

        store
            .import_catalog(&CatalogSnapshot {
                teams: vec![team(101, 10, "Team X Renamed", Source::A)],
                ..Default::default()
            })
            .unwrap();

        let t = store.get_team(101, Source::A).unwrap().unwrap();
        assert_eq!(t.name, "Team X Renamed");
        assert_eq!(t.matched_source_b_team_id, Some(55));
    }

    #[test]
    fn test_import_rolls_back_on_failure() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let snapshot = CatalogSnapshot {
            sports: vec![Sport { id: 1, name: "Soccer".to_string() }],
            // sport 7 does not exist
            leagues: vec![league(10, 7, "Orphan", Source::A)],
            teams: vec![],
        };

        assert!(store.import_catalog(&snapshot).is_err());
        assert_eq!(store.stats().unwrap().sports, 0);
    }

    #[test]
    fn test_referenced_ids_are_global() {
        let store = seeded_store();
        store.set_team_association(101, 55).unwrap();
        store.set_team_association(102, 55).unwrap();

        let ids = store.referenced_source_b_team_ids().unwrap();
        assert_eq!(ids.len(), 1);
        assert!(ids.contains(&55));
    }
}
