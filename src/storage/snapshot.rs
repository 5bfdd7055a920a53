//! Catalog snapshot files
//!
//! A snapshot is a TOML document listing the catalog rows to load:
//!
//! ```toml
//! [[sports]]
//! id = 1
//! name = "Soccer"
//!
//! [[leagues]]
//! id = 10
//! sport_id = 1
//! name = "Premier League"
//! source = "a"
//!
//! [[teams]]
//! id = 101
//! league_id = 10
//! name = "Team X"
//! source = "a"
//! ```

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::Result;
use crate::model::{League, Source, Sport, Team};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub sports: Vec<Sport>,
    #[serde(default)]
    pub leagues: Vec<League>,
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl CatalogSnapshot {
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn leagues_of(&self, source: Source) -> impl Iterator<Item = &League> {
        self.leagues.iter().filter(move |l| l.source == source)
    }

    pub fn teams_of(&self, source: Source) -> impl Iterator<Item = &Team> {
        self.teams.iter().filter(move |t| t.source == source)
    }
}
