//! Matching service - records operator choices
//!
//! Both writes share one validation rule: ids must be positive. Anything
//! else is a no-op, not an error. Existence of the ids is left to the store.

use serde::Serialize;
use crate::Result;
use crate::model::{EntityId, LeagueAssociation};
use crate::storage::SqliteStore;

/// What a write did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    LeaguePaired(LeagueAssociation),
    TeamMatched {
        source_a_team_id: EntityId,
        source_b_team_id: EntityId,
    },
    /// Input failed validation; nothing was written
    Rejected,
}

impl MatchOutcome {
    pub fn is_created(&self) -> bool {
        !matches!(self, MatchOutcome::Rejected)
    }
}

pub struct MatchingService<'a> {
    store: &'a SqliteStore,
}

impl<'a> MatchingService<'a> {
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }

    /// Record that a SourceA league and a SourceB league are the same league
    pub fn create_league_match(
        &self,
        source_a_league_id: EntityId,
        source_b_league_id: EntityId,
    ) -> Result<MatchOutcome> {
        if !ids_valid(source_a_league_id, source_b_league_id) {
            tracing::debug!(source_a_league_id, source_b_league_id, "Rejected league match");
            return Ok(MatchOutcome::Rejected);
        }

        let association = self
            .store
            .create_league_association(source_a_league_id, source_b_league_id)?;
        Ok(MatchOutcome::LeaguePaired(association))
    }

    /// Record a SourceA team's SourceB counterpart, replacing any earlier one
    pub fn create_team_match(
        &self,
        source_a_team_id: EntityId,
        source_b_team_id: EntityId,
    ) -> Result<MatchOutcome> {
        if !ids_valid(source_a_team_id, source_b_team_id) {
            tracing::debug!(source_a_team_id, source_b_team_id, "Rejected team match");
            return Ok(MatchOutcome::Rejected);
        }

        self.store.set_team_association(source_a_team_id, source_b_team_id)?;
        Ok(MatchOutcome::TeamMatched { source_a_team_id, source_b_team_id })
    }
}

fn ids_valid(a: EntityId, b: EntityId) -> bool {
    a > 0 && b > 0
}
