//! Unmatched-set resolution
//!
//! For a chosen league pair, computes the teams on each side that have no
//! recorded counterpart. The two sides use different rules:
//! 1. SourceA: teams of the SourceA league whose own link is unset
//! 2. SourceB: teams of the SourceB league that no SourceA team anywhere
//!    points at (a global anti-join, not scoped to the paired league)
//!
//! Results are recomputed from the store on every call.

use crate::Result;
use crate::model::{EntityId, Source, UnmatchedTeams};
use crate::storage::SqliteStore;
use super::request::LeaguePair;

pub struct UnmatchedSetResolver<'a> {
    store: &'a SqliteStore,
}

impl<'a> UnmatchedSetResolver<'a> {
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }

    /// Teams still lacking a counterpart, each side ordered by name
    pub fn unmatched_teams(
        &self,
        source_a_league_id: EntityId,
        source_b_league_id: EntityId,
    ) -> Result<UnmatchedTeams> {
        let source_a = self
            .store
            .list_teams_in_league(source_a_league_id, Source::A)?
            .into_iter()
            .filter(|team| !team.is_matched())
            .collect();

        let referenced = self.store.referenced_source_b_team_ids()?;
        let source_b = self
            .store
            .list_teams_in_league(source_b_league_id, Source::B)?
            .into_iter()
            .filter(|team| !referenced.contains(&team.id))
            .collect();

        let unmatched = UnmatchedTeams { source_a, source_b };
        tracing::debug!(
            source_a_league_id,
            source_b_league_id,
            source_a = unmatched.source_a.len(),
            source_b = unmatched.source_b.len(),
            "Resolved unmatched teams"
        );
        Ok(unmatched)
    }

    /// Resolve a raw `"<a id>,<b id>"` selection.
    ///
    /// A malformed selection yields an empty result instead of an error.
    pub fn unmatched_for_selection(&self, selection: &str) -> Result<UnmatchedTeams> {
        match LeaguePair::parse(selection) {
            Ok(pair) => self.unmatched_teams(pair.source_a_league_id, pair.source_b_league_id),
            Err(e) => {
                tracing::debug!("Ignoring league pair selection: {}", e);
                Ok(UnmatchedTeams::default())
            }
        }
    }
}
