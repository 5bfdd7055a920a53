//! Operator page orchestration
//!
//! One request runs the submitted writes first, then gathers everything the
//! page shows. Any storage failure aborts the whole request.

use serde::Serialize;
use crate::Result;
use crate::model::{LeagueListing, LeaguePairView, Source, UnmatchedTeams};
use crate::storage::SqliteStore;
use super::request::{Mode, PageRequest, PairSelection};
use super::resolver::UnmatchedSetResolver;
use super::service::MatchingService;

/// Everything needed to render the operator page
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub mode: Mode,
    pub source_a_leagues: Vec<LeagueListing>,
    pub source_b_leagues: Vec<LeagueListing>,
    pub league_pairs: Vec<LeaguePairView>,
    pub selected_league_pair: Option<String>,
    /// `None` until a league pair is selected
    pub unmatched: Option<UnmatchedTeams>,
}

pub struct MatchDesk<'a> {
    store: &'a SqliteStore,
}

impl<'a> MatchDesk<'a> {
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }

    pub fn handle(&self, request: &PageRequest) -> Result<PageView> {
        let service = MatchingService::new(self.store);

        if let Some(write) = request.league_match {
            service.create_league_match(write.source_a_league_id, write.source_b_league_id)?;
        }
        if let Some(write) = request.team_match {
            service.create_team_match(write.source_a_team_id, write.source_b_team_id)?;
        }

        let resolver = UnmatchedSetResolver::new(self.store);
        let unmatched = match &request.selection {
            PairSelection::None => None,
            PairSelection::Valid(pair) => Some(
                resolver.unmatched_teams(pair.source_a_league_id, pair.source_b_league_id)?,
            ),
            PairSelection::Invalid(_) => Some(UnmatchedTeams::default()),
        };

        Ok(PageView {
            mode: request.mode,
            source_a_leagues: self.store.list_leagues(Source::A)?,
            source_b_leagues: self.store.list_leagues(Source::B)?,
            league_pairs: self.store.list_league_associations()?,
            selected_league_pair: request.selected_value.clone(),
            unmatched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::request::RawPageParams;
    use crate::model::{League, Sport, Team};
    use crate::storage::CatalogSnapshot;

    fn store() -> SqliteStore {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .import_catalog(&CatalogSnapshot {
                sports: vec![Sport { id: 1, name: "Soccer".to_string() }],
                leagues: vec![
                    League { id: 10, sport_id: 1, name: "Premier League".to_string(), source: Source::A },
                    League { id: 20, sport_id: 1, name: "EPL".to_string(), source: Source::B },
                ],
                teams: vec![
                    Team {
                        id: 101,
                        league_id: 10,
                        name: "Team X".to_string(),
                        source: Source::A,
                        matched_source_b_team_id: None,
                    },
                    Team {
                        id: 55,
                        league_id: 20,
                        name: "Team Y".to_string(),
                        source: Source::B,
                        matched_source_b_team_id: None,
                    },
                ],
            })
            .unwrap();
        store
    }

    #[test]
    fn test_league_phase_write_then_read() {
        let store = store();
        let desk = MatchDesk::new(&store);

        let request = PageRequest::from_raw(&RawPageParams {
            create_league_pair: Some("1".to_string()),
            source_a_league_id: Some("10".to_string()),
            source_b_league_id: Some("20".to_string()),
            ..Default::default()
        });
        let view = desk.handle(&request).unwrap();

        assert_eq!(view.mode, Mode::League);
        assert_eq!(view.source_a_leagues.len(), 1);
        assert_eq!(view.source_b_leagues.len(), 1);
        assert_eq!(view.league_pairs.len(), 1);
        assert!(view.unmatched.is_none());
    }

    #[test]
    fn test_team_phase_with_selection() {
        let store = store();
        store.create_league_association(10, 20).unwrap();
        let desk = MatchDesk::new(&store);

        let request = PageRequest::from_raw(&RawPageParams {
            mode: Some("team".to_string()),
            league_pair: Some("10,20".to_string()),
            ..Default::default()
        });
        let view = desk.handle(&request).unwrap();
        let unmatched = view.unmatched.unwrap();
        assert_eq!(unmatched.source_a[0].id, 101);
        assert_eq!(unmatched.source_b[0].id, 55);
        assert_eq!(view.selected_league_pair.as_deref(), Some("10,20"));

        let request = PageRequest::from_raw(&RawPageParams {
            mode: Some("team".to_string()),
            create_team_pair: Some("1".to_string()),
            source_a_team_id: Some("101".to_string()),
            source_b_team_id: Some("55".to_string()),
            league_pair: Some("10,20".to_string()),
            ..Default::default()
        });
        let view = desk.handle(&request).unwrap();
        assert!(view.unmatched.unwrap().is_empty());
    }

    #[test]
    fn test_malformed_selection_renders_empty() {
        let store = store();
        let desk = MatchDesk::new(&store);

        let request = PageRequest::from_raw(&RawPageParams {
            mode: Some("team".to_string()),
            league_pair: Some("10".to_string()),
            ..Default::default()
        });
        let view = desk.handle(&request).unwrap();
        assert_eq!(view.unmatched, Some(UnmatchedTeams::default()));
    }

    #[test]
    fn test_storage_failure_aborts_request() {
        let store = store();
        let desk = MatchDesk::new(&store);

        let request = PageRequest::from_raw(&RawPageParams {
            create_team_pair: Some("1".to_string()),
            source_a_team_id: Some("404".to_string()),
            source_b_team_id: Some("55".to_string()),
            ..Default::default()
        });
        assert!(desk.handle(&request).unwrap_err().is_storage());
    }
}
