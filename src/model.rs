//! Catalog and association records
//!
//! Both catalogs share the same shape:
//! - `Sport`: shared taxonomy
//! - `League`: belongs to one sport, tagged with its source
//! - `Team`: belongs to one league, tagged with its source
//!
//! Leagues are paired through `LeagueAssociation` rows. Teams are paired
//! through a single nullable reference owned by the SourceA team.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Identifier of a catalog or association row
pub type EntityId = i64;

/// The catalog a league or team comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Owns the team-level link
    A,
    /// Referenced side of the team-level link
    B,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::A => "a",
            Source::B => "b",
        }
    }

    pub fn leagues_table(&self) -> &'static str {
        match self {
            Source::A => "source_a_leagues",
            Source::B => "source_b_leagues",
        }
    }

    pub fn teams_table(&self) -> &'static str {
        match self {
            Source::A => "source_a_teams",
            Source::B => "source_b_teams",
        }
    }

    pub fn all() -> &'static [Source] {
        &[Source::A, Source::B]
    }
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "a" | "source_a" | "sourcea" => Ok(Source::A),
            "b" | "source_b" | "sourceb" => Ok(Source::B),
            _ => Err(Error::InvalidSource(s.to_string())),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    pub id: EntityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: EntityId,
    pub sport_id: EntityId,
    pub name: String,
    pub source: Source,
}

/// A catalog team.
///
/// `matched_source_b_team_id` is only ever set on SourceA teams. Several
/// SourceA teams may point at the same SourceB team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: EntityId,
    pub league_id: EntityId,
    pub name: String,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_source_b_team_id: Option<EntityId>,
}

impl Team {
    pub fn is_matched(&self) -> bool {
        self.matched_source_b_team_id.is_some()
    }
}

/// Operator-recorded equivalence between a SourceA and a SourceB league.
///
/// Append-only. The same pair may be recorded any number of times; `id`
/// tells the rows apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueAssociation {
    pub id: EntityId,
    pub source_a_league_id: EntityId,
    pub source_b_league_id: EntityId,
}

/// A league joined with the name of its sport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueListing {
    pub league: League,
    pub sport_name: String,
}

/// Contiguous run of leagues sharing one sport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SportGroup {
    pub sport_name: String,
    pub leagues: Vec<League>,
}

/// Group an ordered listing by sport name.
///
/// Input is expected in sport-name order (as `list_leagues` returns it);
/// each change of sport name starts a new group.
pub fn group_by_sport(listings: &[LeagueListing]) -> Vec<SportGroup> {
    let mut groups: Vec<SportGroup> = Vec::new();
    for listing in listings {
        match groups.last_mut() {
            Some(group) if group.sport_name == listing.sport_name => {
                group.leagues.push(listing.league.clone());
            }
            _ => groups.push(SportGroup {
                sport_name: listing.sport_name.clone(),
                leagues: vec![listing.league.clone()],
            }),
        }
    }
    groups
}

/// A league association joined with both leagues' names and sports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaguePairView {
    pub association: LeagueAssociation,
    pub source_a_league_name: String,
    pub source_a_sport_name: String,
    pub source_b_league_name: String,
    pub source_b_sport_name: String,
}

impl LeaguePairView {
    /// Composite value used to select this pair: `"<a id>,<b id>"`
    pub fn selector_value(&self) -> String {
        format!(
            "{},{}",
            self.association.source_a_league_id, self.association.source_b_league_id
        )
    }

    pub fn label(&self) -> String {
        format!(
            "{} - {} ↔ {}",
            self.source_a_sport_name, self.source_a_league_name, self.source_b_league_name
        )
    }
}

/// Teams still lacking a counterpart for one league pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedTeams {
    pub source_a: Vec<Team>,
    pub source_b: Vec<Team>,
}

impl UnmatchedTeams {
    /// Both sides exhausted; the league pair is fully reconciled.
    pub fn is_empty(&self) -> bool {
        self.source_a.is_empty() && self.source_b.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: EntityId, sport: &str, name: &str) -> LeagueListing {
        LeagueListing {
            league: League { id, sport_id: 1, name: name.to_string(), source: Source::A },
            sport_name: sport.to_string(),
        }
    }

    #[test]
    fn test_source_parse() {
        assert_eq!("a".parse::<Source>().unwrap(), Source::A);
        assert_eq!("Source_B".parse::<Source>().unwrap(), Source::B);
        assert!("c".parse::<Source>().is_err());
    }

    #[test]
    fn test_group_by_sport() {
        let listings = vec![
            listing(1, "Basketball", "NBA"),
            listing(2, "Soccer", "La Liga"),
            listing(3, "Soccer", "Serie A"),
        ];

        let groups = group_by_sport(&listings);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].sport_name, "Basketball");
        assert_eq!(groups[1].leagues.len(), 2);
        assert_eq!(groups[1].leagues[1].name, "Serie A");
    }

    #[test]
    fn test_pair_view_formatting() {
        let view = LeaguePairView {
            association: LeagueAssociation { id: 1, source_a_league_id: 10, source_b_league_id: 20 },
            source_a_league_name: "Premier League".to_string(),
            source_a_sport_name: "Soccer".to_string(),
            source_b_league_name: "EPL".to_string(),
            source_b_sport_name: "Soccer".to_string(),
        };

        assert_eq!(view.selector_value(), "10,20");
        assert_eq!(view.label(), "Soccer - Premier League ↔ EPL");
    }
}
