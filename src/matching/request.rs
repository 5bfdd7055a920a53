//! Typed request descriptor
//!
//! The presentation boundary hands over loose string parameters. They are
//! validated here once, before anything reaches the matching service.
//! Invalid writes are dropped silently rather than reported.

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};
use crate::model::EntityId;

/// Reconciliation phase being rendered or acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    League,
    Team,
}

impl Mode {
    /// Missing or empty means `league`; anything else that is not `league`
    /// renders the team phase.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("league") => Mode::League,
            Some(_) => Mode::Team,
        }
    }
}

/// A chosen league pair, parsed from `"<source A league id>,<source B league id>"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaguePair {
    pub source_a_league_id: EntityId,
    pub source_b_league_id: EntityId,
}

impl LeaguePair {
    pub fn parse(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split(',').collect();
        if parts.len() != 2 {
            return Err(Error::InvalidLeaguePair(value.to_string()));
        }

        let source_a_league_id = parse_positive_id(parts[0])
            .ok_or_else(|| Error::InvalidLeaguePair(value.to_string()))?;
        let source_b_league_id = parse_positive_id(parts[1])
            .ok_or_else(|| Error::InvalidLeaguePair(value.to_string()))?;

        Ok(Self { source_a_league_id, source_b_league_id })
    }
}

impl FromStr for LeaguePair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for LeaguePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.source_a_league_id, self.source_b_league_id)
    }
}

/// Parse an identifier that must be a positive integer
pub fn parse_positive_id(value: &str) -> Option<EntityId> {
    value.trim().parse::<EntityId>().ok().filter(|id| *id > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueMatchRequest {
    pub source_a_league_id: EntityId,
    pub source_b_league_id: EntityId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMatchRequest {
    pub source_a_team_id: EntityId,
    pub source_b_team_id: EntityId,
}

/// Request parameters as the presentation boundary delivers them
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPageParams {
    pub mode: Option<String>,
    pub create_league_pair: Option<String>,
    pub source_a_league_id: Option<String>,
    pub source_b_league_id: Option<String>,
    pub create_team_pair: Option<String>,
    pub source_a_team_id: Option<String>,
    pub source_b_team_id: Option<String>,
    pub league_pair: Option<String>,
}

/// The league-pair selector's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairSelection {
    None,
    Valid(LeaguePair),
    /// Submitted but malformed; resolves to an empty unmatched set
    Invalid(String),
}

/// Validated page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub mode: Mode,
    pub league_match: Option<LeagueMatchRequest>,
    pub team_match: Option<TeamMatchRequest>,
    pub selection: PairSelection,
    /// Raw selector value, echoed back so the selector can mark it
    pub selected_value: Option<String>,
}

impl PageRequest {
    pub fn from_raw(raw: &RawPageParams) -> Self {
        let mode = Mode::from_param(raw.mode.as_deref());

        let league_match = if flag_set(&raw.create_league_pair) {
            id_pair(&raw.source_a_league_id, &raw.source_b_league_id).map(|(a, b)| {
                LeagueMatchRequest { source_a_league_id: a, source_b_league_id: b }
            })
        } else {
            None
        };

        let team_match = if flag_set(&raw.create_team_pair) {
            id_pair(&raw.source_a_team_id, &raw.source_b_team_id)
                .map(|(a, b)| TeamMatchRequest { source_a_team_id: a, source_b_team_id: b })
        } else {
            None
        };

        let selected_value = raw
            .league_pair
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string);

        let selection = match selected_value.as_deref() {
            None => PairSelection::None,
            Some(value) => match LeaguePair::parse(value) {
                Ok(pair) => PairSelection::Valid(pair),
                Err(_) => PairSelection::Invalid(value.to_string()),
            },
        };

        Self { mode, league_match, team_match, selection, selected_value }
    }
}

fn flag_set(flag: &Option<String>) -> bool {
    flag.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn id_pair(a: &Option<String>, b: &Option<String>) -> Option<(EntityId, EntityId)> {
    let a = a.as_deref().and_then(parse_positive_id)?;
    let b = b.as_deref().and_then(parse_positive_id)?;
    Some((a, b))
}
