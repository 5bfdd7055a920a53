//! Database schema definitions

/// Foreign keys are off by default in SQLite and must be enabled per connection
pub const ENABLE_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON";

/// SQL to create the sports table
pub const CREATE_SPORTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS sports (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
)
"#;

pub const CREATE_SOURCE_A_LEAGUES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS source_a_leagues (
    id INTEGER PRIMARY KEY,
    sport_id INTEGER NOT NULL REFERENCES sports(id),
    name TEXT NOT NULL
)
"#;

pub const CREATE_SOURCE_B_LEAGUES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS source_b_leagues (
    id INTEGER PRIMARY KEY,
    sport_id INTEGER NOT NULL REFERENCES sports(id),
    name TEXT NOT NULL
)
"#;

/// SourceB teams must exist before SourceA teams can reference them
pub const CREATE_SOURCE_B_TEAMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS source_b_teams (
    id INTEGER PRIMARY KEY,
    league_id INTEGER NOT NULL REFERENCES source_b_leagues(id),
    name TEXT NOT NULL
)
"#;

/// SQL to create the SourceA teams table
/// `matched_source_b_team_id` is the team-level association; no uniqueness
pub const CREATE_SOURCE_A_TEAMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS source_a_teams (
    id INTEGER PRIMARY KEY,
    league_id INTEGER NOT NULL REFERENCES source_a_leagues(id),
    name TEXT NOT NULL,
    matched_source_b_team_id INTEGER REFERENCES source_b_teams(id)
)
"#;

/// SQL to create the league_associations table
/// Append-only, duplicates allowed
pub const CREATE_LEAGUE_ASSOCIATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS league_associations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_a_league_id INTEGER NOT NULL REFERENCES source_a_leagues(id),
    source_b_league_id INTEGER NOT NULL REFERENCES source_b_leagues(id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_source_a_leagues_sport ON source_a_leagues(sport_id)",
    "CREATE INDEX IF NOT EXISTS idx_source_b_leagues_sport ON source_b_leagues(sport_id)",
    "CREATE INDEX IF NOT EXISTS idx_source_a_teams_league ON source_a_teams(league_id)",
    "CREATE INDEX IF NOT EXISTS idx_source_b_teams_league ON source_b_teams(league_id)",
    "CREATE INDEX IF NOT EXISTS idx_source_a_teams_matched ON source_a_teams(matched_source_b_team_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_SPORTS_TABLE,
        CREATE_SOURCE_A_LEAGUES_TABLE,
        CREATE_SOURCE_B_LEAGUES_TABLE,
        CREATE_SOURCE_B_TEAMS_TABLE,
        CREATE_SOURCE_A_TEAMS_TABLE,
        CREATE_LEAGUE_ASSOCIATIONS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
