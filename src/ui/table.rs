use tabled::{settings::Style, Table, Tabled};
use crate::model::{LeagueListing, LeaguePairView, Team};
use crate::storage::DbStats;

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct LeagueRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Sport")]
    sport: String,
    #[tabled(rename = "League")]
    name: String,
}

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Team")]
    name: String,
    #[tabled(rename = "Matched B team")]
    matched: String,
}

#[derive(Tabled)]
struct PairRow {
    #[tabled(rename = "Select")]
    selector: String,
    #[tabled(rename = "Sport")]
    sport: String,
    #[tabled(rename = "Source A league")]
    source_a: String,
    #[tabled(rename = "Source B league")]
    source_b: String,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn leagues_table(leagues: &[LeagueListing]) -> String {
    render(
        leagues
            .iter()
            .map(|l| LeagueRow {
                id: l.league.id,
                sport: l.sport_name.clone(),
                name: l.league.name.clone(),
            })
            .collect(),
    )
}

pub fn teams_table(teams: &[Team]) -> String {
    render(
        teams
            .iter()
            .map(|t| TeamRow {
                id: t.id,
                name: t.name.clone(),
                matched: t
                    .matched_source_b_team_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect(),
    )
}

pub fn pairs_table(pairs: &[LeaguePairView]) -> String {
    render(
        pairs
            .iter()
            .map(|p| PairRow {
                selector: p.selector_value(),
                sport: p.source_a_sport_name.clone(),
                source_a: p.source_a_league_name.clone(),
                source_b: p.source_b_league_name.clone(),
            })
            .collect(),
    )
}

pub fn stats_table(stats: &DbStats) -> String {
    let rows = [
        ("Sports", stats.sports),
        ("Source A leagues", stats.source_a_leagues),
        ("Source B leagues", stats.source_b_leagues),
        ("Source A teams", stats.source_a_teams),
        ("Source B teams", stats.source_b_teams),
        ("League pairs", stats.league_associations),
        ("Matched teams", stats.matched_teams),
    ];
    render(
        rows.iter()
            .map(|(label, value)| MetricRow { metric: label.to_string(), value: value.to_string() })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;

    #[test]
    fn test_empty_tables_render_nothing() {
        assert!(teams_table(&[]).is_empty());
        assert!(pairs_table(&[]).is_empty());
    }

    #[test]
    fn test_teams_table_marks_unmatched() {
        let teams = vec![Team {
            id: 101,
            league_id: 10,
            name: "Team X".to_string(),
            source: Source::A,
            matched_source_b_team_id: None,
        }];
        let rendered = teams_table(&teams);
        assert!(rendered.contains("Team X"));
        assert!(rendered.contains("Matched B team"));
    }
}
