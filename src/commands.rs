use crate::{Context, emit_success};
use matchdesk::config::{self, MatchdeskConfig};
use matchdesk::matching::{LeaguePair, MatchOutcome, MatchingService, UnmatchedSetResolver};
use matchdesk::model::group_by_sport;
use matchdesk::server::{self, AppState};
use matchdesk::storage::CatalogSnapshot;
use matchdesk::ui::{self, Icons};
use matchdesk::{Source, SqliteStore, UnmatchedTeams};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

fn open_store(ctx: &Context) -> anyhow::Result<SqliteStore> {
    config::ensure_db_dir(&ctx.database)?;
    Ok(SqliteStore::open(&ctx.database)?)
}

pub fn run_init(ctx: &Context, project_root: &Path, force: bool) -> anyhow::Result<()> {
    let new_config = MatchdeskConfig {
        database: Some(ctx.database.display().to_string()),
        port: ctx.config.port,
    };
    config::write_config(&ctx.config_path, &new_config, force)?;
    open_store(ctx)?;
    config::ensure_gitignore(project_root)?;

    if ctx.output.is_human() {
        ui::success(&format!("Wrote {}", ctx.config_path.display()));
        ui::info("Database", &ctx.database.display().to_string());
    } else {
        emit_success(ctx.output, "init", serde_json::json!({
            "config": ctx.config_path.display().to_string(),
            "database": ctx.database.display().to_string(),
        }))?;
    }
    Ok(())
}

pub fn run_import(ctx: &Context, file: &Path) -> anyhow::Result<()> {
    let snapshot = CatalogSnapshot::load(file)?;
    let mut store = open_store(ctx)?;

    if ctx.output.is_human() {
        ui::header(&format!("Importing catalog snapshot {}", file.display()));
    }
    let summary = store.import_catalog(&snapshot)?;

    if ctx.output.is_human() {
        ui::summary_row("Sports:", &summary.sports.to_string());
        ui::summary_row("Leagues:", &summary.leagues.to_string());
        ui::summary_row("Teams:", &summary.teams.to_string());
        ui::success(&format!("{} Import complete", Icons::PACKAGE));
    } else {
        emit_success(ctx.output, "import", serde_json::to_value(&summary)?)?;
    }
    Ok(())
}

pub fn run_leagues(ctx: &Context, source: Source) -> anyhow::Result<()> {
    let store = open_store(ctx)?;
    let leagues = store.list_leagues(source)?;

    if !ctx.output.is_human() {
        return emit_success(ctx.output, "leagues", serde_json::json!({
            "source": source,
            "groups": group_by_sport(&leagues),
        }));
    }

    if leagues.is_empty() {
        println!("{} No source {} leagues found.", Icons::EMPTY, source);
        return Ok(());
    }
    let title = format!("Source {} leagues", source.as_str().to_uppercase());
    ui::section(&format!("{}", title.style(ui::theme().for_source(source))));
    println!("{}", ui::leagues_table(&leagues));
    Ok(())
}

pub fn run_teams(ctx: &Context, league_id: i64, source: Source) -> anyhow::Result<()> {
    let store = open_store(ctx)?;
    let teams = store.list_teams_in_league(league_id, source)?;

    if !ctx.output.is_human() {
        return emit_success(ctx.output, "teams", serde_json::to_value(&teams)?);
    }

    if teams.is_empty() {
        println!("{} No teams in source {} league {}.", Icons::EMPTY, source, league_id);
    } else {
        println!("{}", ui::teams_table(&teams));
    }
    Ok(())
}

pub fn run_pairs(ctx: &Context) -> anyhow::Result<()> {
    let store = open_store(ctx)?;
    let pairs = store.list_league_associations()?;

    if !ctx.output.is_human() {
        return emit_success(ctx.output, "pairs", serde_json::to_value(&pairs)?);
    }

    if pairs.is_empty() {
        println!("{} No league pairs recorded yet.", Icons::EMPTY);
        return Ok(());
    }
    ui::section("League pairs");
    println!("{}", ui::pairs_table(&pairs));
    Ok(())
}

fn report_outcome(ctx: &Context, command: &str, outcome: &MatchOutcome) -> anyhow::Result<()> {
    if !ctx.output.is_human() {
        return emit_success(ctx.output, command, serde_json::json!({
            "created": outcome.is_created(),
            "result": outcome,
        }));
    }

    match outcome {
        MatchOutcome::LeaguePaired(association) => ui::success(&format!(
            "{} Paired source A league {} with source B league {}",
            Icons::LINK,
            association.source_a_league_id,
            association.source_b_league_id
        )),
        MatchOutcome::TeamMatched { source_a_team_id, source_b_team_id } => ui::success(&format!(
            "{} Matched source A team {} to source B team {}",
            Icons::LINK,
            source_a_team_id,
            source_b_team_id
        )),
        MatchOutcome::Rejected => ui::warn("Ids must be positive integers; nothing recorded"),
    }
    Ok(())
}

pub fn run_pair_leagues(ctx: &Context, source_a: i64, source_b: i64) -> anyhow::Result<()> {
    let store = open_store(ctx)?;
    let outcome = MatchingService::new(&store).create_league_match(source_a, source_b)?;
    report_outcome(ctx, "pair-leagues", &outcome)
}

pub fn run_match_teams(ctx: &Context, source_a: i64, source_b: i64) -> anyhow::Result<()> {
    let store = open_store(ctx)?;
    let outcome = MatchingService::new(&store).create_team_match(source_a, source_b)?;
    report_outcome(ctx, "match-teams", &outcome)
}

pub fn run_unmatched(ctx: &Context, pair: &str) -> anyhow::Result<()> {
    let store = open_store(ctx)?;
    let unmatched = match LeaguePair::parse(pair) {
        Ok(selected) => UnmatchedSetResolver::new(&store)
            .unmatched_teams(selected.source_a_league_id, selected.source_b_league_id)?,
        Err(e) if ctx.output.is_human() => {
            ui::warn(&format!("{}; no teams listed", e));
            return Ok(());
        }
        Err(_) => UnmatchedTeams::default(),
    };

    if !ctx.output.is_human() {
        return emit_success(ctx.output, "unmatched", serde_json::to_value(&unmatched)?);
    }

    if unmatched.is_empty() {
        ui::success(&format!("{} Nothing left to match for league pair {}", Icons::TROPHY, pair));
        return Ok(());
    }

    for (source, teams) in [(Source::A, &unmatched.source_a), (Source::B, &unmatched.source_b)] {
        let title = format!("{} Unmatched source {} teams ({})", Icons::TEAM, source, teams.len());
        ui::section(&format!("{}", title.style(ui::theme().for_source(source))));
        if teams.is_empty() {
            println!("  {}", ui::dim("none"));
        } else {
            println!("{}", ui::teams_table(teams));
        }
    }
    Ok(())
}

pub fn run_stats(ctx: &Context) -> anyhow::Result<()> {
    let store = open_store(ctx)?;
    let stats = store.stats()?;

    if !ctx.output.is_human() {
        return emit_success(ctx.output, "stats", serde_json::to_value(&stats)?);
    }

    println!("{} Matchdesk Statistics ({:?})", Icons::STATS, ctx.database);
    println!("{}", ui::stats_table(&stats));
    Ok(())
}

pub fn run_serve(ctx: &Context, port: Option<u16>, static_dir: Option<PathBuf>) -> anyhow::Result<()> {
    // Create the schema up front so the first request does not race it
    open_store(ctx)?;

    let port = ctx.config.resolve_port(port);
    let mut state = AppState::new(ctx.database.clone());
    if let Some(dir) = static_dir {
        state = state.with_static_dir(dir);
    }

    ui::info(&format!("{} Database", Icons::DATABASE), &ctx.database.display().to_string());
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::start_server(port, state))
}
