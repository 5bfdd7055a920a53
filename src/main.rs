//! Matchdesk CLI - operator tool for reconciling two sports catalogs

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use matchdesk::Source;
use matchdesk::config::{self, MatchdeskConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "matchdesk")]
#[command(version)]
#[command(about = "Manually reconcile leagues and teams between two sports catalogs")]
#[command(long_about = r#"
Matchdesk records operator-chosen equivalences between two independently
maintained sports catalogs (source A and source B):
  • Pair a source A league with a source B league
  • Within a league pair, pair the teams that are still unmatched

Example usage:
  matchdesk import --file catalog.toml
  matchdesk pair-leagues --source-a 10 --source-b 20
  matchdesk unmatched --pair 10,20
  matchdesk match-teams --source-a 101 --source-b 55
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file and create the database
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Load a catalog snapshot (TOML) into the database
    Import {
        /// Snapshot file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List one source's leagues grouped by sport
    Leagues {
        /// Catalog to list (a or b)
        #[arg(short, long, value_parser = parse_source)]
        source: Source,
    },

    /// List the teams of a league
    Teams {
        /// League id
        #[arg(short, long)]
        league: i64,

        /// Catalog the league belongs to (a or b)
        #[arg(short, long, value_parser = parse_source)]
        source: Source,
    },

    /// List recorded league pairs
    Pairs,

    /// Record that a source A league and a source B league are the same
    PairLeagues {
        /// Source A league id
        #[arg(long, allow_negative_numbers = true)]
        source_a: i64,

        /// Source B league id
        #[arg(long, allow_negative_numbers = true)]
        source_b: i64,
    },

    /// Show the teams still unmatched for a league pair
    Unmatched {
        /// League pair as "<source A league id>,<source B league id>"
        #[arg(short, long)]
        pair: String,
    },

    /// Record a source A team's source B counterpart
    MatchTeams {
        /// Source A team id
        #[arg(long, allow_negative_numbers = true)]
        source_a: i64,

        /// Source B team id
        #[arg(long, allow_negative_numbers = true)]
        source_b: i64,
    },

    /// Show catalog and matching statistics
    Stats,

    /// Serve the matching API over HTTP
    Serve {
        /// Port to listen on (defaults to the config file, then 8080)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory of static front-end files to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

fn parse_source(value: &str) -> Result<Source, String> {
    value.parse().map_err(|e: matchdesk::Error| e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// Print a `{"ok": true, "command": .., "data": ..}` envelope
pub fn emit_success(
    output_mode: OutputMode,
    command: &str,
    data: serde_json::Value,
) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

/// Resolved settings shared by every command
pub struct Context {
    pub output: OutputMode,
    pub database: PathBuf,
    pub config: MatchdeskConfig,
    pub config_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let loaded = config::load_config(Some(config_path.as_path()))?.unwrap_or_default();
    let cwd = std::env::current_dir()?;
    let ctx = Context {
        output: if cli.json { OutputMode::Json } else { OutputMode::Human },
        database: loaded.resolve_database(cli.database.as_deref(), &cwd),
        config: loaded,
        config_path,
    };
    tracing::debug!("Using database {:?}", ctx.database);

    match cli.command {
        Commands::Init { force } => commands::run_init(&ctx, &cwd, force),
        Commands::Import { file } => commands::run_import(&ctx, &file),
        Commands::Leagues { source } => commands::run_leagues(&ctx, source),
        Commands::Teams { league, source } => commands::run_teams(&ctx, league, source),
        Commands::Pairs => commands::run_pairs(&ctx),
        Commands::PairLeagues { source_a, source_b } => {
            commands::run_pair_leagues(&ctx, source_a, source_b)
        }
        Commands::Unmatched { pair } => commands::run_unmatched(&ctx, &pair),
        Commands::MatchTeams { source_a, source_b } => {
            commands::run_match_teams(&ctx, source_a, source_b)
        }
        Commands::Stats => commands::run_stats(&ctx),
        Commands::Serve { port, static_dir } => commands::run_serve(&ctx, port, static_dir),
    }
}
