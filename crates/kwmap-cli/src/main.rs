//! # kwmap CLI entry point
//!
//! Parses command-line arguments, resolves configuration and dispatches to
//! the subcommand handlers in `kwmap_cli`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kwmap_cli::conflicts::{run_conflicts, ConflictsArgs};
use kwmap_cli::group::{run_group, GroupArgs};
use kwmap_cli::migrate::{run_migrate, MigrateArgs};
use kwmap_cli::query::{run_query, QueryArgs};
use kwmap_cli::sync::{run_sync, SyncArgs};
use kwmap_cli::tag::{run_tag, TagArgs};
use kwmap_cli::KwmapConfig;

/// Keyword taxonomy and conflict analytics.
///
/// Maintains keyword intent groups, keeps their content assignments in step
/// with the content index, and answers planning and conflict queries.
#[derive(Parser, Debug)]
#[command(name = "kwmap", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to configuration file (default: ./kwmap.yaml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Taxonomy document; overrides `store_path`.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Content index; overrides `corpus_path`.
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    /// Content locale filter; overrides `locale`.
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Keyword group maintenance (show, upsert, bulk, delete, rank, retier, merge).
    Group(GroupArgs),

    /// Rebuild keyword usage and assignments from the content index.
    Sync(SyncArgs),

    /// Business queries and dashboard views.
    Query(QueryArgs),

    /// Literal and same-intent conflict checks.
    Conflicts(ConflictsArgs),

    /// Tag master maintenance.
    Tag(TagArgs),

    /// Convert a legacy flat keyword file into the grouped taxonomy.
    Migrate(MigrateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = match KwmapConfig::load(cli.config.as_deref()) {
        Ok(config) => config.with_overrides(
            cli.store.as_deref(),
            cli.corpus.as_deref(),
            cli.locale.as_deref(),
        ),
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(
        store = %config.store_path.display(),
        corpus = %config.corpus_path.display(),
        "resolved configuration"
    );

    let result = match &cli.command {
        Commands::Group(args) => run_group(args, &config),
        Commands::Sync(args) => run_sync(args, &config),
        Commands::Query(args) => run_query(args, &config),
        Commands::Conflicts(args) => run_conflicts(args, &config),
        Commands::Tag(args) => run_tag(args, &config),
        Commands::Migrate(args) => run_migrate(args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
