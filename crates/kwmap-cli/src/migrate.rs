//! # Migrate Subcommand
//!
//! Converts a legacy flat keyword file into the grouped taxonomy document.
//! The result is written to `--out`, or to the configured store path.
//! An existing taxonomy is never overwritten without `--force`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use kwmap_store::{migrate_legacy_file, RecordStore};

use crate::{print_json, KwmapConfig};

/// Arguments for the `kwmap migrate` subcommand.
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Legacy taxonomy file.
    pub legacy: PathBuf,
    /// Destination; defaults to the configured store path.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Replace an existing taxonomy document.
    #[arg(long)]
    pub force: bool,
}

/// Execute the migrate subcommand.
pub fn run_migrate(args: &MigrateArgs, config: &KwmapConfig) -> Result<u8> {
    let out = args.out.clone().unwrap_or_else(|| config.store_path.clone());
    if out.exists() && !args.force {
        bail!(
            "{} already exists; pass --force to replace it",
            out.display()
        );
    }

    let (mut doc, report) = migrate_legacy_file(&args.legacy)
        .with_context(|| format!("failed to migrate {}", args.legacy.display()))?;
    RecordStore::new(&out).save(&mut doc)?;
    print_json(&report)?;
    Ok(0)
}
