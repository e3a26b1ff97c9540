//! # kwmap-cli
//!
//! The `kwmap` command-line interface over the keyword taxonomy engine.
//!
//! ## Subcommands
//!
//! - `kwmap group`: show, upsert, bulk-upsert, delete, rank, retier, merge.
//! - `kwmap sync`: rebuild usage and assignments from the content index.
//! - `kwmap query`: business, priority, unused, structure, label, impact, summary.
//! - `kwmap conflicts`: literal and same-intent conflict checks.
//! - `kwmap tag`: tag master maintenance.
//! - `kwmap migrate`: one-time conversion of a legacy flat taxonomy file.
//!
//! Every handler returns the process exit code. Results go to stdout as
//! pretty-printed JSON; diagnostics go to the tracing subscriber on stderr.
//!
//! ```bash
//! kwmap group upsert crm --json '{"variants":[{"keyword":"crm software","estimatedPv":9000}]}'
//! kwmap sync
//! kwmap query unused --limit 5
//! kwmap conflicts intent "crm tools" --check
//! ```

pub mod config;
pub mod conflicts;
pub mod group;
pub mod migrate;
pub mod query;
pub mod sync;
pub mod tag;

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use config::KwmapConfig;

/// Print `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse JSON given inline or, failing that, read from `file`.
pub(crate) fn read_json<T: DeserializeOwned>(inline: Option<&str>, file: Option<&Path>) -> Result<T> {
    match (inline, file) {
        (Some(json), _) => serde_json::from_str(json).context("invalid JSON argument"),
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("invalid JSON in {}", path.display()))
        }
        (None, None) => anyhow::bail!("either --json or --file is required"),
    }
}
