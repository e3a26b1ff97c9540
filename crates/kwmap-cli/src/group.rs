//! # Group Subcommand
//!
//! Keyword group maintenance. Each mutating command is one
//! load → mutate → save cycle against the configured taxonomy document;
//! a rejected edit leaves the file untouched.
//!
//! ## Subcommands
//!
//! - `show`: resolve a group id or variant keyword.
//! - `upsert`: create or patch one group from a JSON patch.
//! - `bulk`: apply many patches in one all-or-nothing batch.
//! - `delete`: remove a group (children are orphaned, not repaired).
//! - `rank`: record an observed search rank for one variant.
//! - `retier`: move a group to another tier.
//! - `merge`: fold one group into another.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use kwmap_core::{GroupId, GroupPatch, RankSource, Tier};
use kwmap_store::TaxonomySession;

use crate::{print_json, read_json, KwmapConfig};

/// Arguments for the `kwmap group` subcommand.
#[derive(Args, Debug)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

/// Group subcommands.
#[derive(Subcommand, Debug)]
pub enum GroupCommand {
    /// Show the group a group id or variant keyword resolves to.
    Show {
        /// Group id or literal variant keyword.
        key: String,
    },

    /// Create a group, or patch an existing one.
    ///
    /// The patch is a JSON object with any of: tier, parentId,
    /// relatedBusiness, relatedTags, priority, status, workflowFlag,
    /// variants. New groups must supply variants.
    Upsert {
        /// Group id.
        id: String,
        /// Patch as inline JSON.
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        json: Option<String>,
        /// Patch read from a JSON file.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Patch many existing groups at once from a JSON object of id → patch.
    ///
    /// Unknown ids are skipped; any invalid patch rejects the whole batch.
    Bulk {
        /// Patches as inline JSON.
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        json: Option<String>,
        /// Patches read from a JSON file.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Delete a group.
    Delete {
        /// Group id.
        id: String,
    },

    /// Record an observed search rank for one variant.
    Rank {
        /// Group id.
        id: String,
        /// Literal variant keyword inside the group.
        keyword: String,
        /// Observed rank (1 = top result).
        rank: u32,
        /// Observation date (YYYY-MM-DD); defaults to today (UTC).
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Where the rank came from: manual or api.
        #[arg(long, default_value = "manual")]
        source: RankSource,
    },

    /// Move a group to another tier.
    Retier {
        /// Group id.
        id: String,
        /// Target tier: big, middle or longtail.
        tier: Tier,
        /// Parent group when moving to longtail (or replacing a pillar's parent).
        #[arg(long)]
        parent: Option<String>,
    },

    /// Fold SOURCE into TARGET and delete SOURCE.
    Merge {
        /// Group to absorb.
        source: String,
        /// Group that survives.
        target: String,
    },
}

/// Execute the group subcommand.
pub fn run_group(args: &GroupArgs, config: &KwmapConfig) -> Result<u8> {
    let mut session = TaxonomySession::open(config.record_store());

    match &args.command {
        GroupCommand::Show { key } => {
            let resolution = session.document().resolve(key);
            print_json(&resolution)?;
            Ok(if resolution.group().is_some() { 0 } else { 1 })
        }

        GroupCommand::Upsert { id, json, file } => {
            let patch: GroupPatch = read_json(json.as_deref(), file.as_deref())?;
            let group = session.document_mut().upsert(id.as_str(), patch)?.clone();
            session.close()?;
            print_json(&group)?;
            Ok(0)
        }

        GroupCommand::Bulk { json, file } => {
            let patches: BTreeMap<GroupId, GroupPatch> =
                read_json(json.as_deref(), file.as_deref())?;
            let outcome = session.document_mut().bulk_upsert(patches)?;
            session.close()?;
            print_json(&outcome)?;
            Ok(0)
        }

        GroupCommand::Delete { id } => {
            let removed = session.document_mut().delete(id)?;
            session.close()?;
            print_json(&removed)?;
            Ok(0)
        }

        GroupCommand::Rank {
            id,
            keyword,
            rank,
            date,
            source,
        } => {
            let date = date.unwrap_or_else(|| chrono::Utc::now().date_naive());
            let variant = session
                .document_mut()
                .update_variant_rank(id, keyword, *rank, *source, date)?
                .clone();
            session.close()?;
            print_json(&variant)?;
            Ok(0)
        }

        GroupCommand::Retier { id, tier, parent } => {
            let parent = parent.as_deref().map(GroupId::from);
            let group = session
                .document_mut()
                .change_tier(id, *tier, parent)?
                .clone();
            session.close()?;
            print_json(&group)?;
            Ok(0)
        }

        GroupCommand::Merge { source, target } => {
            let group = session.document_mut().merge(source, target)?.clone();
            session.close()?;
            print_json(&group)?;
            Ok(0)
        }
    }
}
