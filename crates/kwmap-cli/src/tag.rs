//! # Tag Subcommand
//!
//! Maintenance of the tag master vocabulary stored alongside the taxonomy.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use kwmap_core::TagMasterEntry;
use kwmap_store::TaxonomySession;

use crate::{print_json, KwmapConfig};

/// Arguments for the `kwmap tag` subcommand.
#[derive(Args, Debug)]
pub struct TagArgs {
    #[command(subcommand)]
    pub command: TagCommand,
}

/// Tag subcommands.
#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// List tag entries, optionally only those relevant to one keyword.
    List {
        /// Keyword or group id; matches direct targets and the resolved group.
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Show one entry.
    Show { tag: String },
    /// Create an entry or update the given fields of an existing one.
    Set {
        tag: String,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Target keyword; repeat for several. Replaces existing targets.
        #[arg(long = "target")]
        targets: Vec<String>,
    },
    /// Remove an entry.
    Remove { tag: String },
}

/// Execute the tag subcommand.
pub fn run_tag(args: &TagArgs, config: &KwmapConfig) -> Result<u8> {
    let mut session = TaxonomySession::open(config.record_store());

    match &args.command {
        TagCommand::List { keyword } => {
            let doc = session.document();
            let entries: Vec<&TagMasterEntry> = match keyword {
                Some(keyword) => doc.tags_for_keyword(keyword),
                None => doc.list_tags().collect(),
            };
            print_json(&entries)?;
        }

        TagCommand::Show { tag } => {
            let entry = session
                .document()
                .get_tag(tag)
                .with_context(|| format!("tag not found: {tag}"))?;
            print_json(entry)?;
        }

        TagCommand::Set {
            tag,
            display_name,
            description,
            targets,
        } => {
            let mut entry = session
                .document()
                .get_tag(tag.trim())
                .cloned()
                .unwrap_or_else(|| TagMasterEntry::new(tag.as_str()));
            if let Some(display_name) = display_name {
                entry.display_name = display_name.clone();
            }
            if let Some(description) = description {
                entry.description = description.clone();
            }
            if !targets.is_empty() {
                entry.target_keywords = targets.iter().cloned().collect();
            }
            let entry = session.document_mut().upsert_tag(entry)?.clone();
            session.close()?;
            print_json(&entry)?;
        }

        TagCommand::Remove { tag } => {
            let removed = session.document_mut().remove_tag(tag)?;
            session.close()?;
            print_json(&removed)?;
        }
    }
    Ok(0)
}
