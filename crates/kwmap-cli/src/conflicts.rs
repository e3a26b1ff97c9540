//! # Conflicts Subcommand
//!
//! Checks proposed keywords against current usage before content is
//! planned. With `--check` the exit code is 1 when any conflict is found,
//! for use in editorial CI.

use anyhow::Result;
use clap::{Args, Subcommand};

use kwmap_analytics::{check_keyword_conflicts, check_same_intent_conflicts};

use crate::{print_json, KwmapConfig};

/// Arguments for the `kwmap conflicts` subcommand.
#[derive(Args, Debug)]
pub struct ConflictsArgs {
    #[command(subcommand)]
    pub command: ConflictsCommand,

    /// Exit with status 1 if any conflict is reported.
    #[arg(long, global = true)]
    pub check: bool,
}

/// Conflict check subcommands.
#[derive(Subcommand, Debug)]
pub enum ConflictsCommand {
    /// Literal keywords already declared by content.
    Literal {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Intent groups already served by more than one content item.
    Intent {
        /// Keywords or group ids.
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}

/// Execute the conflicts subcommand.
pub fn run_conflicts(args: &ConflictsArgs, config: &KwmapConfig) -> Result<u8> {
    let doc = config.record_store().load();

    let found = match &args.command {
        ConflictsCommand::Literal { keywords } => {
            let conflicts = check_keyword_conflicts(&doc, keywords);
            print_json(&conflicts)?;
            conflicts.len()
        }
        ConflictsCommand::Intent { keywords } => {
            let conflicts = check_same_intent_conflicts(&doc, keywords);
            print_json(&conflicts)?;
            conflicts.len()
        }
    };

    if found > 0 {
        tracing::info!(found, "conflicts reported");
    }
    Ok(if args.check && found > 0 { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwmap_core::{ContentId, UsageRecord};

    fn config_with_usage(dir: &std::path::Path) -> KwmapConfig {
        let config = KwmapConfig::in_dir(dir);
        let store = config.record_store();
        let mut doc = store.load();
        let mut record = UsageRecord::default();
        record.add(&ContentId::new("p1"), None);
        doc.usage.insert("crm software".into(), record);
        store.save(&mut doc).unwrap();
        config
    }

    #[test]
    fn check_flag_sets_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_usage(dir.path());
        let literal = |check: bool, kw: &str| ConflictsArgs {
            command: ConflictsCommand::Literal {
                keywords: vec![kw.to_string()],
            },
            check,
        };

        assert_eq!(run_conflicts(&literal(false, "crm software"), &config).unwrap(), 0);
        assert_eq!(run_conflicts(&literal(true, "crm software"), &config).unwrap(), 1);
        assert_eq!(run_conflicts(&literal(true, "fresh keyword"), &config).unwrap(), 0);
    }

    #[test]
    fn intent_without_groups_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_usage(dir.path());
        let args = ConflictsArgs {
            command: ConflictsCommand::Intent {
                keywords: vec!["crm software".into()],
            },
            check: true,
        };
        assert_eq!(run_conflicts(&args, &config).unwrap(), 0);
    }
}
