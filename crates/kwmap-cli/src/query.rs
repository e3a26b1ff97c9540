//! # Query Subcommand
//!
//! Read-only business and dashboard views. Nothing here writes the
//! taxonomy document; run `kwmap sync` first for fresh assignments.

use anyhow::Result;
use clap::{Args, Subcommand};

use kwmap_analytics::{
    by_business, by_priority, dashboard_summary, impact_ranking, pillar_cluster_structure,
    representative_label, suggest_unused,
};

use crate::{print_json, KwmapConfig};

/// Arguments for the `kwmap query` subcommand.
#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(subcommand)]
    pub command: QueryCommand,
}

/// Query subcommands.
#[derive(Subcommand, Debug)]
pub enum QueryCommand {
    /// Groups serving a business line.
    Business {
        /// Business line as recorded in relatedBusiness.
        business: String,
    },
    /// Groups at one priority level (1-5).
    Priority {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        priority: u8,
    },
    /// Active groups with no content yet: what to write next.
    Unused {
        /// Queue length; defaults to `suggest_limit` from the config.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Pillar/cluster tree with orphaned clusters.
    Structure,
    /// Display label for a keyword or group id.
    Label {
        /// Group id or literal keyword.
        key: String,
    },
    /// Groups ranked by estimated business impact.
    Impact {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Dashboard roll-up counts.
    Summary,
}

/// Execute the query subcommand.
pub fn run_query(args: &QueryArgs, config: &KwmapConfig) -> Result<u8> {
    let doc = config.record_store().load();

    match &args.command {
        QueryCommand::Business { business } => print_json(&by_business(&doc, business))?,
        QueryCommand::Priority { priority } => print_json(&by_priority(&doc, *priority))?,
        QueryCommand::Unused { limit } => {
            let limit = limit.unwrap_or(config.suggest_limit);
            print_json(&suggest_unused(&doc, limit))?
        }
        QueryCommand::Structure => print_json(&pillar_cluster_structure(&doc))?,
        QueryCommand::Label { key } => print_json(&representative_label(&doc, key))?,
        QueryCommand::Impact { limit } => print_json(&impact_ranking(&doc, *limit))?,
        QueryCommand::Summary => print_json(&dashboard_summary(&doc))?,
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwmap_core::{GroupPatch, KeywordVariant};

    #[test]
    fn every_query_runs_on_a_missing_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = KwmapConfig::in_dir(dir.path());
        let commands = vec![
            QueryCommand::Business { business: "saas".into() },
            QueryCommand::Priority { priority: 3 },
            QueryCommand::Unused { limit: None },
            QueryCommand::Structure,
            QueryCommand::Label { key: "crm".into() },
            QueryCommand::Impact { limit: Some(3) },
            QueryCommand::Summary,
        ];
        for command in commands {
            assert_eq!(run_query(&QueryArgs { command }, &config).unwrap(), 0);
        }
        assert!(!config.store_path.exists());
    }

    #[test]
    fn queries_read_saved_taxonomy() {
        let dir = tempfile::tempdir().unwrap();
        let config = KwmapConfig::in_dir(dir.path());
        let store = config.record_store();
        let mut doc = store.load();
        doc.upsert(
            "crm",
            GroupPatch::default()
                .with_business(["saas"])
                .with_variants(vec![KeywordVariant::new("crm software", 10)]),
        )
        .unwrap();
        store.save(&mut doc).unwrap();

        let args = QueryArgs {
            command: QueryCommand::Unused { limit: Some(1) },
        };
        assert_eq!(run_query(&args, &config).unwrap(), 0);
        assert_eq!(by_business(&store.load(), "saas").len(), 1);
    }
}
