//! # Sync Subcommand
//!
//! Rebuilds keyword usage and group assignments from the content index
//! named by `corpus_path`, optionally restricted to one locale.

use anyhow::{Context, Result};
use clap::Args;

use kwmap_analytics::synchronize_corpus;
use kwmap_store::TaxonomySession;

use crate::{print_json, KwmapConfig};

/// Arguments for the `kwmap sync` subcommand.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Report what would change without saving.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the sync subcommand.
pub fn run_sync(args: &SyncArgs, config: &KwmapConfig) -> Result<u8> {
    let mut session = TaxonomySession::open(config.record_store());
    let corpus = config.corpus();
    let report = synchronize_corpus(session.document_mut(), &corpus, config.locale.as_deref())
        .with_context(|| format!("failed to read content index {}", config.corpus_path.display()))?;
    if args.dry_run {
        tracing::info!("dry run; taxonomy not saved");
    } else {
        session.close()?;
    }
    print_json(&report)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwmap_core::{GroupPatch, KeywordVariant};
    use kwmap_store::RecordStore;

    fn seed(config: &KwmapConfig) {
        let store = config.record_store();
        let mut doc = store.load();
        doc.upsert(
            "crm",
            GroupPatch::default().with_variants(vec![KeywordVariant::new("crm software", 10)]),
        )
        .unwrap();
        store.save(&mut doc).unwrap();
        std::fs::write(
            &config.corpus_path,
            r#"[
                {"id": "crm-guide", "date": "2026-01-10", "locale": "en", "primaryKeyword": "crm software"},
                {"id": "crm-ja", "locale": "ja", "primaryKeyword": "crm"}
            ]"#,
        )
        .unwrap();
    }

    #[test]
    fn sync_assigns_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let config = KwmapConfig::in_dir(dir.path());
        seed(&config);

        assert_eq!(run_sync(&SyncArgs { dry_run: false }, &config).unwrap(), 0);
        let doc = RecordStore::new(&config.store_path).load();
        assert_eq!(doc.get_by_id("crm").unwrap().assigned_articles.len(), 2);
        assert_eq!(doc.usage["crm software"].frequency, 1);
    }

    #[test]
    fn sync_respects_locale() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = KwmapConfig::in_dir(dir.path());
        config.locale = Some("ja".into());
        seed(&config);

        run_sync(&SyncArgs { dry_run: false }, &config).unwrap();
        let doc = RecordStore::new(&config.store_path).load();
        let assigned: Vec<_> = doc
            .get_by_id("crm")
            .unwrap()
            .assigned_articles
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(assigned, vec!["crm-ja"]);
    }

    #[test]
    fn sync_dry_run_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let config = KwmapConfig::in_dir(dir.path());
        seed(&config);

        run_sync(&SyncArgs { dry_run: true }, &config).unwrap();
        let doc = RecordStore::new(&config.store_path).load();
        assert!(doc.get_by_id("crm").unwrap().assigned_articles.is_empty());
    }

    #[test]
    fn sync_missing_corpus_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = KwmapConfig::in_dir(dir.path());
        assert!(run_sync(&SyncArgs { dry_run: false }, &config).is_err());
        assert!(!config.store_path.exists());
    }
}
