//! # File-Backed Content Corpus
//!
//! Reads the content index produced by the site build: a JSON array of
//! content items, each carrying its id, date, locale and declared keywords.
//! Unlike the taxonomy document, an unreadable corpus is an error; syncing
//! against a silently empty corpus would wipe every assignment.

use std::path::{Path, PathBuf};

use kwmap_core::content::filter_locale;
use kwmap_core::{ContentCorpus, ContentItem, KwmapError};

/// A content index stored as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonCorpus {
    path: PathBuf,
}

impl JsonCorpus {
    /// A corpus backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the content index.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentCorpus for JsonCorpus {
    fn items(&self, locale: Option<&str>) -> Result<Vec<ContentItem>, KwmapError> {
        let content = std::fs::read_to_string(&self.path)?;
        let items: Vec<ContentItem> = serde_json::from_str(&content)?;
        tracing::debug!(path = %self.path.display(), items = items.len(), "read content index");
        Ok(filter_locale(&items, locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "crm-guide", "date": "2026-01-02", "locale": "en", "primaryKeyword": "crm software"},
                {"id": "crm-guide-ja", "locale": "ja", "primaryKeyword": "crm software"}
            ]"#,
        )
        .unwrap();
        let corpus = JsonCorpus::new(&path);
        assert_eq!(corpus.items(None).unwrap().len(), 2);
        let en = corpus.items(Some("en")).unwrap();
        assert_eq!(en.len(), 1);
        assert_eq!(en[0].id.as_str(), "crm-guide");
    }

    #[test]
    fn test_missing_index_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = JsonCorpus::new(dir.path().join("absent.json"));
        assert!(matches!(corpus.items(None), Err(KwmapError::Io(_))));
    }
}
