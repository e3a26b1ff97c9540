//! # Record Store
//!
//! Loads and saves the whole [`TaxonomyDocument`] as one JSON file.
//!
//! ## Contract
//!
//! - `load` never fails. A missing file, unparseable JSON, or a document
//!   whose `metadata.version` differs from [`DOCUMENT_VERSION`] yields an
//!   empty document. Corruption and version mismatches are logged at `warn`.
//! - `save` rewrites the file wholesale after refreshing `lastUpdated` and
//!   the summary counts. The new content is written to a sibling temporary
//!   file and renamed into place, so readers never observe a half-written
//!   document.
//! - Last writer wins. There is no optimistic concurrency control.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use kwmap_core::KwmapError;

use crate::document::{TaxonomyDocument, DOCUMENT_VERSION};

/// File-backed store for the taxonomy document.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// A store backed by the JSON file at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, substituting an empty one for anything unusable.
    pub fn load(&self) -> TaxonomyDocument {
        match self.try_load() {
            Ok(doc) => {
                tracing::info!(
                    path = %self.path.display(),
                    groups = doc.groups.len(),
                    "loaded keyword taxonomy"
                );
                doc
            }
            Err(KwmapError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    path = %self.path.display(),
                    "no keyword taxonomy on disk; starting from an empty document"
                );
                TaxonomyDocument::empty()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "unusable keyword taxonomy; starting from an empty document"
                );
                TaxonomyDocument::empty()
            }
        }
    }

    /// Load the document, reporting why it is unusable instead of
    /// recovering.
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read.
    /// - `InvalidState` if it is not JSON, has the wrong version, or does not
    ///   match the document shape.
    pub fn try_load(&self) -> Result<TaxonomyDocument, KwmapError> {
        let content = fs::read_to_string(&self.path)?;
        parse_document(&content)
    }

    /// Refresh metadata on `doc` and write it to disk.
    pub fn save(&self, doc: &mut TaxonomyDocument) -> Result<(), KwmapError> {
        doc.refresh_metadata();
        let mut json = serde_json::to_string_pretty(doc)?;
        json.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::info!(
            path = %self.path.display(),
            groups = doc.metadata.total_groups,
            keywords = doc.metadata.total_target_keywords,
            tags = doc.metadata.total_tags,
            "saved keyword taxonomy"
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Parse a persisted document, checking the version discriminator before
/// interpreting anything else.
pub fn parse_document(content: &str) -> Result<TaxonomyDocument, KwmapError> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| KwmapError::InvalidState(format!("not a JSON document: {e}")))?;

    let version = value
        .get("metadata")
        .and_then(|m| m.get("version"))
        .and_then(Value::as_str);
    if version != Some(DOCUMENT_VERSION) {
        return Err(KwmapError::InvalidState(format!(
            "expected document version {DOCUMENT_VERSION}, found {version:?}"
        )));
    }

    serde_json::from_value(value)
        .map_err(|e| KwmapError::InvalidState(format!("malformed taxonomy document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwmap_core::{KeywordGroup, KeywordVariant};

    fn sample() -> TaxonomyDocument {
        let mut doc = TaxonomyDocument::empty();
        let g = KeywordGroup::new("crm", vec![KeywordVariant::new("crm software", 900)]);
        doc.groups.insert(g.id.clone(), g);
        doc
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("absent.json"));
        let doc = store.load();
        assert!(doc.groups.is_empty());
        assert_eq!(doc.metadata.version, DOCUMENT_VERSION);
    }

    #[test]
    fn test_garbage_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kw.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = RecordStore::new(&path);
        assert!(store.load().groups.is_empty());
        assert!(matches!(store.try_load(), Err(KwmapError::InvalidState(_))));
    }

    #[test]
    fn test_wrong_version_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kw.json");
        let mut doc = sample();
        RecordStore::new(&path).save(&mut doc).unwrap();

        let text = fs::read_to_string(&path)
            .unwrap()
            .replace("\"version\": \"2.0\"", "\"version\": \"1.0\"");
        fs::write(&path, text).unwrap();

        let store = RecordStore::new(&path);
        assert!(store.load().groups.is_empty());
        assert!(matches!(store.try_load(), Err(KwmapError::InvalidState(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("nested/dir/kw.json"));
        let mut doc = sample();
        store.save(&mut doc).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, doc);
        assert_eq!(loaded.metadata.total_groups, 1);
        assert_eq!(loaded.metadata.total_target_keywords, 1);
        assert!(!store.tmp_path().exists());
    }
}
