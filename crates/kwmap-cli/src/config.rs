//! # CLI Configuration
//!
//! Optional YAML file naming where the taxonomy document and the content
//! index live:
//!
//! ```yaml
//! store_path: data/keyword-taxonomy.json
//! corpus_path: data/content-index.json
//! locale: en
//! suggest_limit: 10
//! ```
//!
//! Resolution order: built-in defaults, then the file, then command-line
//! flags. An absent `kwmap.yaml` is fine; an explicitly named file that is
//! absent, or any file that does not parse, is an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use kwmap_store::{JsonCorpus, RecordStore};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "kwmap.yaml";

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KwmapConfig {
    /// Taxonomy document.
    pub store_path: PathBuf,
    /// JSON array of content items.
    pub corpus_path: PathBuf,
    /// Restrict synchronization to content in this locale.
    pub locale: Option<String>,
    /// Default size of the `query unused` planning queue.
    pub suggest_limit: usize,
}

impl Default for KwmapConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data/keyword-taxonomy.json"),
            corpus_path: PathBuf::from("data/content-index.json"),
            locale: None,
            suggest_limit: 10,
        }
    }
}

impl KwmapConfig {
    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("invalid kwmap configuration")
    }

    /// Load `explicit`, or `kwmap.yaml` in the working directory if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    tracing::debug!("no kwmap.yaml found; using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let yaml = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_yaml(&yaml)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(config = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        store: Option<&Path>,
        corpus: Option<&Path>,
        locale: Option<&str>,
    ) -> Self {
        if let Some(store) = store {
            self.store_path = store.to_path_buf();
        }
        if let Some(corpus) = corpus {
            self.corpus_path = corpus.to_path_buf();
        }
        if let Some(locale) = locale {
            self.locale = Some(locale.to_string());
        }
        self
    }

    pub fn record_store(&self) -> RecordStore {
        RecordStore::new(&self.store_path)
    }

    pub fn corpus(&self) -> JsonCorpus {
        JsonCorpus::new(&self.corpus_path)
    }

    /// Config for a store and corpus side by side in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            store_path: dir.join("keyword-taxonomy.json"),
            corpus_path: dir.join("content-index.json"),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = KwmapConfig::default();
        assert_eq!(config.store_path, PathBuf::from("data/keyword-taxonomy.json"));
        assert_eq!(config.suggest_limit, 10);
        assert!(config.locale.is_none());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = KwmapConfig::from_yaml("locale: ja\nsuggest_limit: 25\n").unwrap();
        assert_eq!(config.locale.as_deref(), Some("ja"));
        assert_eq!(config.suggest_limit, 25);
        assert_eq!(config.corpus_path, PathBuf::from("data/content-index.json"));
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(KwmapConfig::from_yaml("\n").unwrap(), KwmapConfig::default());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(KwmapConfig::from_yaml("store: x.json\n").is_err());
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(KwmapConfig::load(Some(&dir.path().join("nope.yaml"))).is_err());
    }

    #[test]
    fn load_from_file_then_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kwmap.yaml");
        std::fs::write(&path, "store_path: a.json\nlocale: en\n").unwrap();

        let config = KwmapConfig::load(Some(&path))
            .unwrap()
            .with_overrides(Some(Path::new("b.json")), None, None);
        assert_eq!(config.store_path, PathBuf::from("b.json"));
        assert_eq!(config.locale.as_deref(), Some("en"));
    }
}
