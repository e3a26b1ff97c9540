//! # Tag Master Operations
//!
//! Maintenance of the secondary tag vocabulary. Entries are independent of
//! keyword groups: nothing here validates that a target keyword exists, and
//! group deletions never touch tag entries.

use kwmap_core::{KwmapError, TagMasterEntry, ValidationError};

use crate::document::TaxonomyDocument;

impl TaxonomyDocument {
    /// Insert or replace the entry for `entry.tag`. The tag is trimmed.
    pub fn upsert_tag(&mut self, mut entry: TagMasterEntry) -> Result<&TagMasterEntry, KwmapError> {
        let tag = entry.tag.trim().to_string();
        if tag.is_empty() {
            return Err(ValidationError::BlankTag.into());
        }
        if entry.display_name.trim().is_empty() {
            entry.display_name = tag.clone();
        }
        entry.tag = tag.clone();
        tracing::debug!(tag = %tag, targets = entry.target_keywords.len(), "upserted tag");
        self.tag_master.insert(tag.clone(), entry);
        self.get_tag(&tag)
            .ok_or_else(|| KwmapError::TagNotFound(tag))
    }

    /// Remove one entry.
    pub fn remove_tag(&mut self, tag: &str) -> Result<TagMasterEntry, KwmapError> {
        self.tag_master
            .remove(tag)
            .ok_or_else(|| KwmapError::TagNotFound(tag.to_string()))
    }

    /// Exact lookup.
    pub fn get_tag(&self, tag: &str) -> Option<&TagMasterEntry> {
        self.tag_master.get(tag)
    }

    /// Every entry, ordered by tag.
    pub fn list_tags(&self) -> impl Iterator<Item = &TagMasterEntry> {
        self.tag_master.values()
    }

    /// Entries targeting `key` directly, or targeting the id or any variant
    /// of the group `key` resolves to.
    pub fn tags_for_keyword(&self, key: &str) -> Vec<&TagMasterEntry> {
        let group = self.resolve(key).group();
        self.tag_master
            .values()
            .filter(|entry| {
                entry.target_keywords.contains(key)
                    || group.is_some_and(|g| {
                        entry.target_keywords.contains(g.id.as_str())
                            || g.keywords().any(|kw| entry.target_keywords.contains(kw))
                    })
            })
            .collect()
    }
}
