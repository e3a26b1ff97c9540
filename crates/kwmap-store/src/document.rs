//! # Taxonomy Document
//!
//! The single structured document persisted by the record store: every
//! keyword group, every usage record, the tag master, and a metadata block
//! whose `version` acts as a format discriminator.
//!
//! ## Shared Namespace
//!
//! Callers address groups either by group id or by any of the group's
//! variant keywords. [`TaxonomyDocument::resolve`] is the one place that
//! interprets such a key. A direct id match always wins over a variant scan.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use kwmap_core::{GroupId, KeywordGroup, TagMasterEntry, Timestamp, UsageRecord};

/// Format version written by this crate. Documents carrying any other
/// version are treated as empty.
pub const DOCUMENT_VERSION: &str = "2.0";

/// Metadata block of the persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Format discriminator.
    pub version: String,
    /// Time of the last save.
    #[serde(default)]
    pub last_updated: Option<Timestamp>,
    /// Number of keyword groups.
    #[serde(default)]
    pub total_groups: usize,
    /// Number of literal variant keywords across all groups.
    #[serde(default)]
    pub total_target_keywords: usize,
    /// Number of tag master entries.
    #[serde(default)]
    pub total_tags: usize,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            last_updated: None,
            total_groups: 0,
            total_target_keywords: 0,
            total_tags: 0,
        }
    }
}

/// The full taxonomy dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyDocument {
    /// Version and summary counts.
    pub metadata: DocumentMetadata,
    /// Keyword groups by id.
    #[serde(default)]
    pub groups: BTreeMap<GroupId, KeywordGroup>,
    /// Usage records by literal keyword. Rebuilt by synchronization.
    #[serde(default)]
    pub usage: BTreeMap<String, UsageRecord>,
    /// Tag master entries by tag.
    #[serde(default)]
    pub tag_master: BTreeMap<String, TagMasterEntry>,
}

/// How a lookup key matched a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The key is the group's id.
    GroupId,
    /// The key is one of the group's variant keywords.
    Variant,
}

/// Outcome of resolving an id-or-keyword key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Resolution<'a> {
    /// The key names this group.
    Group {
        /// The owning group.
        group: &'a KeywordGroup,
        /// Whether the id or a variant matched.
        #[serde(rename = "matchedBy")]
        matched_by: MatchKind,
    },
    /// Nothing answers to the key.
    NotFound,
}

impl<'a> Resolution<'a> {
    /// The resolved group, if any.
    pub fn group(&self) -> Option<&'a KeywordGroup> {
        match self {
            Self::Group { group, .. } => Some(group),
            Self::NotFound => None,
        }
    }
}

impl TaxonomyDocument {
    /// An empty document at the current version.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolve a group id or a literal variant keyword to its group.
    pub fn resolve(&self, key: &str) -> Resolution<'_> {
        if let Some(group) = self.groups.get(key) {
            return Resolution::Group {
                group,
                matched_by: MatchKind::GroupId,
            };
        }
        self.groups
            .values()
            .find(|g| g.has_variant(key))
            .map_or(Resolution::NotFound, |group| Resolution::Group {
                group,
                matched_by: MatchKind::Variant,
            })
    }

    /// Number of literal variant keywords across all groups.
    pub fn variant_count(&self) -> usize {
        self.groups.values().map(|g| g.variants.len()).sum()
    }

    /// Recompute summary counts and stamp `last_updated`.
    pub fn refresh_metadata(&mut self) {
        self.metadata.version = DOCUMENT_VERSION.to_string();
        self.metadata.last_updated = Some(Timestamp::now());
        self.metadata.total_groups = self.groups.len();
        self.metadata.total_target_keywords = self.variant_count();
        self.metadata.total_tags = self.tag_master.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwmap_core::KeywordVariant;

    fn doc_with(groups: Vec<KeywordGroup>) -> TaxonomyDocument {
        let mut doc = TaxonomyDocument::empty();
        for g in groups {
            doc.groups.insert(g.id.clone(), g);
        }
        doc
    }

    #[test]
    fn test_resolve_by_id_then_variant() {
        let doc = doc_with(vec![KeywordGroup::new(
            "crm",
            vec![
                KeywordVariant::new("crm software", 100),
                KeywordVariant::new("crm tools", 50),
            ],
        )]);

        match doc.resolve("crm") {
            Resolution::Group { group, matched_by } => {
                assert_eq!(group.id.as_str(), "crm");
                assert_eq!(matched_by, MatchKind::GroupId);
            }
            Resolution::NotFound => panic!("expected group"),
        }
        match doc.resolve("crm tools") {
            Resolution::Group { matched_by, .. } => assert_eq!(matched_by, MatchKind::Variant),
            Resolution::NotFound => panic!("expected group"),
        }
        assert_eq!(doc.resolve("erp"), Resolution::NotFound);
    }

    #[test]
    fn test_resolution_serializes_tagged() {
        let doc = doc_with(vec![KeywordGroup::new(
            "crm",
            vec![KeywordVariant::new("crm software", 100)],
        )]);
        let found = serde_json::to_value(doc.resolve("crm software")).unwrap();
        assert_eq!(found["kind"], "group");
        assert_eq!(found["matchedBy"], "variant");
        assert_eq!(found["group"]["id"], "crm");
        let missing = serde_json::to_value(doc.resolve("nope")).unwrap();
        assert_eq!(missing, serde_json::json!({"kind": "notfound"}));
    }

    #[test]
    fn test_refresh_metadata_counts() {
        let mut doc = doc_with(vec![
            KeywordGroup::new(
                "crm",
                vec![
                    KeywordVariant::new("crm software", 100),
                    KeywordVariant::new("crm tools", 50),
                ],
            ),
            KeywordGroup::new("erp", vec![KeywordVariant::new("erp", 10)]),
        ]);
        doc.tag_master
            .insert("sales".into(), TagMasterEntry::new("sales"));
        doc.refresh_metadata();
        assert_eq!(doc.metadata.total_groups, 2);
        assert_eq!(doc.metadata.total_target_keywords, 3);
        assert_eq!(doc.metadata.total_tags, 1);
        assert!(doc.metadata.last_updated.is_some());
        assert_eq!(doc.metadata.version, DOCUMENT_VERSION);
    }
}
