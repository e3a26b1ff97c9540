//! # Legacy Schema Migration
//!
//! Older taxonomy files stored one flat record per literal keyword:
//!
//! ```json
//! { "keywords": { "crm software": { "tier": "middle", "estimatedPv": 900,
//!                                   "parentKeyword": null, ... } },
//!   "keywordUsage": { ... }, "tagMaster": { ... } }
//! ```
//!
//! [`migrate_legacy`] converts such a file into the grouped schema once:
//! every flat keyword becomes a single-variant group whose id is the keyword
//! itself, and `parentKeyword` becomes `parentId`. The record store never
//! detects or converts the legacy shape on its own; a legacy file handed to
//! `RecordStore::load` is simply an unusable document.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use kwmap_core::{
    ContentId, GroupId, GroupStatus, KeywordGroup, KeywordVariant, KwmapError, RankHistoryEntry,
    TagMasterEntry, Tier, Timestamp, UsageRecord, WorkflowFlag, MAX_PRIORITY, MIN_PRIORITY,
};

use crate::document::TaxonomyDocument;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyDocument {
    #[serde(default)]
    keywords: BTreeMap<String, LegacyKeyword>,
    #[serde(default)]
    keyword_usage: BTreeMap<String, LegacyUsage>,
    #[serde(default)]
    tag_master: BTreeMap<String, TagMasterEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyKeyword {
    #[serde(default)]
    tier: Option<Tier>,
    #[serde(default)]
    parent_keyword: Option<String>,
    #[serde(default)]
    estimated_pv: u64,
    #[serde(default)]
    current_rank: Option<u32>,
    #[serde(default)]
    rank_history: Vec<RankHistoryEntry>,
    #[serde(default)]
    expected_rank: Option<u32>,
    #[serde(default)]
    cvr: Option<f64>,
    #[serde(default)]
    related_business: BTreeSet<String>,
    #[serde(default)]
    related_tags: BTreeSet<String>,
    #[serde(default)]
    priority: Option<u8>,
    #[serde(default)]
    status: Option<GroupStatus>,
    #[serde(default)]
    workflow_flag: Option<WorkflowFlag>,
    #[serde(default)]
    assigned_articles: BTreeSet<ContentId>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyUsage {
    #[serde(default)]
    articles: BTreeSet<ContentId>,
    #[serde(default)]
    last_used: Option<NaiveDate>,
}

/// What the migration changed beyond the mechanical reshaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    /// Groups written.
    pub groups_created: usize,
    /// Flat entries dropped because their keyword was blank.
    pub skipped_blank: usize,
    /// Groups whose priority was clamped into 1..=5.
    pub clamped_priorities: Vec<GroupId>,
    /// Long-tail groups whose long-tail parent was cleared.
    pub detached_parents: Vec<GroupId>,
}

/// Convert a legacy flat document into the grouped schema.
///
/// # Errors
///
/// `Serialization` if `json` does not have the legacy shape.
pub fn migrate_legacy(json: &str) -> Result<(TaxonomyDocument, MigrationReport), KwmapError> {
    let legacy: LegacyDocument = serde_json::from_str(json)?;
    let mut doc = TaxonomyDocument::empty();
    let mut report = MigrationReport::default();

    for (keyword, flat) in legacy.keywords {
        let keyword = keyword.trim().to_string();
        if keyword.is_empty() {
            report.skipped_blank += 1;
            continue;
        }
        let id = GroupId::new(keyword.clone());
        let raw_priority = flat.priority.unwrap_or(3);
        let priority = raw_priority.clamp(MIN_PRIORITY, MAX_PRIORITY);
        if priority != raw_priority {
            report.clamped_priorities.push(id.clone());
        }

        let mut group = KeywordGroup::new(
            id.clone(),
            vec![KeywordVariant {
                keyword,
                estimated_pv: flat.estimated_pv,
                current_rank: flat.current_rank.filter(|r| *r >= 1),
                rank_history: flat.rank_history,
                expected_rank: flat.expected_rank.filter(|r| *r >= 1),
                cvr: flat.cvr.filter(|c| (0.0..=1.0).contains(c)),
            }],
        );
        group.tier = flat.tier.unwrap_or(Tier::Middle);
        group.parent_id = flat
            .parent_keyword
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(GroupId::new);
        group.related_business = flat.related_business;
        group.related_tags = flat.related_tags;
        group.priority = priority;
        group.status = flat.status.unwrap_or_default();
        group.workflow_flag = flat.workflow_flag;
        group.assigned_articles = flat.assigned_articles;
        if let Some(ts) = flat.created_at.as_deref().and_then(|s| Timestamp::parse_lenient(s).ok()) {
            group.created_at = ts;
        }
        group.updated_at = flat
            .updated_at
            .as_deref()
            .and_then(|s| Timestamp::parse_lenient(s).ok())
            .unwrap_or(group.created_at);

        doc.groups.insert(id, group);
    }

    // A long-tail parent was never meaningful; the child becomes independent.
    let longtail: BTreeSet<GroupId> = doc
        .groups
        .values()
        .filter(|g| g.tier == Tier::Longtail)
        .map(|g| g.id.clone())
        .collect();
    for group in doc.groups.values_mut() {
        let bad_parent = group.tier == Tier::Longtail
            && group.parent_id.as_ref().is_some_and(|p| longtail.contains(p) || *p == group.id);
        if bad_parent {
            group.parent_id = None;
            report.detached_parents.push(group.id.clone());
        }
    }

    for (keyword, usage) in legacy.keyword_usage {
        doc.usage.insert(
            keyword,
            UsageRecord {
                frequency: usage.articles.len(),
                articles: usage.articles,
                last_used: usage.last_used,
            },
        );
    }
    for (tag, mut entry) in legacy.tag_master {
        if entry.tag.trim().is_empty() {
            entry.tag = tag.clone();
        }
        doc.tag_master.insert(tag, entry);
    }

    report.groups_created = doc.groups.len();
    doc.refresh_metadata();
    tracing::info!(
        groups = report.groups_created,
        skipped = report.skipped_blank,
        detached = report.detached_parents.len(),
        "migrated legacy keyword taxonomy"
    );
    Ok((doc, report))
}

/// Read a legacy file and migrate it.
pub fn migrate_legacy_file(
    path: &Path,
) -> Result<(TaxonomyDocument, MigrationReport), KwmapError> {
    let content = std::fs::read_to_string(path)?;
    migrate_legacy(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY: &str = r#"{
        "keywords": {
            "crm software": {
                "tier": "middle",
                "estimatedPv": 9000,
                "expectedRank": 3,
                "cvr": 0.02,
                "relatedBusiness": ["saas"],
                "priority": 5,
                "assignedArticles": ["crm-guide"],
                "createdAt": "2025-06-01T09:00:00+09:00"
            },
            "free crm": {
                "tier": "longtail",
                "parentKeyword": "crm software",
                "estimatedPv": 800,
                "priority": 9
            },
            "free crm trial": {
                "tier": "longtail",
                "parentKeyword": "free crm"
            },
            "  ": { "estimatedPv": 1 }
        },
        "keywordUsage": {
            "crm software": { "articles": ["crm-guide"], "frequency": 1, "lastUsed": "2025-07-01" }
        },
        "tagMaster": {
            "sales": { "tag": "sales", "displayName": "Sales", "targetKeywords": ["crm software"] }
        }
    }"#;

    #[test]
    fn test_flat_keywords_become_single_variant_groups() {
        let (doc, report) = migrate_legacy(LEGACY).unwrap();
        assert_eq!(report.groups_created, 3);
        assert_eq!(report.skipped_blank, 1);

        let crm = doc.get_by_id("crm software").unwrap();
        assert_eq!(crm.variants.len(), 1);
        assert_eq!(crm.representative_keyword(), "crm software");
        assert_eq!(crm.variants[0].estimated_pv, 9000);
        assert_eq!(crm.priority, 5);
        assert_eq!(crm.created_at.to_iso8601(), "2025-06-01T00:00:00Z");
        assert_eq!(crm.updated_at, crm.created_at);
        assert_eq!(crm.assigned_articles.len(), 1);
    }

    #[test]
    fn test_parent_keyword_becomes_parent_id() {
        let (doc, _) = migrate_legacy(LEGACY).unwrap();
        let free = doc.get_by_id("free crm").unwrap();
        assert!(free.is_cluster());
        assert_eq!(free.parent_id, Some(GroupId::new("crm software")));
    }

    #[test]
    fn test_repairs_reported() {
        let (doc, report) = migrate_legacy(LEGACY).unwrap();
        assert_eq!(report.clamped_priorities, vec![GroupId::new("free crm")]);
        assert_eq!(doc.get_by_id("free crm").unwrap().priority, 5);
        assert_eq!(report.detached_parents, vec![GroupId::new("free crm trial")]);
        assert!(doc
            .get_by_id("free crm trial")
            .unwrap()
            .is_independent_longtail());
    }

    #[test]
    fn test_usage_and_tags_carried_over() {
        let (doc, _) = migrate_legacy(LEGACY).unwrap();
        let usage = &doc.usage["crm software"];
        assert_eq!(usage.frequency, 1);
        assert_eq!(usage.last_used, Some("2025-07-01".parse().unwrap()));
        assert_eq!(doc.get_tag("sales").unwrap().display_name, "Sales");
        assert_eq!(doc.metadata.total_target_keywords, 3);
    }

    #[test]
    fn test_migrated_groups_pass_validation() {
        let (doc, _) = migrate_legacy(LEGACY).unwrap();
        for group in doc.groups.values() {
            group.validate_shape().unwrap();
        }
    }

    #[test]
    fn test_not_json_is_an_error() {
        assert!(migrate_legacy("[1, 2").is_err());
    }
}
