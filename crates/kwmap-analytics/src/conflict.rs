//! # Conflict Detector
//!
//! Two independent checks run before new content is planned:
//!
//! - **Literal reuse**: a keyword string content already declares is being
//!   proposed again. Severity grows with how many items already use it.
//! - **Same intent**: several content items already serve one intent group,
//!   so editorial effort is split across pages that compete with each other.

use std::collections::BTreeSet;

use serde::Serialize;

use kwmap_core::{ContentId, GroupId, Tier};
use kwmap_store::TaxonomyDocument;

/// How heavily a literal keyword is already used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    Low,
    Medium,
    High,
}

impl ConflictSeverity {
    /// Severity for a keyword already used by `frequency` items.
    pub fn from_frequency(frequency: usize) -> Self {
        match frequency {
            0 | 1 => Self::Low,
            2 => Self::Medium,
            _ => Self::High,
        }
    }
}

/// A proposed keyword that content already declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordConflict {
    /// The proposed keyword, trimmed.
    pub keyword: String,
    /// Content already declaring it.
    pub articles: Vec<ContentId>,
    /// Declaration count from the usage record.
    pub frequency: usize,
    /// Graded from `frequency`.
    pub severity: ConflictSeverity,
}

/// An intent group already served by more than one content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SameIntentConflict {
    /// The group the proposed keyword resolved to.
    pub group_id: GroupId,
    /// The group's highest-volume variant.
    pub representative_keyword: String,
    /// The group's tier.
    pub tier: Tier,
    /// Every variant keyword of the group, in stored order.
    pub variants: Vec<String>,
    /// Content assigned to the group.
    pub articles: Vec<ContentId>,
    /// Human-readable next step for the editor.
    pub recommendation: String,
}

/// Literal reuse check for each proposed keyword, in input order.
///
/// Keywords are trimmed; blank and repeated inputs are checked once.
pub fn check_keyword_conflicts<S: AsRef<str>>(
    doc: &TaxonomyDocument,
    keywords: &[S],
) -> Vec<KeywordConflict> {
    let mut seen = BTreeSet::new();
    let mut conflicts = Vec::new();
    for keyword in keywords.iter().map(|k| k.as_ref().trim()) {
        if keyword.is_empty() || !seen.insert(keyword) {
            continue;
        }
        let Some(record) = doc.usage.get(keyword) else {
            continue;
        };
        if record.articles.is_empty() {
            continue;
        }
        conflicts.push(KeywordConflict {
            keyword: keyword.to_string(),
            articles: record.articles.iter().cloned().collect(),
            frequency: record.frequency,
            severity: ConflictSeverity::from_frequency(record.frequency),
        });
    }
    if !conflicts.is_empty() {
        tracing::debug!(count = conflicts.len(), "literal keyword conflicts");
    }
    conflicts
}

/// Same-intent check: each proposed keyword (or group id) is resolved to its
/// group, and every group reached is reported at most once.
pub fn check_same_intent_conflicts<S: AsRef<str>>(
    doc: &TaxonomyDocument,
    keywords: &[S],
) -> Vec<SameIntentConflict> {
    let mut seen: BTreeSet<&GroupId> = BTreeSet::new();
    let mut conflicts = Vec::new();
    for keyword in keywords.iter().map(|k| k.as_ref().trim()) {
        let Some(group) = doc.resolve(keyword).group() else {
            continue;
        };
        if !seen.insert(&group.id) || group.assigned_articles.len() <= 1 {
            continue;
        }
        let representative = group.representative_keyword().to_string();
        conflicts.push(SameIntentConflict {
            group_id: group.id.clone(),
            recommendation: format!(
                "{} articles target the intent \"{}\"; consolidate them into one pillar page \
                 and re-target or redirect the rest",
                group.assigned_articles.len(),
                representative
            ),
            representative_keyword: representative,
            tier: group.tier,
            variants: group.keywords().map(str::to_string).collect(),
            articles: group.assigned_articles.iter().cloned().collect(),
        });
    }
    if !conflicts.is_empty() {
        tracing::debug!(count = conflicts.len(), "same-intent conflicts");
    }
    conflicts
}
