//! # Usage Synchronizer
//!
//! Rebuilds every piece of derived state from the content corpus:
//!
//! 1. A fresh usage map keyed by the literal keyword strings that content
//!    declares (primary or secondary).
//! 2. Each group's `assigned_articles`: the union of the usage articles of
//!    the group's id and of each of its variant keywords. Content may declare
//!    either a literal phrase or a whole intent group.
//!
//! Nothing is patched incrementally. Assignments from content that has been
//! deleted or re-targeted disappear on the next pass, and two passes over an
//! unchanged corpus produce identical state.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use kwmap_core::{ContentCorpus, ContentItem, KwmapError, UsageRecord};
use kwmap_store::TaxonomyDocument;

/// Summary of one synchronization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Content items read.
    pub items_scanned: usize,
    /// Distinct literal keywords declared by content.
    pub keywords_tracked: usize,
    /// Groups left with at least one assigned article.
    pub groups_assigned: usize,
    /// Declared keywords that resolve to no group.
    pub unresolved_keywords: Vec<String>,
}

/// Usage records for every keyword declared in `items`.
pub fn build_usage(items: &[ContentItem]) -> BTreeMap<String, UsageRecord> {
    let mut usage: BTreeMap<String, UsageRecord> = BTreeMap::new();
    for item in items {
        for keyword in item.declared_keywords() {
            usage
                .entry(keyword.to_string())
                .or_default()
                .add(&item.id, item.date);
        }
    }
    usage
}

/// Replace the document's usage map and every group's assignments with
/// state derived from `items`.
pub fn synchronize(doc: &mut TaxonomyDocument, items: &[ContentItem]) -> SyncReport {
    let usage = build_usage(items);

    let unresolved_keywords: Vec<String> = usage
        .keys()
        .filter(|kw| doc.resolve(kw).group().is_none())
        .cloned()
        .collect();

    let mut groups_assigned = 0;
    for group in doc.groups.values_mut() {
        let mut assigned = BTreeSet::new();
        for key in std::iter::once(group.id.as_str()).chain(group.keywords()) {
            if let Some(record) = usage.get(key) {
                assigned.extend(record.articles.iter().cloned());
            }
        }
        if !assigned.is_empty() {
            groups_assigned += 1;
        }
        group.assigned_articles = assigned;
    }

    let report = SyncReport {
        items_scanned: items.len(),
        keywords_tracked: usage.len(),
        groups_assigned,
        unresolved_keywords,
    };
    doc.usage = usage;

    tracing::info!(
        items = report.items_scanned,
        keywords = report.keywords_tracked,
        groups_assigned = report.groups_assigned,
        unresolved = report.unresolved_keywords.len(),
        "synchronized keyword usage"
    );
    report
}

/// Read the corpus (optionally one locale) and synchronize against it.
///
/// The document is untouched if the corpus cannot be read.
pub fn synchronize_corpus(
    doc: &mut TaxonomyDocument,
    corpus: &dyn ContentCorpus,
    locale: Option<&str>,
) -> Result<SyncReport, KwmapError> {
    let items = corpus.items(locale)?;
    Ok(synchronize(doc, &items))
}
