//! # Business Queries
//!
//! Read-only views over a synchronized taxonomy document: filtering by
//! business line or priority, the "what to write next" planning queue,
//! display labels, impact ranking and the dashboard roll-up.
//!
//! Every ordering ends in a group-id tie-break so output is stable across
//! runs.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use kwmap_core::{GroupId, GroupStatus, KeywordGroup, Tier, WorkflowFlag};
use kwmap_store::TaxonomyDocument;

use crate::structure::pillar_cluster_structure;

/// Groups serving `business`, highest priority first, then by volume.
pub fn by_business<'a>(doc: &'a TaxonomyDocument, business: &str) -> Vec<&'a KeywordGroup> {
    let mut groups: Vec<_> = doc
        .groups
        .values()
        .filter(|g| g.related_business.contains(business))
        .collect();
    groups.sort_by(by_priority_then_volume);
    groups
}

/// Groups at exactly `priority`, by representative volume descending.
pub fn by_priority(doc: &TaxonomyDocument, priority: u8) -> Vec<&KeywordGroup> {
    let mut groups: Vec<_> = doc
        .groups
        .values()
        .filter(|g| g.priority == priority)
        .collect();
    groups.sort_by(|a, b| {
        b.representative_pv()
            .cmp(&a.representative_pv())
            .then_with(|| a.id.cmp(&b.id))
    });
    groups
}

/// Active groups no content targets yet, best candidates first.
///
/// Paused and achieved groups never appear, nor does anything with an
/// assigned article.
pub fn suggest_unused(doc: &TaxonomyDocument, limit: usize) -> Vec<&KeywordGroup> {
    let mut groups: Vec<_> = doc
        .groups
        .values()
        .filter(|g| g.status == GroupStatus::Active && g.assigned_articles.is_empty())
        .collect();
    groups.sort_by(by_priority_then_volume);
    groups.truncate(limit);
    groups
}

fn by_priority_then_volume(a: &&KeywordGroup, b: &&KeywordGroup) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then(b.representative_pv().cmp(&a.representative_pv()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Display label for a keyword or group id: the owning group's
/// representative keyword, or the input unchanged when nothing matches.
pub fn representative_label(doc: &TaxonomyDocument, key: &str) -> String {
    match doc.resolve(key).group() {
        Some(group) => group.representative_keyword().to_string(),
        None => key.to_string(),
    }
}

/// One row of [`impact_ranking`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupImpact {
    /// The ranked group.
    pub group_id: GroupId,
    /// Highest-volume variant keyword.
    pub representative_keyword: String,
    /// The group's tier.
    pub tier: Tier,
    /// Editorial priority, 1 (lowest) to 5.
    pub priority: u8,
    /// Monthly search volume of the representative variant.
    pub representative_pv: u64,
    /// Estimated monthly conversions across all variants, saturating.
    pub business_impact: u64,
}

impl GroupImpact {
    fn of(group: &KeywordGroup) -> Self {
        Self {
            group_id: group.id.clone(),
            representative_keyword: group.representative_keyword().to_string(),
            tier: group.tier,
            priority: group.priority,
            representative_pv: group.representative_pv(),
            business_impact: group.total_business_impact(),
        }
    }
}

/// Groups by estimated business impact, ties broken by volume.
///
/// Groups without a complete estimate score zero and sort last. `None`
/// returns every group.
pub fn impact_ranking(doc: &TaxonomyDocument, limit: Option<usize>) -> Vec<GroupImpact> {
    let mut rows: Vec<_> = doc.groups.values().map(GroupImpact::of).collect();
    rows.sort_by(|a, b| {
        b.business_impact
            .cmp(&a.business_impact)
            .then(b.representative_pv.cmp(&a.representative_pv))
            .then_with(|| a.group_id.cmp(&b.group_id))
    });
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

/// Roll-up counts for the taxonomy dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Number of keyword groups.
    pub total_groups: usize,
    /// Number of variant keywords across all groups.
    pub total_variants: usize,
    /// Number of tag master entries.
    pub total_tags: usize,
    /// Group count per tier.
    pub by_tier: BTreeMap<Tier, usize>,
    /// Group count per status.
    pub by_status: BTreeMap<GroupStatus, usize>,
    /// Group count per effective workflow flag.
    pub by_workflow: BTreeMap<WorkflowFlag, usize>,
    /// Groups with at least one assigned article.
    pub assigned_groups: usize,
    /// Active groups with no assigned article.
    pub unused_active: usize,
    /// Articles that carry at least one pillar-tier group.
    pub pillar_articles: usize,
    /// Long-tail groups that attached under no pillar article.
    pub orphan_clusters: usize,
    /// Sum of every group's business impact, saturating.
    pub total_business_impact: u64,
}

/// Compute the dashboard roll-up.
pub fn dashboard_summary(doc: &TaxonomyDocument) -> DashboardSummary {
    let mut summary = DashboardSummary {
        total_groups: doc.groups.len(),
        total_variants: doc.variant_count(),
        total_tags: doc.tag_master.len(),
        ..DashboardSummary::default()
    };
    for group in doc.groups.values() {
        *summary.by_tier.entry(group.tier).or_default() += 1;
        *summary.by_status.entry(group.status).or_default() += 1;
        *summary
            .by_workflow
            .entry(group.effective_workflow_flag())
            .or_default() += 1;
        if group.assigned_articles.is_empty() {
            if group.status == GroupStatus::Active {
                summary.unused_active += 1;
            }
        } else {
            summary.assigned_groups += 1;
        }
        summary.total_business_impact = summary
            .total_business_impact
            .saturating_add(group.total_business_impact());
    }
    let structure = pillar_cluster_structure(doc);
    summary.pillar_articles = structure.pillars.len();
    summary.orphan_clusters = structure.orphans.len();
    summary
}
