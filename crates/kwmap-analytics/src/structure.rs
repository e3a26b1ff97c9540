//! # Pillar / Cluster Structure
//!
//! Derives the two-level content tree the dashboard draws:
//!
//! ```text
//! pillar article (content assigned to a big/middle group)
//!   ├── keywords: the pillar groups it is assigned to
//!   └── clusters: long-tail groups whose parent is one of those keywords
//!                 and which the same article also serves
//! ```
//!
//! A long-tail group with a parent that attaches to no pillar article is an
//! orphan. Orphans are ordinary output, each tagged with why it did not
//! attach, so unfinished work can be surfaced.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use kwmap_core::{ContentId, GroupId};
use kwmap_store::TaxonomyDocument;

/// One piece of pillar content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarNode {
    /// The pillar article.
    pub content_id: ContentId,
    /// Pillar-tier groups assigned to this content.
    pub keywords: BTreeSet<GroupId>,
    /// Long-tail groups attached under this content.
    pub clusters: BTreeSet<GroupId>,
}

/// Why a cluster group did not attach to any pillar article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanReason {
    /// The parent id names no group (for example, the parent was deleted).
    ParentMissing,
    /// The parent exists but no content is assigned to it as a pillar.
    ParentWithoutContent,
    /// Pillar content exists, but none of it also serves this cluster.
    NotLinked,
}

/// A long-tail group with a parent that attached nowhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanCluster {
    /// The long-tail group.
    pub group_id: GroupId,
    /// The parent it names, which may not exist.
    pub parent_id: GroupId,
    /// Why it did not attach.
    pub reason: OrphanReason,
}

/// Pillar nodes ordered by content id, plus orphaned clusters ordered by
/// group id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarClusterStructure {
    /// Articles carrying pillar-tier groups.
    pub pillars: Vec<PillarNode>,
    /// Clusters that attached nowhere.
    pub orphans: Vec<OrphanCluster>,
}

impl PillarClusterStructure {
    pub fn pillar(&self, content_id: &str) -> Option<&PillarNode> {
        self.pillars
            .iter()
            .find(|p| p.content_id.as_str() == content_id)
    }

    pub fn is_orphan(&self, group_id: &str) -> bool {
        self.orphans.iter().any(|o| o.group_id.as_str() == group_id)
    }
}

/// Build the structure from the document's current assignments.
///
/// A cluster attaches under a pillar article only when that article carries
/// the cluster's parent as a keyword and is itself assigned to the cluster.
pub fn pillar_cluster_structure(doc: &TaxonomyDocument) -> PillarClusterStructure {
    let mut nodes: BTreeMap<&ContentId, PillarNode> = BTreeMap::new();
    for group in doc.groups.values().filter(|g| g.tier.is_pillar()) {
        for article in &group.assigned_articles {
            nodes
                .entry(article)
                .or_insert_with(|| PillarNode {
                    content_id: article.clone(),
                    keywords: BTreeSet::new(),
                    clusters: BTreeSet::new(),
                })
                .keywords
                .insert(group.id.clone());
        }
    }

    let mut orphans = Vec::new();
    for group in doc.groups.values().filter(|g| g.is_cluster()) {
        let Some(parent_id) = group.parent_id.as_ref() else {
            continue;
        };
        let mut attached = false;
        for article in &group.assigned_articles {
            if let Some(node) = nodes.get_mut(article) {
                if node.keywords.contains(parent_id) {
                    node.clusters.insert(group.id.clone());
                    attached = true;
                }
            }
        }
        if attached {
            continue;
        }

        let reason = match doc.groups.get(parent_id) {
            None => OrphanReason::ParentMissing,
            Some(parent) if parent.tier.is_pillar() && !parent.assigned_articles.is_empty() => {
                OrphanReason::NotLinked
            }
            Some(_) => OrphanReason::ParentWithoutContent,
        };
        tracing::debug!(group = %group.id, parent = %parent_id, ?reason, "orphaned cluster");
        orphans.push(OrphanCluster {
            group_id: group.id.clone(),
            parent_id: parent_id.clone(),
            reason,
        });
    }

    PillarClusterStructure {
        pillars: nodes.into_values().collect(),
        orphans,
    }
}
