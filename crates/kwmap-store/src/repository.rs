//! # Group Repository
//!
//! CRUD, lookup, rank tracking and tier/merge operations over the keyword
//! groups of a [`TaxonomyDocument`].
//!
//! ## Invariants Enforced Before Mutation
//!
//! - Every group holds at least one variant; keywords are non-blank and
//!   unique inside the group.
//! - A variant keyword belongs to exactly one group, and no group id doubles
//!   as another group's variant keyword.
//! - A long-tail group never names a long-tail group as parent, and a
//!   long-tail group never has clusters of its own.
//! - Priority stays within 1..=5.
//!
//! A rejected operation leaves the document exactly as it was.
//!
//! ## Not Enforced
//!
//! A `parent_id` may name a group that does not exist. Deleting a group
//! does not touch the groups that name it as parent; analytics report
//! those clusters as orphans.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use kwmap_core::{
    GroupId, GroupPatch, KeywordGroup, KeywordVariant, KwmapError, RankSource, Tier, Timestamp,
    ValidationError,
};

use crate::document::TaxonomyDocument;

/// Result of a bulk upsert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpsertOutcome {
    /// Groups that were patched, in request order.
    pub updated: Vec<GroupId>,
    /// Requested ids that did not exist. Bulk upserts never create.
    pub skipped: Vec<GroupId>,
}

impl TaxonomyDocument {
    /// Exact lookup by group id.
    pub fn get_by_id(&self, id: &str) -> Option<&KeywordGroup> {
        self.groups.get(id)
    }

    /// Lookup by group id or, failing that, by any variant keyword.
    pub fn get_by_variant_keyword(&self, keyword: &str) -> Option<&KeywordGroup> {
        self.resolve(keyword).group()
    }

    /// Exact lookup by group id, failing with `GroupNotFound`.
    pub fn require_group(&self, id: &str) -> Result<&KeywordGroup, KwmapError> {
        self.groups.get(id).ok_or_else(|| KwmapError::GroupNotFound {
            id: id.to_string(),
        })
    }

    /// Create the group if absent, otherwise merge `patch` into it.
    ///
    /// New groups start as `middle`, priority 3, `active`, with empty
    /// collections; the patch must supply at least one variant.
    /// A long-tail group moved to a pillar tier drops its parent unless
    /// the same patch sets one. `updated_at` is refreshed either way.
    pub fn upsert(
        &mut self,
        id: impl Into<GroupId>,
        patch: GroupPatch,
    ) -> Result<&KeywordGroup, KwmapError> {
        let id = id.into();
        let created = !self.groups.contains_key(&id);
        let candidate = build_candidate(self.groups.get(&id), &id, &patch);
        validate_candidate(&self.groups, &candidate)?;
        tracing::debug!(group_id = %id, created, "upserted keyword group");
        Ok(&*store_group(&mut self.groups, candidate))
    }

    /// Patch many existing groups in one pass.
    ///
    /// Unknown ids are skipped, never created. Patches apply in order, each
    /// validated against the result of the ones before it; if any is
    /// rejected, none are applied.
    pub fn bulk_upsert<I>(&mut self, updates: I) -> Result<BulkUpsertOutcome, KwmapError>
    where
        I: IntoIterator<Item = (GroupId, GroupPatch)>,
    {
        let mut staged = self.groups.clone();
        let mut outcome = BulkUpsertOutcome::default();

        for (id, patch) in updates {
            let Some(existing) = staged.get(&id) else {
                tracing::warn!(group_id = %id, "bulk upsert skipped unknown keyword group");
                outcome.skipped.push(id);
                continue;
            };
            let candidate = build_candidate(Some(existing), &id, &patch);
            validate_candidate(&staged, &candidate)?;
            store_group(&mut staged, candidate);
            outcome.updated.push(id);
        }

        self.groups = staged;
        tracing::info!(
            updated = outcome.updated.len(),
            skipped = outcome.skipped.len(),
            "bulk upsert applied"
        );
        Ok(outcome)
    }

    /// Remove one group. Groups naming it as parent keep their dangling
    /// `parent_id`.
    pub fn delete(&mut self, id: &str) -> Result<KeywordGroup, KwmapError> {
        let removed = self
            .groups
            .remove(id)
            .ok_or_else(|| KwmapError::GroupNotFound { id: id.to_string() })?;
        let orphaned = self
            .groups
            .values()
            .filter(|g| g.parent_id.as_ref() == Some(&removed.id))
            .count();
        tracing::info!(group_id = %removed.id, orphaned, "deleted keyword group");
        Ok(removed)
    }

    /// Append a rank observation to one variant and make it current.
    ///
    /// # Errors
    ///
    /// - `GroupNotFound` / `VariantNotFound` if either lookup misses.
    /// - `Validation(InvalidRank)` if `rank` is 0.
    pub fn update_variant_rank(
        &mut self,
        group_id: &str,
        keyword: &str,
        rank: u32,
        source: RankSource,
        date: NaiveDate,
    ) -> Result<&KeywordVariant, KwmapError> {
        let group = self
            .groups
            .get_mut(group_id)
            .ok_or_else(|| KwmapError::GroupNotFound {
                id: group_id.to_string(),
            })?;
        let idx = group
            .variants
            .iter()
            .position(|v| v.keyword == keyword)
            .ok_or_else(|| KwmapError::VariantNotFound {
                group_id: group_id.to_string(),
                keyword: keyword.to_string(),
            })?;
        group.variants[idx].record_rank(rank, source, date)?;
        group.updated_at = Timestamp::now();
        tracing::debug!(group_id, keyword, rank, source = %source, "recorded variant rank");
        Ok(&group.variants[idx])
    }

    /// Move a group to another tier.
    ///
    /// - To `longtail`: `parent` becomes the new parent, or `None` for an
    ///   independent long-tail keyword. Rejected while other long-tail
    ///   groups still name this group as parent.
    /// - From `longtail` to a pillar tier: the parent is stripped and
    ///   `parent` is ignored.
    /// - Between pillar tiers: the parent is kept unless `parent` is given.
    pub fn change_tier(
        &mut self,
        id: &str,
        tier: Tier,
        parent: Option<GroupId>,
    ) -> Result<&KeywordGroup, KwmapError> {
        let mut candidate = self.require_group(id)?.clone();
        let previous = candidate.tier;
        candidate.tier = tier;
        match (previous, tier) {
            (_, Tier::Longtail) => candidate.parent_id = parent,
            (Tier::Longtail, _) => candidate.parent_id = None,
            _ => {
                if parent.is_some() {
                    candidate.parent_id = parent;
                }
            }
        }
        candidate.updated_at = Timestamp::now();
        validate_candidate(&self.groups, &candidate)?;
        tracing::info!(group_id = id, from = %previous, to = %tier, "changed keyword group tier");
        Ok(&*store_group(&mut self.groups, candidate))
    }

    /// Fold `source` into `target` and remove `source`.
    ///
    /// The target keeps its id, tier and status. Source variants are
    /// appended after the target's own, each with its rank history intact.
    /// Business units, tags and assigned articles are unioned and the higher
    /// priority wins. Clusters of `source` are re-pointed at `target` when
    /// the target is a pillar tier; otherwise they are left dangling.
    pub fn merge(&mut self, source: &str, target: &str) -> Result<&KeywordGroup, KwmapError> {
        if source == target {
            return Err(ValidationError::SelfMerge {
                group_id: source.to_string(),
            }
            .into());
        }
        let absorbed = self.require_group(source)?.clone();
        let mut candidate = self.require_group(target)?.clone();
        let now = Timestamp::now();

        candidate.variants.extend(absorbed.variants.iter().cloned());
        candidate
            .related_business
            .extend(absorbed.related_business.iter().cloned());
        candidate
            .related_tags
            .extend(absorbed.related_tags.iter().cloned());
        candidate
            .assigned_articles
            .extend(absorbed.assigned_articles.iter().cloned());
        candidate.priority = candidate.priority.max(absorbed.priority);
        if candidate.parent_id.as_ref() == Some(&absorbed.id) {
            candidate.parent_id = None;
        }
        candidate.updated_at = now;

        let mut staged = self.groups.clone();
        staged.remove(source);
        let mut repointed = 0usize;
        if candidate.tier.is_pillar() {
            for group in staged.values_mut() {
                if group.id != candidate.id && group.parent_id.as_ref() == Some(&absorbed.id) {
                    group.parent_id = Some(candidate.id.clone());
                    group.updated_at = now;
                    repointed += 1;
                }
            }
        }
        validate_candidate(&staged, &candidate)?;
        store_group(&mut staged, candidate);
        self.groups = staged;

        tracing::info!(source, target, repointed, "merged keyword groups");
        self.require_group(target)
    }
}

/// The group as it would look after applying `patch`.
fn build_candidate(
    existing: Option<&KeywordGroup>,
    id: &GroupId,
    patch: &GroupPatch,
) -> KeywordGroup {
    let mut group = existing
        .cloned()
        .unwrap_or_else(|| KeywordGroup::new(id.clone(), Vec::new()));
    patch.apply_to(&mut group);
    let promoted = existing.is_some_and(|g| g.tier == Tier::Longtail) && group.tier.is_pillar();
    if promoted && patch.parent_id.is_none() {
        group.parent_id = None;
    }
    group.updated_at = Timestamp::now();
    group
}

/// Check `candidate` against itself and against every other group in
/// `groups`. An entry in `groups` with the candidate's id is treated as the
/// candidate's previous version and ignored.
fn validate_candidate(
    groups: &BTreeMap<GroupId, KeywordGroup>,
    candidate: &KeywordGroup,
) -> Result<(), ValidationError> {
    candidate.validate_shape()?;

    for other in groups.values().filter(|g| g.id != candidate.id) {
        if candidate.has_variant(other.id.as_str()) {
            return Err(ValidationError::NamespaceCollision {
                key: other.id.to_string(),
                owner: other.id.to_string(),
            });
        }
        if other.has_variant(candidate.id.as_str()) {
            return Err(ValidationError::NamespaceCollision {
                key: candidate.id.to_string(),
                owner: other.id.to_string(),
            });
        }
        if let Some(taken) = candidate.keywords().find(|kw| other.has_variant(kw)) {
            return Err(ValidationError::KeywordOwnedElsewhere {
                keyword: taken.to_string(),
                owner: other.id.to_string(),
            });
        }
    }

    if candidate.tier == Tier::Longtail {
        if let Some(parent) = candidate.parent_id.as_ref().and_then(|p| groups.get(p)) {
            if parent.tier == Tier::Longtail && parent.id != candidate.id {
                return Err(ValidationError::LongtailParent {
                    group_id: candidate.id.to_string(),
                    parent_id: parent.id.to_string(),
                });
            }
        }
        let clusters = groups
            .values()
            .filter(|g| {
                g.id != candidate.id
                    && g.tier == Tier::Longtail
                    && g.parent_id.as_ref() == Some(&candidate.id)
            })
            .count();
        if clusters > 0 {
            return Err(ValidationError::HasClusters {
                group_id: candidate.id.to_string(),
                clusters,
            });
        }
    }

    Ok(())
}

fn store_group(
    groups: &mut BTreeMap<GroupId, KeywordGroup>,
    group: KeywordGroup,
) -> &mut KeywordGroup {
    match groups.entry(group.id.clone()) {
        Entry::Occupied(mut slot) => {
            slot.insert(group);
            slot.into_mut()
        }
        Entry::Vacant(slot) => slot.insert(group),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwmap_core::{ContentId, GroupStatus, WorkflowFlag};

    fn variants(keywords: &[&str]) -> Vec<KeywordVariant> {
        keywords.iter().map(|k| KeywordVariant::new(*k, 100)).collect()
    }

    fn patch(keywords: &[&str]) -> GroupPatch {
        GroupPatch::default().with_variants(variants(keywords))
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    /// crm (middle) ← crm-free (longtail cluster), erp (big).
    fn seeded() -> TaxonomyDocument {
        let mut doc = TaxonomyDocument::empty();
        doc.upsert("crm", patch(&["crm software", "crm tools"]))
            .unwrap();
        doc.upsert(
            "crm-free",
            patch(&["free crm"])
                .with_tier(Tier::Longtail)
                .with_parent(Some(GroupId::new("crm"))),
        )
        .unwrap();
        doc.upsert("erp", patch(&["erp system"]).with_tier(Tier::Big))
            .unwrap();
        doc
    }

    // ── Lookup ───────────────────────────────────────────────────────

    #[test]
    fn test_lookup_by_id_and_variant() {
        let doc = seeded();
        assert_eq!(doc.get_by_id("crm").unwrap().id.as_str(), "crm");
        assert!(doc.get_by_id("crm tools").is_none());
        assert_eq!(
            doc.get_by_variant_keyword("crm tools").unwrap().id.as_str(),
            "crm"
        );
        assert_eq!(
            doc.get_by_variant_keyword("crm").unwrap().id.as_str(),
            "crm"
        );
        assert!(doc.get_by_variant_keyword("hr software").is_none());
    }

    // ── Upsert ───────────────────────────────────────────────────────

    #[test]
    fn test_upsert_creates_with_defaults() {
        let mut doc = TaxonomyDocument::empty();
        let g = doc.upsert("crm", patch(&["crm software"])).unwrap();
        assert_eq!(g.tier, Tier::Middle);
        assert_eq!(g.priority, 3);
        assert_eq!(g.status, GroupStatus::Active);
        assert!(g.related_business.is_empty());
    }

    #[test]
    fn test_upsert_without_variants_is_rejected() {
        let mut doc = TaxonomyDocument::empty();
        let err = doc.upsert("crm", GroupPatch::default()).unwrap_err();
        assert!(err.is_validation());
        assert!(doc.groups.is_empty());
    }

    #[test]
    fn test_upsert_cannot_erase_variants() {
        let mut doc = seeded();
        let before = doc.clone();
        let err = doc.upsert("crm", patch(&[])).unwrap_err();
        assert!(matches!(
            err,
            KwmapError::Validation(ValidationError::EmptyVariants { .. })
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_upsert_merges_fields_and_refreshes_updated_at() {
        let mut doc = seeded();
        let created_at = doc.get_by_id("crm").unwrap().created_at;
        let g = doc
            .upsert(
                "crm",
                GroupPatch::default()
                    .with_priority(5)
                    .with_business(["saas"])
                    .with_workflow_flag(Some(WorkflowFlag::ToCreate)),
            )
            .unwrap();
        assert_eq!(g.priority, 5);
        assert_eq!(g.variants.len(), 2);
        assert!(g.related_business.contains("saas"));
        assert_eq!(g.workflow_flag, Some(WorkflowFlag::ToCreate));
        assert_eq!(g.created_at, created_at);
        assert!(g.updated_at >= created_at);
    }

    #[test]
    fn test_upsert_keeps_derived_assignments() {
        let mut doc = seeded();
        doc.groups
            .get_mut("crm")
            .unwrap()
            .assigned_articles
            .insert(ContentId::new("post-1"));
        let g = doc
            .upsert("crm", GroupPatch::default().with_priority(4))
            .unwrap();
        assert_eq!(g.assigned_articles.len(), 1);
    }

    #[test]
    fn test_keyword_is_globally_unique() {
        let mut doc = seeded();
        let err = doc.upsert("crm-2", patch(&["crm tools"])).unwrap_err();
        assert!(matches!(
            err,
            KwmapError::Validation(ValidationError::KeywordOwnedElsewhere { .. })
        ));
        assert!(doc.get_by_id("crm-2").is_none());
    }

    #[test]
    fn test_group_id_cannot_shadow_a_variant() {
        let mut doc = seeded();
        let err = doc.upsert("crm tools", patch(&["crm tools 2"])).unwrap_err();
        assert!(matches!(
            err,
            KwmapError::Validation(ValidationError::NamespaceCollision { .. })
        ));
        let err = doc.upsert("hr", patch(&["erp"])).unwrap_err();
        assert!(matches!(
            err,
            KwmapError::Validation(ValidationError::NamespaceCollision { .. })
        ));
    }

    #[test]
    fn test_padded_keyword_is_rejected() {
        let mut doc = seeded();
        let before = doc.clone();
        let err = doc
            .upsert("crm-pad", patch(&[" crm tools "]))
            .unwrap_err();
        assert!(matches!(
            err,
            KwmapError::Validation(ValidationError::UntrimmedKeyword { .. })
        ));
        assert_eq!(doc, before);
        assert!(doc.get_by_variant_keyword(" crm tools ").is_none());
    }

    #[test]
    fn test_longtail_parent_must_not_be_longtail() {
        let mut doc = seeded();
        let err = doc
            .upsert(
                "crm-free-trial",
                patch(&["free crm trial"])
                    .with_tier(Tier::Longtail)
                    .with_parent(Some(GroupId::new("crm-free"))),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            KwmapError::Validation(ValidationError::LongtailParent { .. })
        ));
    }

    #[test]
    fn test_dangling_parent_is_accepted() {
        let mut doc = seeded();
        let g = doc
            .upsert(
                "hr-free",
                patch(&["free hr software"])
                    .with_tier(Tier::Longtail)
                    .with_parent(Some(GroupId::new("hr"))),
            )
            .unwrap();
        assert!(g.is_cluster());
    }

    // ── Bulk upsert ──────────────────────────────────────────────────

    #[test]
    fn test_bulk_upsert_skips_unknown_ids() {
        let mut doc = seeded();
        let outcome = doc
            .bulk_upsert(vec![
                (GroupId::new("crm"), GroupPatch::default().with_priority(1)),
                (GroupId::new("ghost"), patch(&["ghost kw"])),
                (
                    GroupId::new("erp"),
                    GroupPatch::default().with_status(GroupStatus::Paused),
                ),
            ])
            .unwrap();
        assert_eq!(outcome.updated, vec![GroupId::new("crm"), GroupId::new("erp")]);
        assert_eq!(outcome.skipped, vec![GroupId::new("ghost")]);
        assert!(doc.get_by_id("ghost").is_none());
        assert_eq!(doc.get_by_id("crm").unwrap().priority, 1);
        assert_eq!(doc.get_by_id("erp").unwrap().status, GroupStatus::Paused);
    }

    #[test]
    fn test_bulk_upsert_is_all_or_nothing() {
        let mut doc = seeded();
        let before = doc.clone();
        let result = doc.bulk_upsert(vec![
            (GroupId::new("crm"), GroupPatch::default().with_priority(1)),
            (GroupId::new("erp"), GroupPatch::default().with_priority(9)),
        ]);
        assert!(result.is_err());
        assert_eq!(doc, before);
    }

    // ── Delete ───────────────────────────────────────────────────────

    #[test]
    fn test_delete_does_not_cascade() {
        let mut doc = seeded();
        let removed = doc.delete("crm").unwrap();
        assert_eq!(removed.id.as_str(), "crm");
        assert!(doc.get_by_id("crm").is_none());
        let child = doc.get_by_id("crm-free").unwrap();
        assert_eq!(child.parent_id, Some(GroupId::new("crm")));
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let mut doc = seeded();
        assert!(doc.delete("ghost").unwrap_err().is_not_found());
    }

    // ── Rank updates ─────────────────────────────────────────────────

    #[test]
    fn test_update_variant_rank() {
        let mut doc = seeded();
        doc.update_variant_rank("crm", "crm tools", 12, RankSource::Manual, date("2026-03-01"))
            .unwrap();
        let v = doc
            .update_variant_rank("crm", "crm tools", 7, RankSource::Api, date("2026-04-01"))
            .unwrap();
        assert_eq!(v.current_rank, Some(7));
        assert_eq!(v.rank_history.len(), 2);
        let untouched = &doc.get_by_id("crm").unwrap().variants[0];
        assert!(untouched.rank_history.is_empty());
    }

    #[test]
    fn test_update_variant_rank_not_found() {
        let mut doc = seeded();
        let err = doc
            .update_variant_rank("ghost", "crm tools", 3, RankSource::Manual, date("2026-03-01"))
            .unwrap_err();
        assert!(matches!(err, KwmapError::GroupNotFound { .. }));

        let err = doc
            .update_variant_rank("crm", "free crm", 3, RankSource::Manual, date("2026-03-01"))
            .unwrap_err();
        assert!(matches!(err, KwmapError::VariantNotFound { .. }));
    }

    #[test]
    fn test_update_variant_rank_rejects_zero() {
        let mut doc = seeded();
        let before = doc.clone();
        let err = doc
            .update_variant_rank("crm", "crm tools", 0, RankSource::Manual, date("2026-03-01"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(doc, before);
    }

    // ── Tier changes ─────────────────────────────────────────────────

    #[test]
    fn test_promote_longtail_strips_parent() {
        let mut doc = seeded();
        let g = doc
            .change_tier("crm-free", Tier::Middle, Some(GroupId::new("erp")))
            .unwrap();
        assert_eq!(g.tier, Tier::Middle);
        assert_eq!(g.parent_id, None);
    }

    #[test]
    fn test_promote_longtail_via_upsert_strips_parent() {
        let mut doc = seeded();
        let g = doc
            .upsert("crm-free", GroupPatch::default().with_tier(Tier::Middle))
            .unwrap();
        assert_eq!(g.tier, Tier::Middle);
        assert_eq!(g.parent_id, None);

        let outcome = doc
            .bulk_upsert([(
                GroupId::new("crm-free"),
                GroupPatch::default()
                    .with_tier(Tier::Longtail)
                    .with_parent(Some(GroupId::new("crm"))),
            )])
            .unwrap();
        assert_eq!(outcome.updated.len(), 1);
        doc.bulk_upsert([(
            GroupId::new("crm-free"),
            GroupPatch::default().with_tier(Tier::Big),
        )])
        .unwrap();
        assert_eq!(doc.get_by_id("crm-free").unwrap().parent_id, None);
    }

    #[test]
    fn test_promote_via_upsert_keeps_explicit_parent() {
        let mut doc = seeded();
        let g = doc
            .upsert(
                "crm-free",
                GroupPatch::default()
                    .with_tier(Tier::Middle)
                    .with_parent(Some(GroupId::new("erp"))),
            )
            .unwrap();
        assert_eq!(g.parent_id, Some(GroupId::new("erp")));
    }

    #[test]
    fn test_demote_to_longtail_with_new_parent() {
        let mut doc = seeded();
        let g = doc
            .change_tier("erp", Tier::Longtail, Some(GroupId::new("crm")))
            .unwrap();
        assert!(g.is_cluster());

        let g = doc.change_tier("erp", Tier::Longtail, None).unwrap();
        assert!(g.is_independent_longtail());
    }

    #[test]
    fn test_demote_pillar_with_clusters_is_rejected() {
        let mut doc = seeded();
        let err = doc.change_tier("crm", Tier::Longtail, None).unwrap_err();
        assert!(matches!(
            err,
            KwmapError::Validation(ValidationError::HasClusters { clusters: 1, .. })
        ));
        assert_eq!(doc.get_by_id("crm").unwrap().tier, Tier::Middle);
    }

    #[test]
    fn test_pillar_to_pillar_keeps_parent() {
        let mut doc = seeded();
        doc.upsert("crm", GroupPatch::default().with_parent(Some(GroupId::new("erp"))))
            .unwrap();
        let g = doc.change_tier("crm", Tier::Big, None).unwrap();
        assert_eq!(g.parent_id, Some(GroupId::new("erp")));
    }

    // ── Merge ────────────────────────────────────────────────────────

    #[test]
    fn test_merge_concatenates_variants_and_preserves_history() {
        let mut doc = seeded();
        doc.upsert("crm-apps", patch(&["crm apps"]).with_priority(5))
            .unwrap();
        doc.update_variant_rank("crm-apps", "crm apps", 4, RankSource::Api, date("2026-01-10"))
            .unwrap();

        let merged = doc.merge("crm-apps", "crm").unwrap();
        let keywords: Vec<_> = merged.keywords().collect();
        assert_eq!(keywords, vec!["crm software", "crm tools", "crm apps"]);
        assert_eq!(merged.priority, 5);
        assert_eq!(merged.variants[2].rank_history.len(), 1);
        assert_eq!(merged.variants[2].current_rank, Some(4));
        assert!(doc.get_by_id("crm-apps").is_none());
        assert_eq!(doc.get_by_variant_keyword("crm apps").unwrap().id.as_str(), "crm");
    }

    #[test]
    fn test_merge_repoints_clusters_to_pillar_target() {
        let mut doc = seeded();
        doc.merge("crm", "erp").unwrap();
        assert_eq!(
            doc.get_by_id("crm-free").unwrap().parent_id,
            Some(GroupId::new("erp"))
        );
    }

    #[test]
    fn test_merge_into_self_is_rejected() {
        let mut doc = seeded();
        assert!(doc.merge("crm", "crm").unwrap_err().is_validation());
        assert!(doc.merge("crm", "ghost").unwrap_err().is_not_found());
        assert!(doc.get_by_id("crm").is_some());
    }
}
