//! # Keyword Taxonomy Model
//!
//! Defines `KeywordGroup`, the unit of editorial planning, and
//! `KeywordVariant`, one literal search phrase inside a group.
//!
//! ## Hierarchy
//!
//! ```text
//! big ──▶ middle ──▶ longtail (cluster, parentId set)
//!                    longtail (independent, parentId null)
//! ```
//!
//! A long-tail group with a parent is a *cluster* of the pillar its parent
//! backs. A long-tail group without a parent is an independent long-tail
//! keyword. A dangling `parent_id` is a valid state; analytics surface it
//! as an orphan.
//!
//! ## Derived Fields
//!
//! `assigned_articles` is written only by the usage synchronizer.
//! `GroupPatch` has no field for it and rejects it when deserializing.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{KwmapError, ValidationError};
use crate::identity::{ContentId, GroupId};
use crate::temporal::Timestamp;
use crate::value::business_impact;

/// Lowest editorial priority.
pub const MIN_PRIORITY: u8 = 1;
/// Highest editorial priority.
pub const MAX_PRIORITY: u8 = 5;
/// Priority assigned to groups created without one.
pub const DEFAULT_PRIORITY: u8 = 3;

// ─── Enumerations ────────────────────────────────────────────────────

/// Hierarchy level of a keyword group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Broad head term.
    Big,
    /// Pillar-page-level intent.
    Middle,
    /// Specific phrase; a cluster when it has a parent.
    Longtail,
}

impl Tier {
    /// All tiers, broadest first.
    pub fn all() -> &'static [Tier] {
        &[Self::Big, Self::Middle, Self::Longtail]
    }

    /// Whether content backed by a group of this tier is a pillar.
    pub fn is_pillar(&self) -> bool {
        matches!(self, Self::Big | Self::Middle)
    }

    /// Serialized identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Big => "big",
            Self::Middle => "middle",
            Self::Longtail => "longtail",
        }
    }
}

/// Planning status of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    /// Being pursued.
    #[default]
    Active,
    /// Temporarily not pursued.
    Paused,
    /// Target rank reached.
    Achieved,
}

impl GroupStatus {
    /// All statuses.
    pub fn all() -> &'static [GroupStatus] {
        &[Self::Active, Self::Paused, Self::Achieved]
    }

    /// Serialized identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Achieved => "achieved",
        }
    }
}

/// Editorial workflow marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowFlag {
    /// Not yet triaged.
    Pending,
    /// Scheduled for writing.
    ToCreate,
    /// Content exists.
    Created,
    /// Content exists but should be refreshed.
    NeedsUpdate,
    /// Deliberately not written.
    Skip,
}

impl WorkflowFlag {
    /// All flags in workflow order.
    pub fn all() -> &'static [WorkflowFlag] {
        &[
            Self::Pending,
            Self::ToCreate,
            Self::Created,
            Self::NeedsUpdate,
            Self::Skip,
        ]
    }

    /// Serialized identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ToCreate => "to_create",
            Self::Created => "created",
            Self::NeedsUpdate => "needs_update",
            Self::Skip => "skip",
        }
    }
}

/// Where a rank observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankSource {
    /// Entered by an editor.
    #[default]
    Manual,
    /// Pulled from a rank-tracking API.
    Api,
}

impl RankSource {
    /// Serialized identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Api => "api",
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),+) => {
        $(impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

display_via_as_str!(Tier, GroupStatus, WorkflowFlag, RankSource);

impl FromStr for Tier {
    type Err = KwmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "big" => Ok(Self::Big),
            "middle" => Ok(Self::Middle),
            "longtail" => Ok(Self::Longtail),
            other => Err(KwmapError::Serialization(format!("unknown tier: {other:?}"))),
        }
    }
}

impl FromStr for GroupStatus {
    type Err = KwmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "achieved" => Ok(Self::Achieved),
            other => Err(KwmapError::Serialization(format!("unknown status: {other:?}"))),
        }
    }
}

impl FromStr for WorkflowFlag {
    type Err = KwmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "to_create" => Ok(Self::ToCreate),
            "created" => Ok(Self::Created),
            "needs_update" => Ok(Self::NeedsUpdate),
            "skip" => Ok(Self::Skip),
            other => Err(KwmapError::Serialization(format!(
                "unknown workflow flag: {other:?}"
            ))),
        }
    }
}

impl FromStr for RankSource {
    type Err = KwmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "api" => Ok(Self::Api),
            other => Err(KwmapError::Serialization(format!(
                "unknown rank source: {other:?}"
            ))),
        }
    }
}

// ─── Variants ────────────────────────────────────────────────────────

/// One observed SERP position. Rank history is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankHistoryEntry {
    /// Observation date.
    pub date: NaiveDate,
    /// Observed 1-indexed position.
    pub rank: u32,
    /// Origin of the observation.
    pub source: RankSource,
}

/// One literal search phrase belonging to a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordVariant {
    /// The phrase. Unique across the whole taxonomy.
    pub keyword: String,
    /// Monthly search-volume estimate.
    #[serde(default)]
    pub estimated_pv: u64,
    /// Latest observed SERP position.
    #[serde(default)]
    pub current_rank: Option<u32>,
    /// Every recorded observation, oldest first.
    #[serde(default)]
    pub rank_history: Vec<RankHistoryEntry>,
    /// Planning estimate of the achievable position.
    #[serde(default)]
    pub expected_rank: Option<u32>,
    /// Conversion rate as a fraction.
    #[serde(default)]
    pub cvr: Option<f64>,
}

impl KeywordVariant {
    /// A variant with a volume estimate and no rank or conversion data.
    pub fn new(keyword: impl Into<String>, estimated_pv: u64) -> Self {
        Self {
            keyword: keyword.into(),
            estimated_pv,
            current_rank: None,
            rank_history: Vec::new(),
            expected_rank: None,
            cvr: None,
        }
    }

    /// Set the planning estimates used by the value model.
    pub fn with_estimate(mut self, expected_rank: u32, cvr: f64) -> Self {
        self.expected_rank = Some(expected_rank);
        self.cvr = Some(cvr);
        self
    }

    /// Estimated monthly conversions for this phrase.
    pub fn business_impact(&self) -> u64 {
        business_impact(self.estimated_pv, self.expected_rank, self.cvr)
    }

    /// Append an observation and make it the current rank.
    pub fn record_rank(
        &mut self,
        rank: u32,
        source: RankSource,
        date: NaiveDate,
    ) -> Result<(), ValidationError> {
        if rank < 1 {
            return Err(ValidationError::InvalidRank { rank });
        }
        self.rank_history.push(RankHistoryEntry { date, rank, source });
        self.current_rank = Some(rank);
        Ok(())
    }
}

// ─── Groups ──────────────────────────────────────────────────────────

fn default_priority() -> u8 {
    DEFAULT_PRIORITY
}

/// One search intent and the literal phrases that express it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGroup {
    /// Stable identifier.
    pub id: GroupId,
    /// Hierarchy level.
    pub tier: Tier,
    /// Pillar group this cluster belongs to, if any.
    #[serde(default)]
    pub parent_id: Option<GroupId>,
    /// Business units this intent serves.
    #[serde(default)]
    pub related_business: BTreeSet<String>,
    /// Free-text tags.
    #[serde(default)]
    pub related_tags: BTreeSet<String>,
    /// Editorial priority, 1 (low) to 5 (high).
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Planning status.
    #[serde(default)]
    pub status: GroupStatus,
    /// Stored workflow marker. See [`KeywordGroup::effective_workflow_flag`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_flag: Option<WorkflowFlag>,
    /// Content items targeting this intent. Derived by synchronization.
    #[serde(default)]
    pub assigned_articles: BTreeSet<ContentId>,
    /// Literal phrases; the first is the representative keyword.
    pub variants: Vec<KeywordVariant>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last mutation time.
    pub updated_at: Timestamp,
}

impl KeywordGroup {
    /// A group with default tier, priority and status.
    pub fn new(id: impl Into<GroupId>, variants: Vec<KeywordVariant>) -> Self {
        let now = Timestamp::now();
        Self {
            id: id.into(),
            tier: Tier::Middle,
            parent_id: None,
            related_business: BTreeSet::new(),
            related_tags: BTreeSet::new(),
            priority: DEFAULT_PRIORITY,
            status: GroupStatus::Active,
            workflow_flag: None,
            assigned_articles: BTreeSet::new(),
            variants,
            created_at: now,
            updated_at: now,
        }
    }

    /// The representative keyword (`variants[0]`), or the id if the group
    /// somehow holds no variants.
    pub fn representative_keyword(&self) -> &str {
        self.variants
            .first()
            .map(|v| v.keyword.as_str())
            .unwrap_or_else(|| self.id.as_str())
    }

    /// Search volume of the representative variant.
    pub fn representative_pv(&self) -> u64 {
        self.variants.first().map(|v| v.estimated_pv).unwrap_or(0)
    }

    /// Sum of search volume over every variant.
    pub fn total_pv(&self) -> u64 {
        self.variants
            .iter()
            .map(|v| v.estimated_pv)
            .fold(0, u64::saturating_add)
    }

    /// Sum of business impact over every variant.
    pub fn total_business_impact(&self) -> u64 {
        self.variants
            .iter()
            .map(KeywordVariant::business_impact)
            .fold(0, u64::saturating_add)
    }

    /// Long-tail with a parent.
    pub fn is_cluster(&self) -> bool {
        self.tier == Tier::Longtail && self.parent_id.is_some()
    }

    /// Long-tail without a parent.
    pub fn is_independent_longtail(&self) -> bool {
        self.tier == Tier::Longtail && self.parent_id.is_none()
    }

    /// Stored flag, or `created`/`pending` depending on whether any content
    /// is assigned. The fallback is computed at read time and never stored.
    pub fn effective_workflow_flag(&self) -> WorkflowFlag {
        self.workflow_flag.unwrap_or(if self.assigned_articles.is_empty() {
            WorkflowFlag::Pending
        } else {
            WorkflowFlag::Created
        })
    }

    /// Whether one of the variants carries this literal keyword.
    pub fn has_variant(&self, keyword: &str) -> bool {
        self.variants.iter().any(|v| v.keyword == keyword)
    }

    /// Mutable access to the variant with this literal keyword.
    pub fn variant_mut(&mut self, keyword: &str) -> Option<&mut KeywordVariant> {
        self.variants.iter_mut().find(|v| v.keyword == keyword)
    }

    /// Variant keywords in order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.keyword.as_str())
    }

    /// Checks that need nothing but the group itself.
    ///
    /// Cross-group rules (global keyword uniqueness, parent tier) are
    /// enforced by the repository.
    pub fn validate_shape(&self) -> Result<(), ValidationError> {
        let group_id = || self.id.to_string();
        if self.variants.is_empty() {
            return Err(ValidationError::EmptyVariants {
                group_id: group_id(),
            });
        }
        if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&self.priority) {
            return Err(ValidationError::PriorityOutOfRange {
                priority: self.priority,
            });
        }
        if self.parent_id.as_ref() == Some(&self.id) {
            return Err(ValidationError::SelfParent {
                group_id: group_id(),
            });
        }
        let mut seen = BTreeSet::new();
        for variant in &self.variants {
            if variant.keyword.trim().is_empty() {
                return Err(ValidationError::BlankKeyword {
                    group_id: group_id(),
                });
            }
            if variant.keyword.trim() != variant.keyword {
                return Err(ValidationError::UntrimmedKeyword {
                    group_id: group_id(),
                    keyword: variant.keyword.clone(),
                });
            }
            if !seen.insert(variant.keyword.as_str()) {
                return Err(ValidationError::DuplicateVariant {
                    group_id: group_id(),
                    keyword: variant.keyword.clone(),
                });
            }
            for rank in [variant.current_rank, variant.expected_rank].into_iter().flatten() {
                if rank < 1 {
                    return Err(ValidationError::InvalidRank { rank });
                }
            }
            if let Some(cvr) = variant.cvr {
                if !(0.0..=1.0).contains(&cvr) {
                    return Err(ValidationError::CvrOutOfRange {
                        keyword: variant.keyword.clone(),
                        cvr,
                    });
                }
            }
        }
        Ok(())
    }
}

// ─── Patches ─────────────────────────────────────────────────────────

/// Distinguishes a missing field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update of a group. Absent fields leave the group untouched.
///
/// `parent_id` and `workflow_flag` are nullable: `Some(None)` clears them.
/// The derived `assignedArticles` field is not accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GroupPatch {
    /// New tier.
    pub tier: Option<Tier>,
    /// New parent, or `Some(None)` to clear it.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<GroupId>>,
    /// Replacement business set.
    pub related_business: Option<BTreeSet<String>>,
    /// Replacement tag set.
    pub related_tags: Option<BTreeSet<String>>,
    /// New priority.
    pub priority: Option<u8>,
    /// New status.
    pub status: Option<GroupStatus>,
    /// New workflow flag, or `Some(None)` to fall back to the derived one.
    #[serde(default, deserialize_with = "double_option")]
    pub workflow_flag: Option<Option<WorkflowFlag>>,
    /// Replacement variant list. Must not be empty.
    pub variants: Option<Vec<KeywordVariant>>,
}

impl GroupPatch {
    /// Replace the variant list.
    pub fn with_variants(mut self, variants: Vec<KeywordVariant>) -> Self {
        self.variants = Some(variants);
        self
    }

    /// Set the tier.
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Set or clear the parent.
    pub fn with_parent(mut self, parent: Option<GroupId>) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: GroupStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Set or clear the workflow flag.
    pub fn with_workflow_flag(mut self, flag: Option<WorkflowFlag>) -> Self {
        self.workflow_flag = Some(flag);
        self
    }

    /// Replace the business set.
    pub fn with_business<I, S>(mut self, business: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_business = Some(business.into_iter().map(Into::into).collect());
        self
    }

    /// Replace the tag set.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Merge every present field into `group`. Does not touch timestamps
    /// and does not validate.
    pub fn apply_to(&self, group: &mut KeywordGroup) {
        if let Some(tier) = self.tier {
            group.tier = tier;
        }
        if let Some(parent) = &self.parent_id {
            group.parent_id = parent.clone();
        }
        if let Some(business) = &self.related_business {
            group.related_business = business.clone();
        }
        if let Some(tags) = &self.related_tags {
            group.related_tags = tags.clone();
        }
        if let Some(priority) = self.priority {
            group.priority = priority;
        }
        if let Some(status) = self.status {
            group.status = status;
        }
        if let Some(flag) = self.workflow_flag {
            group.workflow_flag = flag;
        }
        if let Some(variants) = &self.variants {
            group.variants = variants.clone();
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
