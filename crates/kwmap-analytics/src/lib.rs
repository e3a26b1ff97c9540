//! # kwmap-analytics
//!
//! Derived state and read-side analysis over a [`kwmap_store::TaxonomyDocument`].
//!
//! - [`usage`]: rebuilds keyword usage and group assignments from content.
//! - [`query`]: business queries, planning queue, impact ranking, dashboard.
//! - [`structure`]: pillar/cluster tree with orphan detection.
//! - [`conflict`]: literal-reuse and same-intent conflict checks.
//!
//! Everything except [`usage::synchronize`] is read-only. Results are only as
//! fresh as the last synchronization pass.

pub mod conflict;
pub mod query;
pub mod structure;
pub mod usage;

pub use conflict::{
    check_keyword_conflicts, check_same_intent_conflicts, ConflictSeverity, KeywordConflict,
    SameIntentConflict,
};
pub use query::{
    by_business, by_priority, dashboard_summary, impact_ranking, representative_label,
    suggest_unused, DashboardSummary, GroupImpact,
};
pub use structure::{
    pillar_cluster_structure, OrphanCluster, OrphanReason, PillarClusterStructure, PillarNode,
};
pub use usage::{build_usage, synchronize, synchronize_corpus, SyncReport};
