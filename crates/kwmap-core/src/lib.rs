//! # kwmap-core: Foundational Types for the Keyword Taxonomy
//!
//! This crate is the leaf of the kwmap workspace. It defines the data model
//! shared by the record store, the analytics layer, and the CLI: keyword
//! groups and their variants, the tag master vocabulary, usage records, the
//! content-corpus contract, and the value model that turns search volume,
//! rank and conversion rate into a business-impact estimate.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `GroupId` and `ContentId` are distinct types.
//!    A content identifier cannot be passed where a group identifier is
//!    expected, even though both serialize as bare strings.
//!
//! 2. **One canonical grouped schema.** Every keyword lives inside a
//!    `KeywordGroup` as a `KeywordVariant`. There is no flat keyword shape in
//!    this crate; legacy documents are converted once by `kwmap-store`.
//!
//! 3. **Derived state is typed as derived.** `assigned_articles` is only
//!    written by the usage synchronizer. Patches cannot carry it.
//!
//! 4. **UTC-only timestamps.** `Timestamp` is UTC with seconds precision and
//!    renders with a `Z` suffix.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `kwmap-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod content;
pub mod error;
pub mod identity;
pub mod tag;
pub mod taxonomy;
pub mod temporal;
pub mod usage;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use content::{ContentCorpus, ContentItem, InMemoryCorpus};
pub use error::{KwmapError, ValidationError};
pub use identity::{ContentId, GroupId};
pub use tag::TagMasterEntry;
pub use taxonomy::{
    GroupPatch, GroupStatus, KeywordGroup, KeywordVariant, RankHistoryEntry, RankSource, Tier,
    WorkflowFlag, MAX_PRIORITY, MIN_PRIORITY,
};
pub use temporal::Timestamp;
pub use usage::UsageRecord;
pub use value::{business_impact, ctr_for_rank, CTR_DECAY_FACTOR, CTR_TABLE};
