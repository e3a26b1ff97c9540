//! # Error Types: Structured Error Hierarchy
//!
//! Defines the error types used throughout the keyword taxonomy engine. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Classes
//!
//! - **NotFound**: an operation named a group, a variant inside a group, or a
//!   tag that does not exist. Always surfaced to the caller.
//! - **Validation**: a mutation would break a taxonomy invariant. Rejected
//!   before any state changes.
//! - **InvalidState**: the backing document is corrupt or carries the wrong
//!   version. The record store absorbs this class and substitutes an empty
//!   document; it is only constructed for logging and migration paths.

use thiserror::Error;

/// Top-level error type for the keyword taxonomy engine.
#[derive(Error, Debug)]
pub enum KwmapError {
    /// No group carries the given identifier.
    #[error("keyword group not found: {id}")]
    GroupNotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// The group exists but none of its variants has the given keyword.
    #[error("variant {keyword:?} not found in keyword group {group_id}")]
    VariantNotFound {
        /// The group that was searched.
        group_id: String,
        /// The variant keyword that was looked up.
        keyword: String,
    },

    /// No tag master entry carries the given tag.
    #[error("tag not found: {0}")]
    TagNotFound(String),

    /// A mutation was rejected because it would break an invariant.
    #[error("validation violation: {0}")]
    Validation(#[from] ValidationError),

    /// The backing document is corrupt or has an unexpected version.
    #[error("invalid document state: {0}")]
    InvalidState(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl KwmapError {
    /// Whether this error belongs to the NotFound class.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::GroupNotFound { .. } | Self::VariantNotFound { .. } | Self::TagNotFound(_)
        )
    }

    /// Whether this error belongs to the ValidationViolation class.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for KwmapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A taxonomy invariant that a mutation would have violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Every group must hold at least one variant.
    #[error("keyword group {group_id} must have at least one variant")]
    EmptyVariants {
        /// The offending group.
        group_id: String,
    },

    /// A variant keyword was empty or whitespace only.
    #[error("keyword group {group_id} contains a blank variant keyword")]
    BlankKeyword {
        /// The offending group.
        group_id: String,
    },

    /// A variant keyword carried leading or trailing whitespace.
    #[error("variant {keyword:?} in keyword group {group_id} has surrounding whitespace")]
    UntrimmedKeyword {
        /// The offending group.
        group_id: String,
        /// The keyword as submitted.
        keyword: String,
    },

    /// The same keyword appears twice in one group's variant list.
    #[error("variant {keyword:?} appears more than once in keyword group {group_id}")]
    DuplicateVariant {
        /// The offending group.
        group_id: String,
        /// The repeated keyword.
        keyword: String,
    },

    /// The keyword already belongs to a different group.
    #[error("variant {keyword:?} already belongs to keyword group {owner}")]
    KeywordOwnedElsewhere {
        /// The contested keyword.
        keyword: String,
        /// The group that currently owns it.
        owner: String,
    },

    /// Group ids and variant keywords share one lookup namespace.
    #[error("{key:?} is already the id or a variant of keyword group {owner}")]
    NamespaceCollision {
        /// The contested id or keyword.
        key: String,
        /// The group that already answers to it.
        owner: String,
    },

    /// A long-tail group named another long-tail group as its parent.
    #[error("long-tail group {group_id} cannot use long-tail group {parent_id} as parent")]
    LongtailParent {
        /// The child group.
        group_id: String,
        /// The long-tail parent it pointed at.
        parent_id: String,
    },

    /// A group named itself as its own parent.
    #[error("keyword group {group_id} cannot be its own parent")]
    SelfParent {
        /// The offending group.
        group_id: String,
    },

    /// Demotion would leave clusters pointing at a long-tail group.
    #[error("keyword group {group_id} still has {clusters} cluster(s) and cannot become long-tail")]
    HasClusters {
        /// The group being demoted.
        group_id: String,
        /// Number of long-tail groups naming it as parent.
        clusters: usize,
    },

    /// Priority outside the 1..=5 scale.
    #[error("priority {priority} is outside 1..=5")]
    PriorityOutOfRange {
        /// The rejected priority.
        priority: u8,
    },

    /// SERP ranks are 1-indexed.
    #[error("rank must be at least 1, got {rank}")]
    InvalidRank {
        /// The rejected rank.
        rank: u32,
    },

    /// Conversion rates are fractions.
    #[error("conversion rate {cvr} for {keyword:?} is outside [0, 1]")]
    CvrOutOfRange {
        /// The variant carrying the rate.
        keyword: String,
        /// The rejected rate.
        cvr: f64,
    },

    /// A merge named the same group as source and target.
    #[error("cannot merge keyword group {group_id} into itself")]
    SelfMerge {
        /// The group named twice.
        group_id: String,
    },

    /// A tag master entry with an empty tag.
    #[error("tag must not be blank")]
    BlankTag,
}
