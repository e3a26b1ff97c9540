//! # Tag Master
//!
//! Secondary vocabulary mapping free-text tags to keywords for UI facets.
//! Entries have a lifecycle independent of keyword groups: deleting a group
//! leaves tag entries that mention it untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One tag and the keywords or groups it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagMasterEntry {
    /// The tag as written in content metadata.
    pub tag: String,
    /// Label shown in the UI.
    #[serde(default)]
    pub display_name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Literal keywords or group ids.
    #[serde(default)]
    pub target_keywords: BTreeSet<String>,
}

impl TagMasterEntry {
    /// An entry whose display name is the tag itself.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            display_name: tag.clone(),
            tag,
            description: String::new(),
            target_keywords: BTreeSet::new(),
        }
    }

    /// Add target keywords or group ids.
    pub fn targeting<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_keywords
            .extend(targets.into_iter().map(Into::into));
        self
    }
}
