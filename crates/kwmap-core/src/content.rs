//! # Content Corpus Contract
//!
//! The engine reads content metadata through [`ContentCorpus`] and never
//! writes it. Items expose only what synchronization needs: an id, a date,
//! and the declared primary and secondary keywords. A declared keyword may
//! be a literal phrase or a group id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::KwmapError;
use crate::identity::ContentId;

/// Keyword metadata of one published content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Content identifier (slug).
    pub id: ContentId,
    /// Publication date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Locale the item is written in, if the corpus is localized.
    #[serde(default)]
    pub locale: Option<String>,
    /// Main target keyword or group id. May be empty.
    #[serde(default)]
    pub primary_keyword: String,
    /// Additional target keywords or group ids.
    #[serde(default)]
    pub secondary_keywords: Vec<String>,
}

impl ContentItem {
    /// An undated item with only a primary keyword.
    pub fn new(id: impl Into<ContentId>, primary_keyword: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: None,
            locale: None,
            primary_keyword: primary_keyword.into(),
            secondary_keywords: Vec::new(),
        }
    }

    /// Set the publication date.
    pub fn dated(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Add secondary keywords.
    pub fn with_secondary<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.secondary_keywords
            .extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Declared keywords, trimmed, blanks dropped, each at most once,
    /// primary first.
    pub fn declared_keywords(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for kw in std::iter::once(&self.primary_keyword).chain(&self.secondary_keywords) {
            let kw = kw.trim();
            if !kw.is_empty() && !out.contains(&kw) {
                out.push(kw);
            }
        }
        out
    }
}

/// Read-only access to the content corpus.
pub trait ContentCorpus {
    /// Every item, or only items in `locale` when one is given.
    fn items(&self, locale: Option<&str>) -> Result<Vec<ContentItem>, KwmapError>;
}

/// A corpus held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    items: Vec<ContentItem>,
}

impl InMemoryCorpus {
    /// Wrap a list of items.
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items }
    }
}

impl ContentCorpus for InMemoryCorpus {
    fn items(&self, locale: Option<&str>) -> Result<Vec<ContentItem>, KwmapError> {
        Ok(filter_locale(&self.items, locale))
    }
}

/// Items matching `locale`; items without a locale match every filter.
pub fn filter_locale(items: &[ContentItem], locale: Option<&str>) -> Vec<ContentItem> {
    match locale {
        None => items.to_vec(),
        Some(wanted) => items
            .iter()
            .filter(|item| item.locale.as_deref().map_or(true, |l| l == wanted))
            .cloned()
            .collect(),
    }
}
