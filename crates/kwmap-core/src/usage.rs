//! # Usage Records
//!
//! One `UsageRecord` per literal keyword string found in content metadata.
//! Records are rebuilt wholesale by every synchronization pass and never
//! patched in place.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::ContentId;

/// Which content items declare a literal keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Items declaring the keyword as primary or secondary.
    pub articles: BTreeSet<ContentId>,
    /// Number of items referencing the keyword.
    pub frequency: usize,
    /// Latest publication date among those items.
    pub last_used: Option<NaiveDate>,
}

impl UsageRecord {
    /// Record one more referencing item. An item already counted is ignored.
    pub fn add(&mut self, article: &ContentId, date: Option<NaiveDate>) {
        if !self.articles.insert(article.clone()) {
            return;
        }
        self.frequency = self.articles.len();
        if date > self.last_used {
            self.last_used = date;
        }
    }

    /// Whether any content references the keyword.
    pub fn is_used(&self) -> bool {
        !self.articles.is_empty()
    }
}

impl Default for UsageRecord {
    fn default() -> Self {
        Self {
            articles: BTreeSet::new(),
            frequency: 0,
            last_used: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_tracks_frequency_and_latest_date() {
        let mut rec = UsageRecord::default();
        rec.add(&ContentId::new("a"), Some("2026-03-01".parse().unwrap()));
        rec.add(&ContentId::new("b"), Some("2026-01-01".parse().unwrap()));
        rec.add(&ContentId::new("a"), Some("2026-05-01".parse().unwrap()));
        assert_eq!(rec.frequency, 2);
        assert_eq!(rec.last_used, Some("2026-03-01".parse().unwrap()));
        assert!(rec.is_used());
    }

    #[test]
    fn test_undated_item_keeps_existing_date() {
        let mut rec = UsageRecord::default();
        rec.add(&ContentId::new("a"), Some("2026-03-01".parse().unwrap()));
        rec.add(&ContentId::new("b"), None);
        assert_eq!(rec.last_used, Some("2026-03-01".parse().unwrap()));
    }
}
