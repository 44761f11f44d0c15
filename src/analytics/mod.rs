// src/analytics/mod.rs
//! Connection diagnostics and index statistics.

use crate::model::BlogIndex;
use crate::types::CollectionId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How many titles a diagnostic report lists.
const SAMPLE_TITLES: usize = 5;

/// A snapshot of what the configured collection currently yields.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub timestamp: DateTime<Utc>,
    pub has_token: bool,
    pub collection_id: String,
    pub posts_found: usize,
    pub post_titles: Vec<String>,
}

impl DiagnosticReport {
    /// A report for when the collection could not be queried at all.
    pub fn unreachable(collection_id: Option<String>, has_token: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            has_token,
            collection_id: collection_id.unwrap_or_default(),
            posts_found: 0,
            post_titles: Vec::new(),
        }
    }

    pub fn from_index(collection: &CollectionId, has_token: bool, index: &BlogIndex) -> Self {
        Self {
            timestamp: Utc::now(),
            has_token,
            collection_id: collection.to_hyphenated(),
            posts_found: index.len(),
            post_titles: index
                .posts()
                .take(SAMPLE_TITLES)
                .map(|post| post.title().to_string())
                .collect(),
        }
    }

    /// Multi-line summary for terminal output.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Checked at:    {}", self.timestamp.to_rfc3339()),
            format!("Token present: {}", self.has_token),
            format!(
                "Collection:    {}",
                if self.collection_id.is_empty() {
                    "(not set)"
                } else {
                    self.collection_id.as_str()
                }
            ),
            format!("Posts found:   {}", self.posts_found),
        ];
        lines.extend(self.post_titles.iter().map(|title| format!("  - {}", title)));
        lines.join("\n")
    }
}

/// Counts of posts in an index, by state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    pub posts: usize,
    pub published: usize,
    pub with_preview: usize,
    pub undated: usize,
}

pub fn summarize_index(index: &BlogIndex) -> IndexSummary {
    index.posts().fold(
        IndexSummary {
            posts: index.len(),
            ..IndexSummary::default()
        },
        |mut summary, post| {
            summary.published += usize::from(post.published);
            summary.with_preview += usize::from(post.preview.is_some());
            summary.undated += usize::from(post.date.is_empty());
            summary
        },
    )
}
