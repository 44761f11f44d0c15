// src/api/types.rs
//! Type definitions for the Notion API module.

use serde::{Deserialize, Serialize};

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A final page holding `results`.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A page followed by another page at `cursor`.
    pub fn with_next(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }
}

/// Everything collected by walking a paginated listing.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub total_fetched: usize,
    pub pages_fetched: u32,
}
