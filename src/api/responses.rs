// src/api/responses.rs
//! Request and response shapes for the Notion endpoints the index uses.
//!
//! Error bodies are decoded with notion-client's serde type. Rows and
//! blocks go through [`CollectionRow`] and
//! [`super::block_content::RawBlock`], which keep their payloads untyped so
//! unknown property and block types survive decoding.

use crate::constants::{DATE_PROPERTY, NOTION_API_PAGE_SIZE, PUBLISHED_PROPERTY};
use serde::Serialize;

pub use super::collection_row::CollectionRow;
pub use notion_client::objects::error::Error as NotionError;

/// Body of a `databases/{id}/query` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionQuery {
    pub filter: CheckboxFilter,
    pub sorts: Vec<PropertySort>,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

impl CollectionQuery {
    /// Published posts, newest first.
    pub fn published_by_date_desc() -> Self {
        Self {
            filter: CheckboxFilter {
                property: PUBLISHED_PROPERTY.to_string(),
                checkbox: CheckboxCondition { equals: true },
            },
            sorts: vec![PropertySort {
                property: DATE_PROPERTY.to_string(),
                direction: SortDirection::Descending,
            }],
            page_size: NOTION_API_PAGE_SIZE,
            start_cursor: None,
        }
    }

    pub fn with_cursor(mut self, cursor: Option<String>) -> Self {
        self.start_cursor = cursor;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckboxFilter {
    pub property: String,
    pub checkbox: CheckboxCondition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckboxCondition {
    pub equals: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySort {
    pub property: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}
