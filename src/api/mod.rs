// src/api/mod.rs
//! Notion API interaction: listing posts and reading their blocks.
//!
//! Business logic depends on [`NotionRepository`], never on HTTP details, so
//! the fetcher and the normalizer run unchanged against an in-memory
//! repository in tests.

pub mod block_content;
pub mod client;
pub mod collection_row;
pub mod parser;
pub mod responses;
mod simple_pagination;
pub mod types;

use crate::error::AppError;
use crate::types::{CollectionId, RecordId};
use block_content::RawBlock;
use responses::{CollectionQuery, CollectionRow};
use types::PaginatedResponse;

pub use simple_pagination::fetch_all_pages_simple;

/// The ability to retrieve content from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Runs one page of a collection query.
    async fn query_collection(
        &self,
        collection: &CollectionId,
        query: &CollectionQuery,
    ) -> Result<PaginatedResponse<CollectionRow>, AppError>;

    /// Lists the first `page_size` child blocks of a record.
    async fn list_children(
        &self,
        parent: &RecordId,
        page_size: u32,
    ) -> Result<PaginatedResponse<RawBlock>, AppError>;
}

pub use client::NotionHttpClient;
