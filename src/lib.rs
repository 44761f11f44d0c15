// src/lib.rs
//! notion-blog-index: builds a slug-keyed blog index from a Notion
//! collection and converts each post's blocks into renderer nodes.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `SiteConfig`, `CommandLineInput`
//! - **Domain model**: `PostRecord`, `BlogIndex`, `RenderNode`
//! - **Domain types**: `ApiKey`, `CollectionId`, `RecordId`
//! - **API client**: `NotionRepository`, `NotionHttpClient`
//! - **Pipeline**: `IndexFetcher`, `IndexCache`, `BlockNormalizer`

pub mod analytics;
pub mod api;
pub mod blocks;
pub mod config;
pub mod constants;
pub mod error;
pub mod error_recovery;
pub mod index;
pub mod model;
pub mod pipeline;
pub mod slug;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::error_recovery::{retry_with_backoff, RetryPolicy};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, SiteConfig};

// --- Domain Model ---
pub use crate::model::{
    AuthorProfile, BlogIndex, IndexMode, NodeFormat, NodeType, PostRecord, RenderNode, RunList,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, CollectionId, RecordId};

// --- API Client ---
pub use crate::api::{
    block_content::{BlockContent, RawBlock},
    client::ApiResponse,
    types::PaginatedResponse,
    NotionHttpClient, NotionRepository,
};

// --- Pipeline ---
pub use crate::blocks::{normalize_block, BlockNormalizer};
pub use crate::index::{
    AuthorResolver, CacheSlots, IdentityAuthorResolver, IndexCache, IndexFetcher, Refreshed,
    SnapshotSlot,
};
pub use crate::pipeline::{BlockSource, IndexSource};
pub use crate::slug::slugify;

// --- Diagnostics ---
pub use crate::analytics::{summarize_index, DiagnosticReport, IndexSummary};
