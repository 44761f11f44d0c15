// src/pipeline.rs
//! Pipeline capability traits: the two things a site generator asks of the
//! ingestion layer.
//!
//! Each trait describes a single capability, so consumers (templating,
//! sitemap generation, the CLI) can be tested against fakes.

use crate::blocks::BlockNormalizer;
use crate::index::IndexCache;
use crate::model::{BlogIndex, IndexMode, RenderNode};
use crate::types::RecordId;

/// Supplies the slug-keyed index of published posts.
#[async_trait::async_trait]
pub trait IndexSource: Send + Sync {
    async fn index(&self, mode: IndexMode) -> BlogIndex;
}

/// Supplies the normalized content of one post.
#[async_trait::async_trait]
pub trait BlockSource: Send + Sync {
    async fn blocks(&self, record: &RecordId) -> Vec<RenderNode>;
}

#[async_trait::async_trait]
impl IndexSource for IndexCache {
    async fn index(&self, mode: IndexMode) -> BlogIndex {
        self.get_index(mode).await
    }
}

#[async_trait::async_trait]
impl BlockSource for BlockNormalizer {
    async fn blocks(&self, record: &RecordId) -> Vec<RenderNode> {
        self.get_blocks(record).await
    }
}
