// src/blocks/mod.rs
//! Converts a record's child blocks into [`RenderNode`]s.
//!
//! | API block            | node type        | properties                          |
//! |----------------------|------------------|-------------------------------------|
//! | `paragraph`          | `text`           | `title`: one run per tuple          |
//! | `heading_1/2/3`      | `header` ...     | `title`                             |
//! | `bulleted_list_item` | `bulleted_list`  | `title`                             |
//! | `numbered_list_item` | `numbered_list`  | `title`                             |
//! | `quote`              | `quote`          | `title`                             |
//! | `code`               | `code`           | `title`: one tuple, `language`      |
//! | `divider`            | `divider`        | none                                |
//! | `image`              | `image`          | none; `format.display_source`       |
//!
//! Any other block keeps its API tag and has no properties.

use crate::api::block_content::{BlockContent, RawBlock};
use crate::api::NotionRepository;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::model::{NodeFormat, NodeType, RenderNode, RunList};
use crate::types::RecordId;
use std::sync::Arc;

const TITLE: &str = "title";
const LANGUAGE: &str = "language";
const PLAIN_TEXT_LANGUAGE: &str = "plain text";

/// Fetches and normalizes the content blocks of one record.
pub struct BlockNormalizer {
    repository: Arc<dyn NotionRepository>,
    retry: RetryPolicy,
}

impl BlockNormalizer {
    pub fn new(repository: Arc<dyn NotionRepository>) -> Self {
        Self {
            repository,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the record's nodes in API order; any remote failure yields an
    /// empty sequence.
    pub async fn get_blocks(&self, record: &RecordId) -> Vec<RenderNode> {
        match self.try_get_blocks(record).await {
            Ok(nodes) => nodes,
            Err(e) => {
                log::error!("Failed to load blocks for {}: {}", record, e);
                Vec::new()
            }
        }
    }

    /// Returns the record's nodes, reporting remote failures to the caller.
    ///
    /// Only the first page of children is read.
    pub async fn try_get_blocks(&self, record: &RecordId) -> Result<Vec<RenderNode>, AppError> {
        let page = retry_with_backoff(
            || self.repository.list_children(record, NOTION_API_PAGE_SIZE),
            self.retry,
        )
        .await?;

        if page.has_more {
            log::debug!(
                "Record {} has more than {} child blocks; only the first page is rendered",
                record,
                NOTION_API_PAGE_SIZE
            );
        }

        Ok(page.results.iter().map(normalize_block).collect())
    }
}

/// Maps one raw block onto the renderer vocabulary.
pub fn normalize_block(block: &RawBlock) -> RenderNode {
    let id = block.id.as_str();
    match block.decode() {
        BlockContent::Paragraph(runs) => text_node(id, NodeType::Text, runs),
        BlockContent::Heading1(runs) => text_node(id, NodeType::Header, runs),
        BlockContent::Heading2(runs) => text_node(id, NodeType::SubHeader, runs),
        BlockContent::Heading3(runs) => text_node(id, NodeType::SubSubHeader, runs),
        BlockContent::BulletedListItem(runs) => text_node(id, NodeType::BulletedList, runs),
        BlockContent::NumberedListItem(runs) => text_node(id, NodeType::NumberedList, runs),
        BlockContent::Quote(runs) => text_node(id, NodeType::Quote, runs),
        BlockContent::Code { runs, language } => RenderNode::bare(id, NodeType::Code)
            .with_property(TITLE, vec![[runs.concat()]])
            .with_property(
                LANGUAGE,
                vec![[language.unwrap_or_else(|| PLAIN_TEXT_LANGUAGE.to_string())]],
            ),
        BlockContent::Divider => RenderNode::bare(id, NodeType::Divider),
        BlockContent::Image(source) => {
            RenderNode::bare(id, NodeType::Image).with_format(NodeFormat {
                display_source: source.url().to_string(),
            })
        }
        BlockContent::Other(tag) => {
            log::debug!("Block {} has unmapped type '{}'", id, tag);
            RenderNode::bare(id, NodeType::Other(tag))
        }
    }
}

fn text_node(id: &str, node_type: NodeType, runs: Vec<String>) -> RenderNode {
    RenderNode::bare(id, node_type).with_property(TITLE, run_list(runs))
}

fn run_list(runs: Vec<String>) -> RunList {
    runs.into_iter().map(|run| [run]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn raw(value: Value) -> RawBlock {
        serde_json::from_value(value).unwrap()
    }

    fn run(text: &str) -> Value {
        json!({ "type": "text", "text": { "content": text }, "plain_text": text })
    }

    #[test]
    fn headings_map_by_level() {
        let nodes: Vec<NodeType> = ["heading_1", "heading_2", "heading_3"]
            .iter()
            .map(|tag| {
                normalize_block(&raw(json!({
                    "id": "h",
                    "type": tag,
                    (*tag): { "rich_text": [run("Title")] }
                })))
                .node_type
            })
            .collect();

        assert_eq!(
            nodes,
            vec![NodeType::Header, NodeType::SubHeader, NodeType::SubSubHeader]
        );
    }

    #[test]
    fn code_concatenates_runs_into_one_tuple() {
        let node = normalize_block(&raw(json!({
            "id": "c1",
            "type": "code",
            "code": { "rich_text": [run("let x = 1;\n"), run("x + 1")], "language": "rust" }
        })));

        assert_eq!(node.node_type, NodeType::Code);
        assert_eq!(node.title_runs(), &[["let x = 1;\nx + 1".to_string()]]);
        assert_eq!(node.properties[LANGUAGE], vec![["rust".to_string()]]);
    }

    #[test]
    fn code_language_defaults_to_plain_text() {
        let node = normalize_block(&raw(json!({
            "id": "c2",
            "type": "code",
            "code": { "rich_text": [run("echo hi")] }
        })));
        assert_eq!(node.properties[LANGUAGE], vec![["plain text".to_string()]]);
    }

    #[test]
    fn empty_paragraph_has_an_empty_title() {
        let node = normalize_block(&raw(json!({
            "id": "p1",
            "type": "paragraph",
            "paragraph": { "rich_text": [] }
        })));
        assert_eq!(node.node_type, NodeType::Text);
        assert!(node.title_runs().is_empty());
        assert!(node.properties.contains_key(TITLE));
    }

    #[test]
    fn divider_and_unknown_blocks_have_no_properties() {
        let divider = normalize_block(&raw(json!({ "id": "d", "type": "divider", "divider": {} })));
        let callout = normalize_block(&raw(json!({
            "id": "x",
            "type": "callout",
            "callout": { "rich_text": [run("ignored")] }
        })));

        assert_eq!(divider.node_type, NodeType::Divider);
        assert!(divider.properties.is_empty());
        assert_eq!(callout.node_type, NodeType::Other("callout".to_string()));
        assert!(callout.properties.is_empty());
        assert!(callout.format.is_none());
    }
}
