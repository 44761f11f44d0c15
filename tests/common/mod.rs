// tests/common/mod.rs
//! Shared fixtures: an in-memory repository and JSON builders for pages and
//! blocks.

#![allow(dead_code)]

use notion_blog_index::api::responses::{CollectionQuery, CollectionRow};
use notion_blog_index::{
    AppError, CollectionId, NotionClientError, NotionRepository, PaginatedResponse, RawBlock,
    RecordId,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

pub fn collection() -> CollectionId {
    CollectionId::parse("a1b2c3d4e5f67890abcdef1234567890").unwrap()
}

pub fn rate_limited() -> AppError {
    NotionClientError::NotionApi {
        status: 429,
        code: "rate_limited".to_string(),
        message: "Slow down".to_string(),
        request_id: None,
    }
    .into()
}

pub fn unauthorized() -> AppError {
    NotionClientError::NotionApi {
        status: 401,
        code: "unauthorized".to_string(),
        message: "API token is invalid.".to_string(),
        request_id: None,
    }
    .into()
}

/// A scripted [`NotionRepository`].
///
/// Collection pages are served in batches chained by `cursor-N` cursors.
/// Failures are injected per call: `fail_next(n, ..)` makes the next `n`
/// calls of either kind fail.
#[derive(Default)]
pub struct FakeRepository {
    batches: Vec<Vec<Value>>,
    children: HashMap<String, (Vec<Value>, bool)>,
    pending_failures: Mutex<Vec<AppError>>,
    query_calls: AtomicU32,
    children_calls: AtomicU32,
    cursors_seen: Mutex<Vec<Option<String>>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one batch of collection rows.
    pub fn with_batch(mut self, pages: Vec<Value>) -> Self {
        self.batches.push(pages);
        self
    }

    pub fn with_children(mut self, parent: &str, blocks: Vec<Value>, has_more: bool) -> Self {
        self.children.insert(parent.to_string(), (blocks, has_more));
        self
    }

    /// Makes the next `count` calls fail with errors built by `error`.
    pub fn fail_next(self, count: usize, error: fn() -> AppError) -> Self {
        self.pending_failures
            .lock()
            .unwrap()
            .extend((0..count).map(|_| error()));
        self
    }

    pub fn query_calls(&self) -> u32 {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn children_calls(&self) -> u32 {
        self.children_calls.load(Ordering::SeqCst)
    }

    pub fn cursors_seen(&self) -> Vec<Option<String>> {
        self.cursors_seen.lock().unwrap().clone()
    }

    fn take_failure(&self) -> Option<AppError> {
        let mut pending = self.pending_failures.lock().unwrap();
        if pending.is_empty() {
            None
        } else {
            Some(pending.remove(0))
        }
    }
}

#[async_trait::async_trait]
impl NotionRepository for FakeRepository {
    async fn query_collection(
        &self,
        _collection: &CollectionId,
        query: &CollectionQuery,
    ) -> Result<PaginatedResponse<CollectionRow>, AppError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.cursors_seen
            .lock()
            .unwrap()
            .push(query.start_cursor.clone());
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let batch = match query.start_cursor.as_deref() {
            None => 0,
            Some(cursor) => cursor
                .trim_start_matches("cursor-")
                .parse::<usize>()
                .expect("cursor issued by this fake"),
        };
        let pages = self
            .batches
            .get(batch)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(|page| serde_json::from_value(page).expect("fixture page parses"))
            .collect();

        Ok(if batch + 1 < self.batches.len() {
            PaginatedResponse::with_next(pages, format!("cursor-{}", batch + 1))
        } else {
            PaginatedResponse::last(pages)
        })
    }

    async fn list_children(
        &self,
        parent: &RecordId,
        page_size: u32,
    ) -> Result<PaginatedResponse<RawBlock>, AppError> {
        self.children_calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(page_size, 100);
        if let Some(err) = self.take_failure() {
            return Err(err);
        }

        let (blocks, has_more) = self
            .children
            .get(parent.as_str())
            .cloned()
            .unwrap_or_default();
        let results = blocks
            .into_iter()
            .map(|block| serde_json::from_value(block).expect("fixture block parses"))
            .collect();

        Ok(if has_more {
            PaginatedResponse::with_next(results, "more-blocks")
        } else {
            PaginatedResponse::last(results)
        })
    }
}

fn rich_text(content: &str) -> Value {
    json!({
        "type": "text",
        "text": { "content": content, "link": null },
        "annotations": {
            "bold": false, "italic": false, "strikethrough": false,
            "underline": false, "code": false, "color": "default"
        },
        "plain_text": content,
        "href": null
    })
}

/// Builder for one collection row.
pub struct PageFixture {
    id: String,
    properties: serde_json::Map<String, Value>,
}

impl PageFixture {
    pub fn new(id: &str, title: &str) -> Self {
        let mut properties = serde_json::Map::new();
        let runs: Vec<Value> = if title.is_empty() {
            Vec::new()
        } else {
            vec![rich_text(title)]
        };
        properties.insert(
            "Page".to_string(),
            json!({ "id": "title", "type": "title", "title": runs }),
        );
        Self {
            id: id.to_string(),
            properties,
        }
    }

    pub fn published(mut self) -> Self {
        self.properties.insert(
            "Published".to_string(),
            json!({ "id": "pub", "type": "checkbox", "checkbox": true }),
        );
        self
    }

    pub fn date(mut self, start: &str) -> Self {
        self.properties.insert(
            "Date".to_string(),
            json!({
                "id": "date",
                "type": "date",
                "date": { "start": start, "end": null, "time_zone": null }
            }),
        );
        self
    }

    /// People as `(id, name)`; a `None` name leaves the user unnamed.
    pub fn authors(mut self, people: &[(&str, Option<&str>)]) -> Self {
        let people: Vec<Value> = people
            .iter()
            .map(|(id, name)| match name {
                Some(name) => json!({ "object": "user", "id": id, "name": name }),
                None => json!({ "object": "user", "id": id }),
            })
            .collect();
        self.properties.insert(
            "Authors".to_string(),
            json!({ "id": "auth", "type": "people", "people": people }),
        );
        self
    }

    /// Adds an arbitrary column, e.g. one of a type the index never reads.
    pub fn property(mut self, name: &str, value: Value) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }

    pub fn build(self) -> Value {
        json!({
            "object": "page",
            "id": self.id,
            "created_time": "2024-01-01T00:00:00.000Z",
            "last_edited_time": "2024-01-01T00:00:00.000Z",
            "created_by": { "object": "user", "id": "creator" },
            "last_edited_by": { "object": "user", "id": "creator" },
            "parent": { "type": "database_id", "database_id": "a1b2c3d4-e5f6-7890-abcd-ef1234567890" },
            "archived": false,
            "url": format!("https://www.notion.so/{}", self.id),
            "properties": self.properties
        })
    }
}

/// A text-bearing block (`paragraph`, `heading_1`, `quote`, ...).
pub fn text_block(id: &str, block_type: &str, runs: &[&str]) -> Value {
    let runs: Vec<Value> = runs.iter().map(|run| rich_text(run)).collect();
    let mut block = json!({ "object": "block", "id": id, "type": block_type, "has_children": false });
    block[block_type] = json!({ "rich_text": runs, "color": "default" });
    block
}

pub fn code_block(id: &str, runs: &[&str], language: Option<&str>) -> Value {
    let runs: Vec<Value> = runs.iter().map(|run| rich_text(run)).collect();
    let mut payload = json!({ "rich_text": runs, "caption": [] });
    if let Some(language) = language {
        payload["language"] = json!(language);
    }
    json!({ "object": "block", "id": id, "type": "code", "code": payload })
}

pub fn image_block(id: &str, url: &str, hosted: bool) -> Value {
    let image = if hosted {
        json!({ "type": "file", "file": { "url": url, "expiry_time": "2024-01-01T01:00:00.000Z" }, "caption": [] })
    } else {
        json!({ "type": "external", "external": { "url": url }, "caption": [] })
    };
    json!({ "object": "block", "id": id, "type": "image", "image": image })
}

pub fn bare_block(id: &str, block_type: &str) -> Value {
    let mut block = json!({ "object": "block", "id": id, "type": block_type });
    block[block_type] = json!({});
    block
}
