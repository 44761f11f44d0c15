// src/index/fetcher.rs
//! Builds the blog index from the published rows of the posts collection.

use super::authors::{AuthorResolver, IdentityAuthorResolver};
use crate::api::responses::{CollectionQuery, CollectionRow};
use crate::api::{fetch_all_pages_simple, NotionRepository};
use crate::constants::{AUTHORS_PROPERTY, DATE_PROPERTY, PUBLISHED_PROPERTY, TITLE_PROPERTY};
use crate::error::AppError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::model::{BlogIndex, PostRecord};
use crate::types::CollectionId;
use std::collections::HashMap;
use std::sync::Arc;

/// Queries the posts collection and assembles a [`BlogIndex`].
pub struct IndexFetcher {
    repository: Arc<dyn NotionRepository>,
    authors: Arc<dyn AuthorResolver>,
    collection: CollectionId,
    retry: RetryPolicy,
}

/// A person listed on a post, before display-name resolution.
struct AuthorRef {
    id: String,
    name: Option<String>,
}

/// A post extracted from a page, waiting for its authors.
struct PostDraft {
    post: PostRecord,
    authors: Vec<AuthorRef>,
}

impl IndexFetcher {
    pub fn new(repository: Arc<dyn NotionRepository>, collection: CollectionId) -> Self {
        Self {
            repository,
            authors: Arc::new(IdentityAuthorResolver),
            collection,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_author_resolver(mut self, authors: Arc<dyn AuthorResolver>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Builds the index; any remote failure yields an empty index.
    pub async fn fetch_index(&self) -> BlogIndex {
        match self.try_fetch_index().await {
            Ok(index) => index,
            Err(e) => {
                log::error!(
                    "Failed to load posts from collection {}: {}",
                    self.collection,
                    e
                );
                BlogIndex::new()
            }
        }
    }

    /// Builds the index, reporting remote failures to the caller.
    pub async fn try_fetch_index(&self) -> Result<BlogIndex, AppError> {
        let repository = &self.repository;
        let collection = &self.collection;
        let retry = self.retry;

        let pages = fetch_all_pages_simple(
            |cursor| async move {
                let query = CollectionQuery::published_by_date_desc().with_cursor(cursor);
                retry_with_backoff(|| repository.query_collection(collection, &query), retry).await
            },
            None,
        )
        .await?;

        log::debug!(
            "Collection {} returned {} pages in {} batches",
            self.collection,
            pages.total_fetched,
            pages.pages_fetched
        );

        let drafts: Vec<PostDraft> = pages.items.iter().filter_map(draft_from_row).collect();
        let display_names = self.resolve_unnamed_authors(&drafts).await;

        let index: BlogIndex = drafts
            .into_iter()
            .map(|draft| {
                let authors = draft
                    .authors
                    .into_iter()
                    .map(|author| match author.name {
                        Some(name) => name,
                        None => display_names.get(&author.id).cloned().unwrap_or(author.id),
                    })
                    .collect();
                draft.post.with_authors(authors)
            })
            .collect();

        log::info!("Built blog index with {} posts", index.len());
        Ok(index)
    }

    /// Asks the resolver for every author id that arrived without a name.
    async fn resolve_unnamed_authors(&self, drafts: &[PostDraft]) -> HashMap<String, String> {
        let mut ids: Vec<String> = drafts
            .iter()
            .flat_map(|draft| draft.authors.iter())
            .filter(|author| author.name.is_none())
            .map(|author| author.id.clone())
            .collect();
        ids.sort();
        ids.dedup();

        if ids.is_empty() {
            return HashMap::new();
        }

        self.authors
            .resolve_authors(&ids)
            .await
            .into_iter()
            .map(|(id, profile)| (id, profile.display_name))
            .collect()
    }
}

/// Extracts a post from one collection row. Rows whose title is empty, or
/// slugifies to nothing, are dropped.
///
/// Each designated property is decoded on its own; one that is missing or
/// malformed falls back to its default without affecting the rest of the row.
fn draft_from_row(row: &CollectionRow) -> Option<PostDraft> {
    let title = row.title_text(TITLE_PROPERTY);
    if title.is_empty() {
        log::debug!("Skipping row {} without a title", row.id);
        return None;
    }

    let post = PostRecord::new(row.id.as_str(), title)
        .with_published(row.checkbox(PUBLISHED_PROPERTY))
        .with_date(row.date_start(DATE_PROPERTY).unwrap_or_default());
    if post.slug().is_empty() {
        log::debug!(
            "Skipping row {}: title '{}' has no slug characters",
            row.id,
            post.title()
        );
        return None;
    }

    let authors = row
        .people(AUTHORS_PROPERTY)
        .into_iter()
        .map(|person| AuthorRef {
            id: person.id,
            name: person.name.filter(|name| !name.is_empty()),
        })
        .collect();

    Some(PostDraft { post, authors })
}
