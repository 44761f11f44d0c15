//! The blog index: remote fetch, author resolution, and the per-mode cache.

pub mod authors;
pub mod cache;
pub mod fetcher;

pub use authors::{AuthorResolver, IdentityAuthorResolver};
pub use cache::{CacheSlots, IndexCache, Refreshed, SnapshotSlot};
pub use fetcher::IndexFetcher;
