// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. Block children are read as a single page
/// of this size; longer pages are truncated.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// The API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Base URL of the Notion REST API.
pub const API_BASE_URL: &str = "https://api.notion.com/v1";

// ---------------------------------------------------------------------------
// Collection schema
// ---------------------------------------------------------------------------

/// Title property holding the post title.
pub const TITLE_PROPERTY: &str = "Page";

/// Checkbox property marking a post as published.
pub const PUBLISHED_PROPERTY: &str = "Published";

/// Date property the index is sorted by.
pub const DATE_PROPERTY: &str = "Date";

/// People property listing the post authors.
pub const AUTHORS_PROPERTY: &str = "Authors";

// ---------------------------------------------------------------------------
// Index cache
// ---------------------------------------------------------------------------

/// How many leading records get their preview cleared in previews mode.
pub const PREVIEW_CLEAR_LIMIT: usize = 10;

/// Default base path of the index snapshot slots.
pub const DEFAULT_INDEX_CACHE: &str = ".blog_index_data";

/// Suffix appended to the base path for the previews slot.
pub const PREVIEWS_SLOT_SUFFIX: &str = "_previews";

// ---------------------------------------------------------------------------
// Retry
// ---------------------------------------------------------------------------

/// Total attempts for one remote operation, including the first.
pub const REMOTE_MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubles on each further attempt.
pub const REMOTE_INITIAL_BACKOFF: Duration = Duration::from_millis(250);

/// Upper bound on the backoff delay.
pub const REMOTE_MAX_BACKOFF: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
