// src/api/simple_pagination.rs
//! Cursor-following pagination over async closures.

use super::types::{PaginatedResponse, PaginationResult};
use crate::error::AppError;

/// Fetches pages until the listing reports no more, or `max_pages` is hit.
///
/// `fetch_fn` receives the cursor of the page to fetch (`None` for the
/// first page).
pub async fn fetch_all_pages_simple<T, F, Fut>(
    mut fetch_fn: F,
    max_pages: Option<u32>,
) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        if let Some(max) = max_pages {
            if pages_fetched >= max {
                log::debug!("Reached maximum page limit: {}", max);
                break;
            }
        }

        let response = fetch_fn(cursor).await?;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.results);
        pages_fetched += 1;

        if !has_more || cursor.is_none() {
            break;
        }
    }

    Ok(PaginationResult {
        total_fetched: all_items.len(),
        items: all_items,
        pages_fetched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn follows_cursors_until_the_last_page() {
        let seen = Mutex::new(Vec::new());
        let result = fetch_all_pages_simple(
            |cursor| {
                seen.lock().unwrap().push(cursor.clone());
                async move {
                    Ok(match cursor.as_deref() {
                        None => PaginatedResponse::with_next(vec![1, 2], "c1"),
                        Some("c1") => PaginatedResponse::with_next(vec![3], "c2"),
                        _ => PaginatedResponse::last(vec![4]),
                    })
                }
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(result.items, vec![1, 2, 3, 4]);
        assert_eq!(result.pages_fetched, 3);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn stops_at_the_page_limit() {
        let result = fetch_all_pages_simple(
            |_| async { Ok(PaginatedResponse::with_next(vec!["x"], "again")) },
            Some(2),
        )
        .await
        .unwrap();

        assert_eq!(result.total_fetched, 2);
        assert_eq!(result.pages_fetched, 2);
    }

    #[tokio::test]
    async fn propagates_the_first_error() {
        let result: Result<PaginationResult<u8>, _> = fetch_all_pages_simple(
            |_| async { Err(AppError::MalformedResponse("nope".to_string())) },
            None,
        )
        .await;

        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }
}
