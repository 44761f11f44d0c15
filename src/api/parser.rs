// src/api/parser.rs
//! Response parsing: success bodies via serde, error bodies via
//! notion-client's error object.

use super::block_content::RawBlock;
use super::client::ApiResponse;
use super::responses::{CollectionRow, NotionError};
use super::types::PaginatedResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError, NotionErrorCode};
use reqwest::StatusCode;

/// Parse any Notion API response into `T`, or into the error it reports.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        parse_error(&result.data, result.status, &result.url)
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);

        NotionClientError::Deserialization {
            source: e,
            body: preview_body(body),
        }
        .into()
    })
}

fn parse_error<T>(body: &str, status: StatusCode, url: &str) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        return Err(NotionClientError::NotionApi {
            status: notion_error.status,
            code: notion_error.code,
            message: notion_error.message,
            request_id: notion_error.request_id,
        }
        .into());
    }

    Err(AppError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    })
}

fn preview_body(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Parse one page of a collection query.
pub fn parse_pages_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<CollectionRow>, AppError> {
    parse_api_response(result)
}

/// Parse one page of block children.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<RawBlock>, AppError> {
    parse_api_response(result)
}
