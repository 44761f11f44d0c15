// src/api/client.rs
//! Thin HTTP client for the Notion API.
//!
//! Handles authentication and raw request/response plumbing. Parsing lives
//! in [`super::parser`].

use super::block_content::RawBlock;
use super::parser;
use super::responses::{CollectionQuery, CollectionRow};
use super::types::PaginatedResponse;
use crate::constants::{API_BASE_URL, NOTION_VERSION};
use crate::error::AppError;
use crate::types::{ApiKey, CollectionId, RecordId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use url::Url;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: Url,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let base_url = Url::parse(&format!("{}/", API_BASE_URL)).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid API base URL: {}", e))
        })?;
        Self::with_base_url(api_key, base_url)
    }

    /// Creates a client against a different API root, e.g. a local proxy.
    pub fn with_base_url(api_key: &ApiKey, base_url: Url) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, AppError> {
        self.base_url.join(endpoint).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid endpoint '{}': {}", endpoint, e))
        })
    }

    /// Makes a GET request to the specified endpoint with query parameters.
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        let mut url = self.endpoint_url(endpoint)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        log::debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = self.endpoint_url(endpoint)?;
        log::debug!("POST {}", url);
        let response = self.client.post(url).json(body).send().await?;
        log::debug!("POST {} -> {}", endpoint, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn query_collection(
        &self,
        collection: &CollectionId,
        query: &CollectionQuery,
    ) -> Result<PaginatedResponse<CollectionRow>, AppError> {
        let endpoint = format!("databases/{}/query", collection.to_hyphenated());
        let response = self.post(&endpoint, query).await?;
        let result = extract_response_text(response).await?;
        parser::parse_pages_pagination(result)
    }

    async fn list_children(
        &self,
        parent: &RecordId,
        page_size: u32,
    ) -> Result<PaginatedResponse<RawBlock>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.as_str());
        let response = self
            .get(&endpoint, &[("page_size", page_size.to_string())])
            .await?;
        let result = extract_response_text(response).await?;
        parser::parse_blocks_pagination(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
