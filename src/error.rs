// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system. The
//! core boundaries (fetcher, cache, normalizer) turn these into empty
//! results; everything below those boundaries propagates them with `?`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded; back off and retry
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "validation_error" => Self::ValidationFailed,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError => true,
            Self::HttpStatus(status) => is_retryable_status(*status),
            _ => false,
        }
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500..=599)
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index snapshot at {} is unreadable: {source}", .path.display())]
    SnapshotCorrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),

    #[error(transparent)]
    NotionClient(#[from] NotionClientError),
}

impl AppError {
    /// Whether the failure is transient: rate limiting, 5xx, or transport.
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::NetworkFailure(err) => {
                err.is_timeout()
                    || err.is_connect()
                    || err.status().is_some_and(|s| is_retryable_status(s.as_u16()))
            }
            AppError::NotionService { code, .. } => code.is_retryable(),
            AppError::NotionClient(NotionClientError::NotionApi { status, code, .. }) => {
                u16::try_from(*status).is_ok_and(is_retryable_status)
                    || NotionErrorCode::from_api_response(code).is_retryable()
            }
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Errors decoded from Notion API response bodies.
#[derive(Error, Debug)]
pub enum NotionClientError {
    #[error("Failed to deserialize response: {source}\nBody: {body}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Notion API error ({status}): {code} - {message}")]
    NotionApi {
        status: u32,
        code: String,
        message: String,
        request_id: Option<String>,
    },
}
