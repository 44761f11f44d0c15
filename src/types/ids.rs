use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one published record (a Notion page).
///
/// Record ids are assigned by the API and treated as opaque: no format
/// validation, no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of the collection (Notion database) holding the posts.
///
/// Accepts a bare 32-character hex id, a hyphenated UUID, or a Notion URL
/// containing either. Stored in the non-hyphenated lowercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionId(String);

impl CollectionId {
    /// Parses various Notion ID formats.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim().trim_end_matches('/');

        if cleaned.is_empty() {
            return Err(ValidationError::EmptyField("collection id"));
        }

        let compact = cleaned.replace('-', "");
        if compact.len() == 32 && compact.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Self(compact.to_lowercase()));
        }

        if cleaned.contains("notion") {
            return Self::extract_from_url(cleaned);
        }

        Err(ValidationError::InvalidId(format!(
            "Could not parse Notion ID from: {}",
            input
        )))
    }

    /// Extracts the ID from Notion URLs.
    fn extract_from_url(url: &str) -> Result<Self, ValidationError> {
        static ID_REGEX: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"(?:[/-])([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})(?:[/?#]|$)",
            )
            .expect("Notion ID regex is valid")
        });

        ID_REGEX
            .captures(url)
            .and_then(|captures| captures.get(1))
            .map(|id| Self(id.as_str().replace('-', "").to_lowercase()))
            .ok_or_else(|| ValidationError::InvalidId(format!("No valid ID found in URL: {}", url)))
    }

    /// Returns the canonical non-hyphenated ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hyphenated UUID format used in API paths.
    pub fn to_hyphenated(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            &self.0[0..8],
            &self.0[8..12],
            &self.0[12..16],
            &self.0[16..20],
            &self.0[20..32]
        )
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
