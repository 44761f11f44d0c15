// src/api/block_content.rs
//! Decoding of raw child blocks into a closed set of content variants.
//!
//! The API nests each block's payload under a key named after its type tag
//! (`{"type": "quote", "quote": {...}}`). [`RawBlock`] keeps the tag and the
//! untyped payload; [`RawBlock::decode`] applies one decode rule per
//! recognized tag. Unknown tags, and recognized tags whose payload does not
//! decode, become [`BlockContent::Other`] carrying the raw tag.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A child block as returned by `blocks/{id}/children`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Typed content of a block, one variant per recognized tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Paragraph(Vec<String>),
    Heading1(Vec<String>),
    Heading2(Vec<String>),
    Heading3(Vec<String>),
    BulletedListItem(Vec<String>),
    NumberedListItem(Vec<String>),
    Code {
        runs: Vec<String>,
        language: Option<String>,
    },
    Quote(Vec<String>),
    Divider,
    Image(ImageSource),
    Other(String),
}

/// Where an image block's bytes live.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImageSource {
    External { external: FileLink },
    File { file: FileLink },
}

impl ImageSource {
    pub fn url(&self) -> &str {
        match self {
            ImageSource::External { external } => &external.url,
            ImageSource::File { file } => &file.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileLink {
    pub url: String,
}

#[derive(Deserialize)]
struct TextRun {
    #[serde(default)]
    plain_text: String,
}

#[derive(Deserialize)]
struct TextPayload {
    rich_text: Vec<TextRun>,
}

impl TextPayload {
    fn into_runs(self) -> Vec<String> {
        self.rich_text.into_iter().map(|run| run.plain_text).collect()
    }
}

#[derive(Deserialize)]
struct CodePayload {
    rich_text: Vec<TextRun>,
    #[serde(default)]
    language: Option<String>,
}

impl RawBlock {
    /// Decodes the payload according to the block's type tag.
    pub fn decode(&self) -> BlockContent {
        let decoded = match self.block_type.as_str() {
            "paragraph" => self.text_runs().map(BlockContent::Paragraph),
            "heading_1" => self.text_runs().map(BlockContent::Heading1),
            "heading_2" => self.text_runs().map(BlockContent::Heading2),
            "heading_3" => self.text_runs().map(BlockContent::Heading3),
            "bulleted_list_item" => self.text_runs().map(BlockContent::BulletedListItem),
            "numbered_list_item" => self.text_runs().map(BlockContent::NumberedListItem),
            "quote" => self.text_runs().map(BlockContent::Quote),
            "code" => self.payload::<CodePayload>().map(|code| BlockContent::Code {
                language: code.language.filter(|lang| !lang.is_empty()),
                runs: code.rich_text.into_iter().map(|run| run.plain_text).collect(),
            }),
            "divider" => Some(BlockContent::Divider),
            "image" => self.payload::<ImageSource>().map(BlockContent::Image),
            _ => None,
        };

        decoded.unwrap_or_else(|| BlockContent::Other(self.block_type.clone()))
    }

    fn text_runs(&self) -> Option<Vec<String>> {
        self.payload::<TextPayload>().map(TextPayload::into_runs)
    }

    /// Decodes the payload stored under the type tag, if present and valid.
    fn payload<T: DeserializeOwned>(&self) -> Option<T> {
        let value = self.fields.get(&self.block_type)?;
        T::deserialize(value)
            .map_err(|e| {
                log::debug!(
                    "Block {} has an undecodable '{}' payload: {}",
                    self.id,
                    self.block_type,
                    e
                )
            })
            .ok()
    }
}
