use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Text runs in renderer shape: one single-element tuple per run.
pub type RunList = Vec<[String; 1]>;

/// The node vocabulary understood by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeType {
    Text,
    Header,
    SubHeader,
    SubSubHeader,
    BulletedList,
    NumberedList,
    Code,
    Quote,
    Divider,
    Image,
    /// A block type outside the vocabulary, carrying the raw API tag.
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Text => "text",
            NodeType::Header => "header",
            NodeType::SubHeader => "sub_header",
            NodeType::SubSubHeader => "sub_sub_header",
            NodeType::BulletedList => "bulleted_list",
            NodeType::NumberedList => "numbered_list",
            NodeType::Code => "code",
            NodeType::Quote => "quote",
            NodeType::Divider => "divider",
            NodeType::Image => "image",
            NodeType::Other(tag) => tag,
        }
    }

    pub fn parse(tag: &str) -> Self {
        match tag {
            "text" => NodeType::Text,
            "header" => NodeType::Header,
            "sub_header" => NodeType::SubHeader,
            "sub_sub_header" => NodeType::SubSubHeader,
            "bulleted_list" => NodeType::BulletedList,
            "numbered_list" => NodeType::NumberedList,
            "code" => NodeType::Code,
            "quote" => NodeType::Quote,
            "divider" => NodeType::Divider,
            "image" => NodeType::Image,
            other => NodeType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(NodeType::parse(&tag))
    }
}

/// Presentation hints attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFormat {
    pub display_source: String,
}

/// One content block, normalized for a generic renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub properties: BTreeMap<String, RunList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<NodeFormat>,
}

impl RenderNode {
    /// A node with no properties and no format.
    pub fn bare(id: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            node_type,
            properties: BTreeMap::new(),
            format: None,
        }
    }

    pub fn with_property(mut self, name: &str, runs: RunList) -> Self {
        self.properties.insert(name.to_string(), runs);
        self
    }

    pub fn with_format(mut self, format: NodeFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The `title` runs, empty when the node has none.
    pub fn title_runs(&self) -> &[[String; 1]] {
        self.properties
            .get("title")
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
