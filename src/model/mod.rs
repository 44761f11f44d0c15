//! Domain model: posts, the slug-keyed index, and renderer nodes.

mod index;
mod post;
mod render_node;

pub use index::{BlogIndex, IndexMode};
pub use post::PostRecord;
pub use render_node::{NodeFormat, NodeType, RenderNode, RunList};

/// Display information for one author.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuthorProfile {
    pub display_name: String,
}
