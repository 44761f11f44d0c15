use super::PostRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which snapshot of the index a caller wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexMode {
    /// The full index, as fetched.
    Normal,
    /// The index with the preview payload cleared on its leading records.
    Previews,
}

impl IndexMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexMode::Normal => "normal",
            IndexMode::Previews => "previews",
        }
    }
}

impl std::fmt::Display for IndexMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Published posts keyed by slug, in the order the API returned them
/// (newest first).
///
/// Inserting a post whose slug is already present replaces the earlier post
/// and keeps the earlier position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogIndex {
    posts: IndexMap<String, PostRecord>,
}

impl BlogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a post under its slug, returning the post it displaced.
    pub fn insert(&mut self, post: PostRecord) -> Option<PostRecord> {
        self.posts.insert(post.slug().to_string(), post)
    }

    pub fn get(&self, slug: &str) -> Option<&PostRecord> {
        self.posts.get(slug)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.posts.keys().map(String::as_str)
    }

    pub fn posts(&self) -> impl Iterator<Item = &PostRecord> {
        self.posts.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostRecord)> {
        self.posts.iter().map(|(slug, post)| (slug.as_str(), post))
    }

    /// Clears the preview of the first `limit` posts in iteration order.
    /// Returns how many posts were visited.
    pub fn clear_leading_previews(&mut self, limit: usize) -> usize {
        let mut cleared = 0;
        for post in self.posts.values_mut().take(limit) {
            post.preview = None;
            cleared += 1;
        }
        cleared
    }
}

impl FromIterator<PostRecord> for BlogIndex {
    fn from_iter<I: IntoIterator<Item = PostRecord>>(iter: I) -> Self {
        let mut index = BlogIndex::new();
        for post in iter {
            index.insert(post);
        }
        index
    }
}

impl IntoIterator for BlogIndex {
    type Item = (String, PostRecord);
    type IntoIter = indexmap::map::IntoIter<String, PostRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.into_iter()
    }
}
