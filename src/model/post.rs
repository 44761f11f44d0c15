use crate::slug::slugify;
use crate::types::RecordId;
use chrono::{DateTime, NaiveDate};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One published post, as listed in the blog index.
///
/// The slug is always derived from the title; construct through
/// [`PostRecord::new`] to keep that true. The fetcher only indexes posts
/// whose slug is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: RecordId,
    title: String,
    slug: String,
    pub published: bool,
    /// ISO date (`YYYY-MM-DD`) or RFC 3339 date-time; empty when unset.
    pub date: String,
    pub authors: Vec<String>,
    /// Preview paragraphs shown on listing pages, when available.
    pub preview: Option<Vec<String>>,
}

impl PostRecord {
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>) -> Self {
        let title = title.into();
        let slug = slugify(&title);
        Self {
            id: id.into(),
            title,
            slug,
            published: false,
            date: String::new(),
            authors: Vec::new(),
            preview: None,
        }
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_preview(mut self, preview: Vec<String>) -> Self {
        self.preview = Some(preview);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// The date as milliseconds since the Unix epoch, as carried by the
    /// legacy `Date` field. `None` when the date is empty or unparsable.
    pub fn date_millis(&self) -> Option<i64> {
        if self.date.is_empty() {
            return None;
        }
        if let Ok(day) = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            return day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp_millis());
        }
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|dt| dt.timestamp_millis())
    }
}

// Legacy consumers read `Page`, `Slug`, `Published`, `Date` and `Authors`.
// They are written from the canonical fields on every serialization and
// ignored on deserialization, so the two sets cannot drift apart.
impl Serialize for PostRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("PostRecord", 12)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("slug", &self.slug)?;
        state.serialize_field("published", &self.published)?;
        state.serialize_field("date", &self.date)?;
        state.serialize_field("authors", &self.authors)?;
        state.serialize_field("preview", &self.preview)?;
        state.serialize_field("Page", &self.title)?;
        state.serialize_field("Slug", &self.slug)?;
        state.serialize_field("Published", if self.published { "Yes" } else { "No" })?;
        state.serialize_field("Date", &self.date_millis())?;
        state.serialize_field("Authors", &self.authors)?;
        state.end()
    }
}

#[derive(Deserialize)]
struct StoredPost {
    id: RecordId,
    title: String,
    #[serde(default)]
    published: bool,
    #[serde(default)]
    date: String,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default)]
    preview: Option<Vec<String>>,
}

impl<'de> Deserialize<'de> for PostRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let stored = StoredPost::deserialize(deserializer)?;
        let mut post = PostRecord::new(stored.id, stored.title)
            .with_published(stored.published)
            .with_date(stored.date)
            .with_authors(stored.authors);
        post.preview = stored.preview;
        Ok(post)
    }
}
