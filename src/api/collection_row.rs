// src/api/collection_row.rs
//! Decoding of collection query rows.
//!
//! A row's `properties` is an open map: every column of the collection shows
//! up there, with whatever type the workspace gave it. [`CollectionRow`] keeps
//! the map untyped and decodes only the properties it is asked for, one at a
//! time, so an unfamiliar column never fails the query that returned it.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// One row of a `databases/{id}/query` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionRow {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// A person listed in a people property.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize)]
struct TextRun {
    #[serde(default)]
    plain_text: Option<String>,
    #[serde(default)]
    text: Option<TextContent>,
}

#[derive(Deserialize)]
struct TextContent {
    #[serde(default)]
    content: String,
}

impl TextRun {
    fn into_text(self) -> String {
        self.plain_text
            .or_else(|| self.text.map(|text| text.content))
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct TitleValue {
    title: Vec<TextRun>,
}

#[derive(Deserialize)]
struct CheckboxValue {
    checkbox: bool,
}

#[derive(Deserialize)]
struct DateValue {
    date: Option<DateRange>,
}

#[derive(Deserialize)]
struct DateRange {
    #[serde(default)]
    start: Option<String>,
}

#[derive(Deserialize)]
struct PeopleValue {
    people: Vec<Person>,
}

impl CollectionRow {
    /// Concatenated plain text of a title property; empty when the property
    /// is missing or is not a title.
    pub fn title_text(&self, name: &str) -> String {
        self.property::<TitleValue>(name, "title")
            .map(|value| value.title.into_iter().map(TextRun::into_text).collect())
            .unwrap_or_default()
    }

    /// Value of a checkbox property, `false` when absent.
    pub fn checkbox(&self, name: &str) -> bool {
        self.property::<CheckboxValue>(name, "checkbox")
            .is_some_and(|value| value.checkbox)
    }

    /// The `start` of a date property exactly as the API sent it.
    pub fn date_start(&self, name: &str) -> Option<String> {
        self.property::<DateValue>(name, "date")
            .and_then(|value| value.date)
            .and_then(|range| range.start)
    }

    /// People of a people property, in order.
    pub fn people(&self, name: &str) -> Vec<Person> {
        self.property::<PeopleValue>(name, "people")
            .map(|value| value.people)
            .unwrap_or_default()
    }

    /// Decodes property `name` if present and of type `kind`.
    fn property<T: DeserializeOwned>(&self, name: &str, kind: &str) -> Option<T> {
        let value = self.properties.get(name)?;
        let actual = value.get("type").and_then(Value::as_str);
        if actual != Some(kind) {
            log::debug!(
                "Row {} property '{}' has type {:?}, expected '{}'",
                self.id,
                name,
                actual,
                kind
            );
            return None;
        }
        T::deserialize(value)
            .map_err(|e| {
                log::debug!(
                    "Row {} has an undecodable '{}' property: {}",
                    self.id,
                    name,
                    e
                )
            })
            .ok()
    }
}
