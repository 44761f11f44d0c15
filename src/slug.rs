// src/slug.rs
//! Title → URL slug assignment.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug regex is valid"));

/// Derives the canonical URL slug for a post title.
///
/// Lowercases and trims the title, collapses every run of characters
/// outside `[a-z0-9]` into one hyphen, then strips leading and trailing
/// hyphens. Total: an empty or all-punctuation title yields `""`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_SLUG_RUN
        .replace_all(lowered.trim(), "-")
        .trim_matches('-')
        .to_string()
}
