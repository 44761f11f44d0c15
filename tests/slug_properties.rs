// tests/slug_properties.rs
//! Properties of slug assignment over a spread of titles.

use notion_blog_index::slugify;

const TITLES: &[&str] = &[
    "Hello, World! 2024",
    "  padded title  ",
    "---dashes---",
    "MiXeD CaSe",
    "émigré café",
    "snake_case and kebab-case",
    "Rust 1.75: async fn in traits",
    "中文标题",
    "!!!",
    "",
    "a/b\\c",
    "tabs\tand\nnewlines",
];

#[test]
fn slugs_use_only_the_slug_alphabet() {
    for title in TITLES {
        let slug = slugify(title);
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
            "{:?} -> {:?}",
            title,
            slug
        );
        assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{:?}", slug);
        assert!(!slug.contains("--"), "{:?}", slug);
    }
}

#[test]
fn slugify_is_idempotent() {
    for title in TITLES {
        let once = slugify(title);
        assert_eq!(slugify(&once), once);
    }
}

#[test]
fn known_titles() {
    assert_eq!(slugify("Hello, World! 2024"), "hello-world-2024");
    assert_eq!(slugify("A/B"), slugify("A B"));
    assert_eq!(slugify("émigré café"), "migr-caf");
    assert_eq!(slugify("中文标题"), "");
    assert_eq!(slugify("tabs\tand\nnewlines"), "tabs-and-newlines");
}
