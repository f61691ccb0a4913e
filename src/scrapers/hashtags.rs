use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Tags kept per listing
pub const MAX_TAGS: usize = 3;

static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// `"hashtags": "…"` with straight or curly quotes; WordPress curls them.
static HASHTAGS_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)["'\u{2018}\u{2019}\u{201C}\u{201D}]?hashtags["'\u{2018}\u{2019}\u{201C}\u{201D}]?\s*:\s*["'\u{2018}\u{2019}\u{201C}\u{201D}]([^"'\u{2018}\u{2019}\u{201C}\u{201D}]+)["'\u{2018}\u{2019}\u{201C}\u{201D}]"#,
    )
    .unwrap()
});

/// A tag starts with a letter; digits and spaces may follow.
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[a-zA-ZÀ-ÿ][a-zA-ZÀ-ÿ0-9\s]*").unwrap());

static HEX_COLOUR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").unwrap());

/// Tags from the first paragraph mentioning "hashtags".
///
/// `None` when the page carries no hashtags field at all.
pub fn extract_hashtags(document: &Html) -> Option<Vec<String>> {
    let paragraph = document
        .select(&PARAGRAPH)
        .map(|p| p.text().collect::<String>())
        .find(|text| text.to_lowercase().contains("hashtags"))?;

    let value = HASHTAGS_FIELD.captures(&paragraph)?.get(1)?.as_str().to_string();
    Some(parse_hashtags(&value))
}

/// Unique, non-colour tags from a raw hashtags value, first [`MAX_TAGS`] kept
pub fn parse_hashtags(value: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    HASHTAG
        .find_iter(value)
        .map(|m| m.as_str().trim().to_string())
        .filter(|tag| tag.chars().count() >= 3)
        .filter(|tag| !HEX_COLOUR.is_match(tag))
        .filter(|tag| seen.insert(tag.clone()))
        .take(MAX_TAGS)
        .collect()
}
