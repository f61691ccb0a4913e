//! Field heuristics shared by the listing and property scrapers.
//!
//! Every strategy is a plain function over a parsed [`Html`] document that
//! returns `None` when it finds nothing, so fallback chains are just
//! `.or_else(..)` sequences.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// Lazy-load attributes first, the plain `src` last
pub const FEATURED_IMAGE_ATTRS: &[&str] = &["data-lazy-src", "data-src", "src"];

/// Attributes read by the any-image fallback
const FALLBACK_IMAGE_ATTRS: &[&str] = &["data-src", "src"];

/// URL fragments that mark logos, icons, thumbnails and badges
const EXCLUDED_IMAGE_TOKENS: &[&str] = &[
    "logo",
    "icon",
    "placeholder",
    "avatar",
    "-80-80",
    "150x150",
    "50x50",
    "100x100",
    "-pb.png",
    "CDR-",
];

/// Trimmed text of the first `<h1>`, else of `<title>`; empty if neither has any.
pub fn extract_title(document: &Html) -> String {
    first_text(document, &H1)
        .or_else(|| first_text(document, &TITLE))
        .unwrap_or_default()
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Concatenated text of every element matching `selector`
pub fn text_of(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .flat_map(|el| el.text())
        .collect()
}

/// Text of the whole document
pub fn page_text(document: &Html) -> String {
    document.root_element().text().collect()
}

/// Text of the first container selector with any content, else the whole page
pub fn content_text(document: &Html, containers: &[&Selector]) -> String {
    containers
        .iter()
        .map(|selector| text_of(document, selector))
        .find(|text| !text.trim().is_empty())
        .unwrap_or_else(|| page_text(document))
}

/// First usable image among the elements matching `selector`.
///
/// Each element contributes its first non-empty attribute from `attrs`; a
/// data URI or placeholder disqualifies that element.
pub fn featured_image(
    document: &Html,
    selector: &Selector,
    attrs: &[&str],
    origin: &Url,
) -> Option<String> {
    document
        .select(selector)
        .filter_map(|el| first_attr(el, attrs))
        .find(|src| !src.starts_with("data:") && !src.contains("placeholder"))
        .map(|src| absolutize(src, origin))
}

/// First image on the page that does not look like a logo, icon or badge
pub fn fallback_image(document: &Html, origin: &Url) -> Option<String> {
    document
        .select(&IMG)
        .filter_map(|el| first_attr(el, FALLBACK_IMAGE_ATTRS))
        .find(|src| !is_excluded_image(src))
        .map(|src| absolutize(src, origin))
}

fn first_attr<'a>(element: ElementRef<'a>, attrs: &[&str]) -> Option<&'a str> {
    attrs
        .iter()
        .filter_map(|name| element.value().attr(name))
        .find(|value| !value.is_empty())
}

pub fn is_excluded_image(src: &str) -> bool {
    src.starts_with("data:") || EXCLUDED_IMAGE_TOKENS.iter().any(|token| src.contains(token))
}

/// Resolve root-relative URLs against the site origin; others pass through
pub fn absolutize(src: &str, origin: &Url) -> String {
    if !src.starts_with('/') {
        return src.to_string();
    }
    origin
        .join(src)
        .map(String::from)
        .unwrap_or_else(|_| format!("{}{}", origin.as_str().trim_end_matches('/'), src))
}
