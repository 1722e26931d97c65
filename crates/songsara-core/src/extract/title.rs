//! Album title cascade.

use scraper::Html;

use super::{non_empty, selector, text_content};

/// Generic containers tried after the named sources, in order.
const FALLBACK_TITLE_SELECTORS: [&str; 6] = [
    ".title",
    ".album-title",
    "[class*='title']",
    "[class*='album']",
    ".playlist-title",
    "[class*='playlist']",
];

/// Finds the album title: site-specific container, then first heading, then
/// Open Graph metadata, then the document title, then generic containers.
/// Every candidate is trimmed before the non-empty test.
pub(super) fn album_title(doc: &Html) -> Option<String> {
    select_text(doc, ".AL-Si")
        .or_else(|| select_text(doc, "h1"))
        .or_else(|| select_attr(doc, "meta[property='og:title']", "content"))
        .or_else(|| select_text(doc, "title"))
        .or_else(|| {
            FALLBACK_TITLE_SELECTORS
                .iter()
                .find_map(|css| select_text(doc, css))
        })
}

/// Trimmed text of the first matching element with any, if one exists.
fn select_text(doc: &Html, css: &str) -> Option<String> {
    let sel = selector(css)?;
    doc.select(&sel).find_map(|el| non_empty(text_content(&el)))
}

/// Trimmed attribute of the first matching element carrying it non-empty.
fn select_attr(doc: &Html, css: &str, name: &str) -> Option<String> {
    let sel = selector(css)?;
    doc.select(&sel).find_map(|el| {
        el.value()
            .attr(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    })
}
