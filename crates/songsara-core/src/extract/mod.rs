//! Album and track extraction from SongSara page HTML.
//!
//! Pages vary a lot between albums, playlists, and site revisions, so
//! extraction is a cascade: the site-specific player markup is tried first,
//! then progressively more generic shapes. The first strategy that yields at
//! least one valid track wins. Parsing never fails; a page nothing matches on
//! simply produces an album with no tracks.

mod title;
mod tracks;

use scraper::{ElementRef, Html, Selector};

/// Album title used when every title strategy comes up empty.
pub const UNKNOWN_ALBUM_TITLE: &str = "Unknown Album";

/// One downloadable track scraped from a page.
///
/// Both fields are trimmed and non-empty; candidates missing either are
/// dropped during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub url: String,
}

/// A scraped album page: display title plus tracks in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub title: String,
    pub tracks: Vec<Track>,
}

/// Extracts an album from raw page HTML.
pub fn extract_album(html: &str) -> Album {
    let doc = Html::parse_document(html);
    let title = title::album_title(&doc).unwrap_or_else(|| UNKNOWN_ALBUM_TITLE.to_string());
    let tracks = tracks::tracks(&doc);
    Album { title, tracks }
}

/// Page facts worth logging when no strategy found any tracks.
#[derive(Debug)]
pub struct PageDiagnostics {
    pub page_title: String,
    pub heading_count: usize,
    pub audio_count: usize,
    pub audio_link_count: usize,
    /// The raw HTML mentions blocking, captchas, or error codes.
    pub looks_blocked: bool,
}

/// Collects diagnostics for a page that yielded zero tracks.
pub fn diagnose_page(html: &str) -> PageDiagnostics {
    let doc = Html::parse_document(html);
    let count = |css: &str| {
        selector(css)
            .map(|sel| doc.select(&sel).count())
            .unwrap_or(0)
    };

    PageDiagnostics {
        page_title: selector("title")
            .and_then(|sel| doc.select(&sel).next().map(|el| text_content(&el)))
            .unwrap_or_default(),
        heading_count: count("h1"),
        audio_count: count("audio"),
        audio_link_count: count(tracks::AUDIO_LINK_SELECTOR),
        looks_blocked: ["blocked", "captcha", "403", "404"]
            .iter()
            .any(|needle| html.contains(needle)),
    }
}

/// Parses a CSS selector, logging and skipping it if invalid.
fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(err) => {
            tracing::warn!(css, %err, "skipping unparseable selector");
            None
        }
    }
}

fn text_content(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_string()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
