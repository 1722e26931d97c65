//! Track list strategies, most specific first.

use scraper::{ElementRef, Html};

use super::{non_empty, selector, text_content, Track};

/// Generic playlist-item shapes tried when the site player is absent. Each
/// selector is evaluated across the whole page; the first one producing any
/// valid track ends the scan.
const GENERIC_ITEM_SELECTORS: [&str; 13] = [
    "li[data-title]",
    ".track",
    ".song",
    "[class*='track']",
    "[class*='song']",
    "li",
    ".playlist-item",
    "[class*='playlist']",
    "[data-src]",
    "[src*='.mp3']",
    "[src*='.m4a']",
    "[src*='.wav']",
    "[src*='.flac']",
];

/// Media source candidates inside one playlist item, in order.
const ITEM_SOURCE_SELECTORS: [&str; 6] = [
    "[data-src]",
    "[src]",
    "audio source",
    "a[href*='.mp3']",
    "a[href*='.m4a']",
    "a[href*='.wav']",
];

/// Anchors that point straight at audio files (last-resort strategy, also
/// used for diagnostics).
pub(super) const AUDIO_LINK_SELECTOR: &str =
    "a[href*='.mp3'], a[href*='.m4a'], a[href*='.wav'], a[href*='.flac']";

/// Runs the strategy cascade and returns the first non-empty track list.
pub(super) fn tracks(doc: &Html) -> Vec<Track> {
    let strategies: [fn(&Html) -> Vec<Track>; 4] =
        [player_list, generic_items, audio_elements, audio_links];

    strategies
        .iter()
        .map(|strategy| strategy(doc))
        .find(|found| !found.is_empty())
        .unwrap_or_default()
}

/// Strategy 1: the SongSara player widget.
fn player_list(doc: &Html) -> Vec<Track> {
    let Some(sel) = selector("#aramplayer .audioplayer-audios li") else {
        return Vec::new();
    };
    doc.select(&sel)
        .filter_map(|el| track_from_item(&el))
        .collect()
}

/// Strategy 2: generic playlist-item selectors.
fn generic_items(doc: &Html) -> Vec<Track> {
    for css in GENERIC_ITEM_SELECTORS {
        let Some(sel) = selector(css) else { continue };
        let found: Vec<Track> = doc
            .select(&sel)
            .filter_map(|el| track_from_item(&el))
            .collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

/// Strategy 3: bare `<audio>` elements.
fn audio_elements(doc: &Html) -> Vec<Track> {
    let Some(sel) = selector("audio") else {
        return Vec::new();
    };
    doc.select(&sel)
        .filter_map(|el| track_from_audio(&el))
        .collect()
}

/// Strategy 4: anchors linking to audio files.
fn audio_links(doc: &Html) -> Vec<Track> {
    let Some(sel) = selector(AUDIO_LINK_SELECTOR) else {
        return Vec::new();
    };
    doc.select(&sel)
        .filter_map(|el| track_from_link(&el))
        .collect()
}

/// Builds a track from a playlist item; `None` if title or URL is missing.
fn track_from_item(item: &ElementRef<'_>) -> Option<Track> {
    let title = item_title(item)?;
    let url = item_source(item)?;
    Some(Track { title, url })
}

/// Title of a playlist item: own `data-title`, a descendant's `data-title`,
/// or the item's text.
fn item_title(item: &ElementRef<'_>) -> Option<String> {
    attr_trimmed(item, "data-title")
        .or_else(|| find_attr(item, "[data-title]", "data-title"))
        .or_else(|| non_empty(text_content(item)))
}

/// Media URL of a playlist item: the player's source div first, then the
/// alternative selectors with a `data-src` → `src` → `href` attribute chain
/// on the first element each matches.
fn item_source(item: &ElementRef<'_>) -> Option<String> {
    if let Some(url) = find_attr(item, "div.audioplayer-source", "data-src") {
        return Some(url);
    }

    ITEM_SOURCE_SELECTORS.iter().find_map(|css| {
        let sel = selector(css)?;
        let found = item.select(&sel).next()?;
        ["data-src", "src", "href"]
            .iter()
            .find_map(|name| attr_trimmed(&found, name))
    })
}

fn track_from_audio(el: &ElementRef<'_>) -> Option<Track> {
    let title = attr_trimmed(el, "title")
        .or_else(|| attr_trimmed(el, "alt"))
        .or_else(|| parent_element(el).and_then(|p| find_attr(&p, "[title]", "title")))
        .or_else(|| parent_element(el).and_then(|p| non_empty(text_content(&p))))?;
    let url = attr_trimmed(el, "src").or_else(|| find_attr(el, "source", "src"))?;
    Some(Track { title, url })
}

fn track_from_link(el: &ElementRef<'_>) -> Option<Track> {
    let title = non_empty(text_content(el))
        .or_else(|| attr_trimmed(el, "title"))
        .or_else(|| attr_trimmed(el, "alt"))?;
    let url = attr_trimmed(el, "href")?;
    Some(Track { title, url })
}

/// Trimmed, non-empty attribute value of `el` itself.
fn attr_trimmed(el: &ElementRef<'_>, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trimmed, non-empty attribute of the first descendant matching `css`.
fn find_attr(el: &ElementRef<'_>, css: &str, name: &str) -> Option<String> {
    let sel = selector(css)?;
    el.select(&sel)
        .next()
        .and_then(|found| attr_trimmed(&found, name))
}

fn parent_element<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.parent().and_then(ElementRef::wrap)
}
