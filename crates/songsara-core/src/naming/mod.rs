//! Local naming for downloaded tracks.
//!
//! Derives the on-disk filename for a track from its playlist position,
//! title, and media URL, sanitized for safe filesystem use.

mod ext;
mod sanitize;

pub use ext::{audio_ext_from_url, AUDIO_EXTENSIONS};
pub use sanitize::sanitize_title;

/// Extension assumed when the media URL does not reveal one.
const DEFAULT_AUDIO_EXT: &str = ".mp3";

/// Derives the filename for a track: `NN - Title.ext`.
///
/// `index` is the 1-based position of the track on the page, zero-padded to
/// two digits so lexical and playlist order agree. The extension comes from
/// the media URL path, defaulting to `.mp3`.
///
/// # Examples
///
/// - `track_filename(1, "Track One", "https://cdn.x/a.mp3")` → `"01 - Track One.mp3"`
/// - `track_filename(12, "So/Lo", "https://cdn.x/b.flac")` → `"12 - SoLo.flac"`
pub fn track_filename(index: usize, title: &str, url: &str) -> String {
    let ext = audio_ext_from_url(url).unwrap_or(DEFAULT_AUDIO_EXT);
    format!("{:02} - {}{}", index, sanitize_title(title), ext)
}
