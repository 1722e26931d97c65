//! Audio extension sniffing from media URL paths.

/// Extensions recognized on a media URL path, in probe order.
pub const AUDIO_EXTENSIONS: [&str; 4] = [".mp3", ".m4a", ".wav", ".flac"];

/// Extracts a known audio extension from a media URL.
///
/// The match is done on the URL *path* (query strings and fragments do not
/// confuse it) and is case-sensitive. Returns `None` if the URL cannot be
/// parsed or its path ends in none of the known extensions.
pub fn audio_ext_from_url(url: &str) -> Option<&'static str> {
    let parsed = url::Url::parse(url).ok()?;
    let path = parsed.path();
    AUDIO_EXTENSIONS
        .iter()
        .find(|ext| path.ends_with(*ext))
        .copied()
}
