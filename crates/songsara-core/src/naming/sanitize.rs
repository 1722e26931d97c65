//! Title sanitization for safe filesystem names.

/// Sanitizes an album or track title for use as a file or directory name.
///
/// - Removes `/ * ? : " < > |`
/// - Trims leading/trailing whitespace
/// - Collapses internal whitespace runs to a single space
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut prev_space = false;

    for c in title.chars() {
        if matches!(c, '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|') {
            continue;
        }

        if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }

    out.trim_matches(' ').to_string()
}
