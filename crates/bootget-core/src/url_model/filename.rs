//! Local filename for saving a downloaded image.

/// Used when the URL path yields nothing usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Derives a safe filename from the last path segment of `url`.
///
/// Query and fragment are ignored. Falls back to `download.bin` when the URL
/// does not parse or the path is empty, root, `.` or `..`.
pub fn derive_output_filename(url: &str) -> String {
    let segment = url::Url::parse(url).ok().and_then(|parsed| {
        parsed
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .last()
            .map(str::to_string)
    });

    match segment.map(|s| sanitize_filename(&s)) {
        Some(name) if !name.is_empty() && name != "." && name != ".." => name,
        _ => DEFAULT_FILENAME.to_string(),
    }
}

/// Sanitizes a candidate filename for safe use on Linux.
///
/// - Replaces NUL, `/`, `\`, whitespace and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing dots and underscores
/// - Limits length to 255 bytes (NAME_MAX)
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let bad = c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace();
        if bad || c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');

    let mut take = trimmed.len().min(NAME_MAX);
    while !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
