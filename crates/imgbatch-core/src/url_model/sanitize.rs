//! Filename sanitization for names derived from URLs.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Makes a URL-derived candidate safe to use as a single path component.
///
/// Separators, NUL, whitespace and control characters become `_` (runs collapse
/// to one), leading/trailing dots and underscores are trimmed, and the result is
/// cut to 255 bytes on a char boundary.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let c = if c == '/' || c == '\\' || c.is_control() || c.is_whitespace() {
            '_'
        } else {
            c
        };
        if c == '_' {
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
