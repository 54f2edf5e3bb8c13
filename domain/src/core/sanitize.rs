//! Trust-boundary string cleaning.
//!
//! Every string that crosses a trust boundary (an applicant's answer on its
//! way into a model prompt, a model's reason on its way into storage) goes
//! through [`sanitize`] first.

/// Clean a string for use across a trust boundary.
///
/// Control characters other than `\r`, `\n` and `\t` are replaced with
/// spaces, surrounding whitespace is trimmed, and the result is capped at
/// `max_chars` characters.
pub fn sanitize(value: &str, max_chars: usize) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| {
            if c.is_control() && c != '\r' && c != '\n' && c != '\t' {
                ' '
            } else {
                c
            }
        })
        .collect();
    truncate(cleaned.trim(), max_chars)
}

/// Truncate a string to a maximum number of characters (UTF-8 safe).
pub fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
