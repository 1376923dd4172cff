//! Text normalization for imported documents.
//!
//! Imported job descriptions and extracted CV texts arrive with artifacts
//! from their source files: literal triple quotes, curly quotes, and runs of
//! whitespace. Everything sent to the model is also bounded in length.

/// Clean a text field from an imported file.
///
/// Strips literal triple quotes, normalizes doubled and curly single quotes,
/// collapses internal whitespace runs, and trims the ends.
pub fn clean_imported_text(raw: &str) -> String {
    let replaced = raw
        .replace("'''", "")
        .replace("''", "'")
        .replace('\u{2018}', "'")
        .replace('\u{2019}', "'");

    let mut out = String::with_capacity(replaced.len());
    let mut last_was_space = false;
    for ch in replaced.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out
}

/// Truncate a string to at most `max_chars` characters.
///
/// Operates on character boundaries, never splitting a multi-byte
/// character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
