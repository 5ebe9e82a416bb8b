//! Free-text handling for list names and descriptions.
//!
//! Writes go through [`sanitize`]: encoded line breaks become newlines, then angle
//! brackets are entity-escaped. Reads go through [`to_display`], which only turns
//! newlines back into `<br>`. Entities are never unescaped, so escaped brackets
//! come back as literal `&lt;`/`&gt;` text.

const LINE_BREAK: &str = "<br>";

/// Sanitize user-provided text before it is persisted.
///
/// Line breaks are converted before escaping, so `<br>` tokens are never escaped.
pub fn sanitize(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => text
            .replace(LINE_BREAK, "\n")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
        _ => String::new(),
    }
}

/// Normalize a stored description for display.
pub fn to_display(stored: Option<&str>) -> String {
    match stored {
        Some(stored) if !stored.is_empty() => stored.replace('\n', LINE_BREAK),
        _ => String::new(),
    }
}
