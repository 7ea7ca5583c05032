//! Input sanitization helpers.
//!
//! Every attribute that enters the schema passes through one of these
//! functions before it is persisted. Keys become lowercase slugs, display
//! strings lose markup and control characters, numeric strings are coerced
//! leniently (a malformed tail is ignored rather than rejected).

/// Sanitize an identifier into a `[a-z0-9_]` slug.
///
/// Uppercase letters are lowercased, whitespace and hyphens become
/// underscores, anything else is dropped. An input with no usable
/// characters yields an empty string.
#[must_use]
pub fn sanitize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        match ch {
            'a'..='z' | '0'..='9' | '_' => out.push(ch),
            'A'..='Z' => out.push(ch.to_ascii_lowercase()),
            ' ' | '\t' | '-' => out.push('_'),
            _ => {}
        }
    }
    out
}

/// Sanitize a single-line display string.
///
/// Strips `<...>` tag spans and control characters, collapses whitespace
/// runs to a single space and trims the ends.
#[must_use]
pub fn sanitize_text(raw: &str) -> String {
    collapse(&strip_tags(raw), false)
}

/// Sanitize a multi-line text value, preserving line breaks.
#[must_use]
pub fn sanitize_multiline(raw: &str) -> String {
    collapse(&strip_tags(raw), true)
}

/// Lenient numeric coercion.
///
/// Parses the longest leading numeric prefix (optional sign, decimal
/// point) and ignores the rest, so `"250 hp"` coerces to `250.0`.
/// Returns `None` when no digits lead the input.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let mut end = 0;
    let bytes = s.as_bytes();
    if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse().ok()
}

fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for ch in raw.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn collapse(raw: &str, keep_newlines: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    let mut pending_newline = false;
    for ch in raw.chars() {
        if ch == '\n' && keep_newlines {
            pending_newline = true;
            pending_space = false;
        } else if ch.is_whitespace() {
            pending_space = true;
        } else if ch.is_control() {
            // control characters other than newline are dropped outright
        } else {
            if pending_newline {
                if !out.is_empty() {
                    out.push('\n');
                }
                pending_newline = false;
                pending_space = false;
            }
            if pending_space {
                if !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}
