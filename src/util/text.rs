use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended to truncated excerpts
const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Escapes a string for use as HTML text content.
///
/// Returns `Cow::Borrowed` when nothing needs escaping (the common case for
/// feed titles and author names).
pub fn escape_text(s: &str) -> Cow<'_, str> {
    escape(s, false)
}

/// Escapes a string for use inside a double-quoted HTML attribute value.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape(s, true)
}

fn escape(s: &str, attr: bool) -> Cow<'_, str> {
    let needs_escape = s
        .bytes()
        .any(|b| matches!(b, b'&' | b'<' | b'>') || (attr && matches!(b, b'"' | b'\'')));

    if !needs_escape {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            '\'' if attr => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Converts an HTML fragment (as found in feed descriptions) into plain text.
///
/// Tags are dropped, `<br>`/`</p>` boundaries become spaces, the common named
/// and numeric entities are decoded, and runs of whitespace collapse to a
/// single space. Content inside `<script>` and `<style>` is discarded.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(c) = rest.chars().next() {
        match c {
            '<' => {
                let Some(end) = rest.find('>') else {
                    // Unterminated tag: the remainder is not markup we can trust
                    break;
                };
                let tag = rest[1..end].trim().to_ascii_lowercase();
                rest = &rest[end + 1..];

                let name = tag
                    .trim_start_matches('/')
                    .split(|ch: char| ch.is_whitespace() || ch == '/')
                    .next()
                    .unwrap_or("");
                if !tag.starts_with('/') && (name == "script" || name == "style") {
                    let close = format!("</{}", name);
                    match rest.to_ascii_lowercase().find(&close) {
                        Some(idx) => {
                            rest = &rest[idx..];
                        }
                        None => break,
                    }
                    continue;
                }
                if matches!(name, "br" | "p" | "div" | "li" | "h1" | "h2" | "h3" | "h4") {
                    out.push(' ');
                }
            }
            '&' => {
                let (decoded, consumed) = decode_entity(rest);
                out.push_str(&decoded);
                rest = &rest[consumed..];
            }
            _ => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    collapse_whitespace(&out)
}

/// Decodes one entity at the start of `s`. Returns the replacement text and
/// the number of bytes consumed. Unknown entities are passed through verbatim.
fn decode_entity(s: &str) -> (Cow<'static, str>, usize) {
    let Some(semi) = s.find(';').filter(|&i| i <= 10) else {
        return (Cow::Borrowed("&"), 1);
    };
    let name = &s[1..semi];
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => name
            .strip_prefix("#x")
            .or_else(|| name.strip_prefix("#X"))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .or_else(|| name.strip_prefix('#').and_then(|dec| dec.parse().ok()))
            .and_then(char::from_u32),
    };

    match decoded {
        Some(c) => (Cow::Owned(c.to_string()), semi + 1),
        None => (Cow::Borrowed("&"), 1),
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shortens an excerpt to fit `max_width` display columns.
///
/// Prefers to cut at the last word boundary that fits and appends "...".
/// A `max_width` of 0 means unlimited. Widths too narrow for text plus the
/// ellipsis get a hard cut with no ellipsis. Width is measured with Unicode
/// display widths so CJK text is not cut at twice the intended length.
pub fn truncate_excerpt(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 || UnicodeWidthStr::width(s) <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Borrowed(&s[..prefix_fitting(s, max_width)]);
    }

    let target = max_width.saturating_sub(ELLIPSIS_WIDTH);
    let mut width = 0;
    let mut cut = 0;
    let mut last_space = None;

    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > target {
            break;
        }
        if c.is_whitespace() {
            last_space = Some(idx);
        }
        width += w;
        cut = idx + c.len_utf8();
    }

    let end = last_space.filter(|&i| i > 0).unwrap_or(cut);
    Cow::Owned(format!("{}{}", s[..end].trim_end(), ELLIPSIS))
}

/// Byte length of the longest prefix of `s` at most `max_width` columns wide.
fn prefix_fitting(s: &str, max_width: usize) -> usize {
    let mut width = 0;
    for (idx, c) in s.char_indices() {
        width += UnicodeWidthChar::width(c).unwrap_or(0);
        if width > max_width {
            return idx;
        }
    }
    s.len()
}
