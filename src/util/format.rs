//! Date and time formatting for article metadata.
//!
//! Feed timestamps arrive as strings in whichever format the converter chose.
//! rss2json emits `YYYY-MM-DD HH:MM:SS` in UTC; the direct backend emits
//! RFC 3339; raw feeds occasionally leak RFC 2822 through. All three parse to a
//! UTC [`DateTime`], and all calendar fields are read in UTC.

use chrono::{DateTime, Datelike, Locale, NaiveDateTime, Utc};

/// Locale used when nothing else resolves.
pub const DEFAULT_LOCALE: Locale = Locale::en_US;

/// Parses a feed timestamp. Returns `None` for empty or unrecognised input.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    tracing::debug!(timestamp = %s, "Unrecognised timestamp format");
    None
}

/// Locale-formatted date only (the locale's `%x` representation).
pub fn format_date(ts: &DateTime<Utc>, locale: Locale) -> String {
    ts.format_localized("%x", locale).to_string()
}

/// Locale-formatted time only: 12-hour clock, minute precision, AM/PM marker.
pub fn format_time(ts: &DateTime<Utc>, locale: Locale) -> String {
    ts.format_localized("%-I:%M %p", locale)
        .to_string()
        .trim_end()
        .to_string()
}

/// Formats a timestamp string as a date, or as a time when `time` is set.
///
/// Returns `None` when the timestamp cannot be parsed.
pub fn get_date(date_string: &str, time: bool, locale: Locale) -> Option<String> {
    let ts = parse_timestamp(date_string)?;
    Some(if time {
        format_time(&ts, locale)
    } else {
        format_date(&ts, locale)
    })
}

/// `YYYY-MM-DD` for a `<time datetime>` attribute. Month and day are
/// zero-padded; the result contains no whitespace.
pub fn machine_readable_date(date_string: &str) -> Option<String> {
    let ts = parse_timestamp(date_string)?;
    Some(format!("{:04}-{:02}-{:02}", ts.year(), ts.month(), ts.day()))
}

/// `lang` value used when the locale tag does not resolve.
pub const DEFAULT_LANG: &str = "en-US";

/// Maps a locale tag to a chrono [`Locale`].
///
/// Accepts BCP-47 (`en-US`) and POSIX (`de_DE.UTF-8`, `fr_FR@euro`) spellings.
/// A bare language (`de`) resolves to its primary region (`de_DE`). Anything
/// unknown falls back to [`DEFAULT_LOCALE`].
pub fn resolve_locale(tag: &str) -> Locale {
    match lookup_locale(tag) {
        Some((_, locale)) => locale,
        None => {
            if !tag.trim().is_empty() {
                tracing::warn!(locale = %tag, fallback = "en_US", "Unknown locale, using fallback");
            }
            DEFAULT_LOCALE
        }
    }
}

/// HTML `lang` value for a locale tag (`de_DE.UTF-8` -> `de-DE`).
///
/// Resolves the tag the same way as [`resolve_locale`], so the page language
/// always matches the locale its dates are formatted in. `C`/`POSIX` map to
/// `en`.
pub fn html_lang(tag: &str) -> String {
    match lookup_locale(tag) {
        Some((name, _)) if name == "POSIX" => "en".to_string(),
        Some((name, _)) => name.replace('_', "-"),
        None => DEFAULT_LANG.to_string(),
    }
}

/// Canonical POSIX name and chrono locale for a tag, if chrono knows it.
fn lookup_locale(tag: &str) -> Option<(String, Locale)> {
    let base = tag
        .split(['.', '@'])
        .next()
        .unwrap_or("")
        .trim()
        .replace('-', "_");

    if base.is_empty() {
        return None;
    }
    if base == "C" || base == "POSIX" {
        return Some(("POSIX".to_string(), Locale::POSIX));
    }

    if let Ok(locale) = Locale::try_from(base.as_str()) {
        return Some((base, locale));
    }

    // "de" -> "de_DE", "en_us" -> "en_US"
    let mut parts = base.splitn(2, '_');
    let lang = parts.next().unwrap_or("").to_ascii_lowercase();
    let region = parts
        .next()
        .map(str::to_ascii_uppercase)
        .unwrap_or_else(|| lang.to_ascii_uppercase());
    let candidate = format!("{}_{}", lang, region);

    Locale::try_from(candidate.as_str())
        .ok()
        .map(|locale| (candidate, locale))
}

/// Reads the active locale from `LC_ALL`, `LC_TIME`, then `LANG`.
pub fn locale_from_env() -> Option<String> {
    locale_from_vars(|var| std::env::var(var).ok())
}

/// [`locale_from_env`] over an arbitrary variable lookup. Empty values are
/// skipped.
pub fn locale_from_vars<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|var| lookup(var))
        .find(|v| !v.trim().is_empty())
}
