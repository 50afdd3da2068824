//! Utility functions shared by the fetcher and the renderers.
//!
//! - **Formatting**: locale-aware dates and times, machine-readable dates
//! - **Ids**: random numeric ids linking accordion toggles to their panels
//! - **Text**: HTML escaping, tag stripping, excerpt truncation
//! - **URL validation**: scheme checks for feed sources and the converter endpoint

mod format;
mod ids;
mod text;
mod url_validator;

pub use format::{
    format_date, format_time, get_date, html_lang, locale_from_env, locale_from_vars,
    machine_readable_date, parse_timestamp, resolve_locale, DEFAULT_LANG, DEFAULT_LOCALE,
};
pub use ids::{generate_random_num_id, IdGenerator, DEFAULT_ID_LENGTH};
pub use text::{escape_attr, escape_text, strip_tags, truncate_excerpt};
pub use url_validator::{validate_api_base, validate_feed_url, UrlValidationError};
