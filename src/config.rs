//! Configuration file parser for `magstand.toml`.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though we log a warning when the file
//! contains potential typos.
use crate::feed::{Backend, FeedSource};
use crate::render::{DocumentAssets, RenderOptions};
use crate::util::{
    html_lang, locale_from_env, resolve_locale, validate_api_base, validate_feed_url,
    UrlValidationError,
};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "https://api.rss2json.com/v1/api.json";
pub const DEFAULT_RSS_PARAM: &str = "rss_url";

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";
const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

const KNOWN_KEYS: &[&str] = &[
    "magazines",
    "backend",
    "api_base",
    "rss_param",
    "locale",
    "excerpt_width",
    "report_failures",
    "page_title",
    "stylesheets",
    "scripts",
];

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid api_base: {0}")]
    ApiBase(#[from] UrlValidationError),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Which service turns feed URLs into feed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// rss2json-compatible JSON converter (default).
    #[default]
    Rss2Json,
    /// Fetch and parse RSS/Atom locally.
    Direct,
}

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed URLs, rendered in this order.
    pub magazines: Vec<String>,

    pub backend: BackendKind,

    /// Converter endpoint (rss2json backend only).
    pub api_base: String,

    /// Query parameter carrying the feed URL (rss2json backend only).
    pub rss_param: String,

    /// Locale for dates, e.g. "en-US". Falls back to LC_ALL/LC_TIME/LANG.
    pub locale: Option<String>,

    /// Maximum excerpt width in columns. 0 = unlimited.
    pub excerpt_width: usize,

    /// List sources that failed to load below the accordion.
    pub report_failures: bool,

    pub page_title: String,

    pub stylesheets: Vec<String>,

    pub scripts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            magazines: Vec::new(),
            backend: BackendKind::Rss2Json,
            api_base: DEFAULT_API_BASE.to_string(),
            rss_param: DEFAULT_RSS_PARAM.to_string(),
            locale: None,
            excerpt_width: 0,
            report_failures: false,
            page_title: "Magazines".to_string(),
            stylesheets: vec![BOOTSTRAP_CSS.to_string(), FONT_AWESOME_CSS.to_string()],
            scripts: vec![BOOTSTRAP_JS.to_string()],
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted and logged as a warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            magazines = config.magazines.len(),
            backend = ?config.backend,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// The configured backend, with the converter endpoint validated.
    pub fn backend(&self) -> Result<Backend, ConfigError> {
        match self.backend {
            BackendKind::Rss2Json => Ok(Backend::Rss2Json {
                api_base: validate_api_base(&self.api_base)?,
                rss_param: self.rss_param.clone(),
            }),
            BackendKind::Direct => Ok(Backend::Direct),
        }
    }

    /// Configured feed sources in order. Invalid URLs are skipped with a
    /// warning.
    pub fn sources(&self) -> Vec<FeedSource> {
        self.magazines
            .iter()
            .filter_map(|url| match validate_feed_url(url) {
                Ok(_) => Some(FeedSource::new(url.trim())),
                Err(e) => {
                    tracing::warn!(feed = %url, error = %e, "Skipping invalid feed URL");
                    None
                }
            })
            .collect()
    }

    /// Locale tag in effect: `locale` from the config, else the environment
    /// (`LC_ALL`, `LC_TIME`, `LANG`). Empty when neither is set, which
    /// resolves to `en_US`.
    pub fn locale_tag(&self) -> String {
        self.locale_tag_with(locale_from_env)
    }

    fn locale_tag_with<F>(&self, env: F) -> String
    where
        F: FnOnce() -> Option<String>,
    {
        self.locale
            .clone()
            .filter(|l| !l.trim().is_empty())
            .or_else(env)
            .unwrap_or_default()
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            locale: resolve_locale(&self.locale_tag()),
            excerpt_width: self.excerpt_width,
        }
    }

    /// Page `lang` attribute for the locale in effect.
    pub fn lang(&self) -> String {
        html_lang(&self.locale_tag())
    }

    pub fn assets(&self) -> DocumentAssets {
        DocumentAssets {
            stylesheets: self.stylesheets.clone(),
            scripts: self.scripts.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
