use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A configured feed URL. Order in the configuration is preserved through to
/// the rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedSource(String);

impl FeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn url(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeedSource {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for FeedSource {
    fn from(url: String) -> Self {
        Self(url)
    }
}

/// Parsed feed payload: `{ feed: { title }, items: [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedResult {
    #[serde(default)]
    pub feed: FeedInfo,
    #[serde(default)]
    pub items: Vec<ArticleRecord>,
}

impl FeedResult {
    /// Feed title, or the source URL when the feed does not carry one.
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.feed
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(fallback)
    }
}

/// Channel-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// One article as delivered by the converter. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, rename = "pubDate")]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_enclosure")]
    pub enclosure: Option<Enclosure>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl ArticleRecord {
    /// Image for the article: the enclosure link, else the thumbnail.
    pub fn image_url(&self) -> Option<&str> {
        self.enclosure
            .as_ref()
            .and_then(|e| non_empty(e.link.as_deref()))
            .or_else(|| non_empty(self.thumbnail.as_deref()))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, rename = "type")]
    pub mime_type: Option<String>,
}

/// rss2json sends `{}` or `[]` for items without an enclosure. Anything that
/// is not an enclosure object becomes `None` instead of failing the feed.
fn lenient_enclosure<'de, D>(deserializer: D) -> Result<Option<Enclosure>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Object(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

/// Result of fetching one configured source.
#[derive(Debug, Clone)]
pub enum FeedOutcome {
    Loaded {
        source: FeedSource,
        feed: FeedResult,
    },
    Failed {
        source: FeedSource,
        reason: String,
    },
}

impl FeedOutcome {
    pub fn source(&self) -> &FeedSource {
        match self {
            FeedOutcome::Loaded { source, .. } | FeedOutcome::Failed { source, .. } => source,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FeedOutcome::Loaded { .. })
    }
}
