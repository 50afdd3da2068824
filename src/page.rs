//! Page composition: fetch every configured feed, then build the accordion.
//!
//! [`init`] is the entry point a host awaits. It fetches all sources
//! concurrently, waits for every request to settle, and returns a [`Page`]
//! whose markup is rendered from explicit [`PageState`]. Sources that fail
//! are left out of the accordion rather than rendered as broken sections.

use crate::config::{Config, ConfigError};
use crate::feed::{fetch_all, FeedOutcome};
use crate::interact::{Controller, UiEvent};
use crate::model::{FailedSource, PageState, Section};
use crate::render::{
    create_news_accordion, render_document, DocumentAssets, Element, RenderOptions,
};
use crate::util::{IdGenerator, DEFAULT_LANG};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("No feeds configured: add URLs to `magazines` or pass --feed")]
    NoFeedsConfigured,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Rendering switches that apply to the whole page.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeOptions {
    pub render: RenderOptions,
    /// Document `lang` attribute, e.g. `en-US`.
    pub lang: String,
    /// List failed sources below the accordion.
    pub report_failures: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            lang: DEFAULT_LANG.to_string(),
            report_failures: false,
        }
    }
}

/// A composed page: state plus the settings needed to render it.
pub struct Page {
    controller: Controller,
    options: ComposeOptions,
}

impl Page {
    pub fn state(&self) -> &PageState {
        self.controller.state()
    }

    /// Applies a UI event to the page state. Returns `true` if anything changed.
    pub fn dispatch(&mut self, event: UiEvent) -> bool {
        self.controller.dispatch(event)
    }

    /// The accordion for the current state.
    pub fn accordion(&self) -> Element {
        create_news_accordion(self.state(), &self.options.render)
    }

    /// Everything placed in the content container: the accordion, followed by
    /// the failure notice when enabled and any source failed.
    pub fn content(&self) -> Vec<Element> {
        let mut content = vec![self.accordion()];
        if self.options.report_failures && !self.state().failed().is_empty() {
            content.push(render_failures(self.state().failed()));
        }
        content
    }

    /// A complete HTML document for the current state.
    pub fn to_document(&self, title: &str, assets: &DocumentAssets) -> String {
        render_document(title, &self.options.lang, &self.content(), assets)
    }
}

fn render_failures(failed: &[FailedSource]) -> Element {
    let mut list = Element::new("ul").class("feed-errors");
    for f in failed {
        list.push(
            Element::new("li")
                .class("feed-error")
                .attr("title", f.reason.as_str())
                .text(format!("This feed could not be loaded: {}", f.source)),
        );
    }
    list
}

/// Builds a page from fetch outcomes, in order, skipping failed sources.
pub fn compose(outcomes: Vec<FeedOutcome>, options: ComposeOptions) -> Page {
    compose_with_ids(outcomes, options, &mut IdGenerator::new())
}

/// [`compose`] with a caller-supplied id generator.
pub fn compose_with_ids<R: Rng>(
    outcomes: Vec<FeedOutcome>,
    options: ComposeOptions,
    ids: &mut IdGenerator<R>,
) -> Page {
    let mut sections = Vec::new();
    let mut failed = Vec::new();

    for outcome in outcomes {
        match outcome {
            FeedOutcome::Loaded { source, feed } => {
                sections.push(Section::new(source, feed, ids.next_id()));
            }
            FeedOutcome::Failed { source, reason } => {
                tracing::warn!(
                    feed = %source,
                    reason = %reason,
                    "Skipping feed that failed to load"
                );
                failed.push(FailedSource { source, reason });
            }
        }
    }

    if sections.is_empty() && !failed.is_empty() {
        tracing::warn!(failed = failed.len(), "No feeds could be loaded");
    }

    Page {
        controller: Controller::new(PageState::new(sections, failed)),
        options,
    }
}

/// Fetches every configured feed and composes the page.
///
/// Per-feed failures never fail the page; they are logged and the source is
/// skipped.
///
/// # Errors
///
/// - [`PageError::NoFeedsConfigured`] - No valid feed URL in the configuration
/// - [`PageError::Config`] - The converter endpoint is invalid
pub async fn init(client: &reqwest::Client, config: &Config) -> Result<Page, PageError> {
    let sources = config.sources();
    if sources.is_empty() {
        return Err(PageError::NoFeedsConfigured);
    }
    let backend = config.backend()?;

    tracing::info!(feeds = sources.len(), "Fetching feeds");
    let outcomes = fetch_all(client, &backend, &sources).await;

    Ok(compose(
        outcomes,
        ComposeOptions {
            render: config.render_options(),
            lang: config.lang(),
            report_failures: config.report_failures,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{ArticleRecord, FeedInfo, FeedResult, FeedSource};
    use crate::interact::ClickTarget;
    use crate::model::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn loaded(url: &str, title: &str, items: usize) -> FeedOutcome {
        FeedOutcome::Loaded {
            source: FeedSource::new(url),
            feed: FeedResult {
                feed: FeedInfo {
                    title: Some(title.into()),
                    link: None,
                },
                items: (0..items)
                    .map(|i| ArticleRecord {
                        title: Some(format!("{} #{}", title, i)),
                        ..Default::default()
                    })
                    .collect(),
            },
        }
    }

    fn failed(url: &str) -> FeedOutcome {
        FeedOutcome::Failed {
            source: FeedSource::new(url),
            reason: "HTTP error: status 500".into(),
        }
    }

    fn compose_seeded(outcomes: Vec<FeedOutcome>, report_failures: bool) -> Page {
        let options = ComposeOptions {
            report_failures,
            ..ComposeOptions::default()
        };
        let mut ids = IdGenerator::with_rng(StdRng::seed_from_u64(42), 4);
        compose_with_ids(outcomes, options, &mut ids)
    }

    #[test]
    fn test_failed_sources_are_skipped() {
        let page = compose_seeded(
            vec![
                loaded("https://a.example", "A", 2),
                failed("https://b.example"),
                loaded("https://c.example", "C", 1),
            ],
            false,
        );

        let accordion = page.accordion();
        let titles: Vec<String> = accordion
            .find_by_class("accordion-header")
            .iter()
            .map(|h| h.text_content())
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(page.state().failed().len(), 1);
    }

    #[test]
    fn test_first_loaded_source_is_expanded() {
        let page = compose_seeded(
            vec![
                failed("https://a.example"),
                loaded("https://b.example", "B", 1),
                loaded("https://c.example", "C", 1),
            ],
            false,
        );
        let accordion = page.accordion();
        let panels = accordion.find_by_class("accordion-collapse");
        assert_eq!(panels.len(), 2);
        assert!(panels[0].has_class("show"));
        assert!(!panels[1].has_class("show"));
        assert_eq!(accordion.find_by_class("accordion-header")[0].text_content(), "B");
    }

    #[test]
    fn test_section_ids_are_unique() {
        let outcomes = (0..50)
            .map(|i| loaded(&format!("https://{}.example", i), "T", 0))
            .collect();
        let page = compose_seeded(outcomes, false);
        let mut ids: Vec<&str> = page
            .state()
            .sections()
            .iter()
            .map(|s| s.num_id.as_str())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_failure_notice_only_when_enabled() {
        let outcomes = || vec![loaded("https://a.example", "A", 1), failed("https://b.example")];

        let quiet = compose_seeded(outcomes(), false);
        assert_eq!(quiet.content().len(), 1);

        let loud = compose_seeded(outcomes(), true);
        let content = loud.content();
        assert_eq!(content.len(), 2);
        assert!(content[1].has_class("feed-errors"));
        assert!(content[1].text_content().contains("https://b.example"));
        // The notice is not an accordion section
        assert_eq!(content[0].find_by_class("accordion-item").len(), 1);
    }

    #[test]
    fn test_dispatch_rerenders_controls() {
        let mut page = compose_seeded(vec![loaded("https://a.example", "A", 3)], false);
        let carousel = page.state().sections()[0].carousel_id();

        page.dispatch(UiEvent::Click {
            carousel: carousel.clone(),
            target: ClickTarget::Control(Direction::Next),
        });
        page.dispatch(UiEvent::Click {
            carousel,
            target: ClickTarget::Control(Direction::Next),
        });

        let accordion = page.accordion();
        assert!(accordion.find_by_class("carousel-next")[0].has_class("hidden"));
        assert!(!accordion.find_by_class("carousel-prev")[0].has_class("hidden"));
        let slides = accordion.find_by_class("carousel-item");
        assert!(slides[2].has_class("active"));
        assert_eq!(slides.iter().filter(|s| s.has_class("active")).count(), 1);
    }

    #[test]
    fn test_all_failed_renders_empty_accordion() {
        let page = compose_seeded(vec![failed("https://a.example")], false);
        assert!(page.state().sections().is_empty());
        assert!(page.accordion().find_by_class("accordion-item").is_empty());
        assert!(page.state().expanded().is_none());
    }

    #[test]
    fn test_document_wires_carousel_controls() {
        let page = compose_seeded(vec![loaded("https://a.example", "A", 3)], false);
        let carousel = page.state().sections()[0].carousel_id();
        let doc = page.to_document("M", &Config::default().assets());

        assert!(doc.contains(&format!(r#"id="{}" data-bs-wrap="false""#, carousel)));
        assert!(doc.contains("<style>"));
        assert!(doc.contains(".carousel-btn.hidden { display: none; }"));
        assert!(doc.contains("\"slide.bs.carousel\""));
        assert!(doc.contains("\"animationend\""));
        // The behaviour script runs after the Bootstrap bundle
        let bundle = doc.find("bootstrap.bundle.min.js").unwrap();
        assert!(doc.find("\"slide.bs.carousel\"").unwrap() > bundle);
        assert!(doc.contains("<html lang=\"en-US\">"));
    }

    #[tokio::test]
    async fn test_init_without_feeds() {
        let client = reqwest::Client::new();
        let result = init(&client, &Config::default()).await;
        assert!(matches!(result, Err(PageError::NoFeedsConfigured)));
    }
}
