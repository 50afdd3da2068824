use super::carousel::CarouselState;
use crate::feed::{ArticleRecord, FeedResult, FeedSource};

/// One accordion section: a loaded feed and its carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub source: FeedSource,
    pub title: String,
    /// Random numeric id shared by the heading, panel and carousel ids.
    pub num_id: String,
    pub articles: Vec<ArticleRecord>,
    pub carousel: CarouselState,
}

impl Section {
    pub fn new(source: FeedSource, feed: FeedResult, num_id: String) -> Self {
        let title = feed.title_or(source.url()).to_string();
        let carousel = CarouselState::new(feed.items.len());
        Self {
            source,
            title,
            num_id,
            articles: feed.items,
            carousel,
        }
    }

    pub fn heading_id(&self) -> String {
        format!("heading{}", self.num_id)
    }

    pub fn collapse_id(&self) -> String {
        format!("collapse{}", self.num_id)
    }

    pub fn carousel_id(&self) -> String {
        format!("carousel{}", self.num_id)
    }
}

/// A configured source that produced no usable data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSource {
    pub source: FeedSource,
    pub reason: String,
}

/// Everything the page renders from.
///
/// Sections are in configured order with failed sources left out. The first
/// section starts expanded; later expand/collapse belongs to the UI library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    sections: Vec<Section>,
    failed: Vec<FailedSource>,
    expanded: Option<usize>,
}

impl PageState {
    pub fn new(sections: Vec<Section>, failed: Vec<FailedSource>) -> Self {
        let expanded = (!sections.is_empty()).then_some(0);
        Self {
            sections,
            failed,
            expanded,
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn failed(&self) -> &[FailedSource] {
        &self.failed
    }

    /// Index of the section expanded at load.
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn section_by_carousel(&self, carousel_id: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.carousel_id() == carousel_id)
    }

    pub fn carousel_mut(&mut self, carousel_id: &str) -> Option<&mut CarouselState> {
        self.sections
            .iter_mut()
            .find(|s| s.carousel_id() == carousel_id)
            .map(|s| &mut s.carousel)
    }
}
