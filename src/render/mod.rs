//! Markup generation for the magazine page.
//!
//! Renderers are pure functions from feed data and [`crate::model`] state to
//! an [`Element`] tree. Class names and `data-bs-*` attributes follow the
//! Bootstrap collapse/carousel conventions so the library's own scripts drive
//! expand/collapse and slide transitions.
//!
//! - [`article`] - One article block
//! - [`carousel`] - A feed's articles as slides with prev/next controls
//! - [`accordion`] - Collapsible sections, one per feed
//! - [`document`] - The surrounding HTML document
//! - [`behaviour`] - Inline style and script for carousel controls

mod accordion;
mod article;
mod behaviour;
mod carousel;
mod document;
mod dom;

pub use accordion::{
    create_news_accordion, expand_first, generate_accordion_item, render_accordion_item,
    ACCORDION_ID,
};
pub use article::render_article;
pub use behaviour::{carousel_script, carousel_style};
pub use carousel::render_carousel;
pub use document::{render_document, DocumentAssets, CONTENT_ID};
pub use dom::{Element, Node};

use chrono::Locale;

/// Settings shared by every renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Locale for visible dates.
    pub locale: Locale,
    /// Maximum excerpt width in display columns, 0 for unlimited.
    pub excerpt_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            locale: crate::util::DEFAULT_LOCALE,
            excerpt_width: 0,
        }
    }
}
