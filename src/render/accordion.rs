use super::carousel::render_carousel;
use super::dom::Element;
use super::RenderOptions;
use crate::feed::{FeedResult, FeedSource};
use crate::model::{PageState, Section};
use rand::Rng;

use crate::util::IdGenerator;

/// Id of the accordion container.
pub const ACCORDION_ID: &str = "news-accordion";

/// Renders one collapsible section for a loaded feed.
///
/// The toggle button is labelled with the feed title and targets the panel by
/// id; the panel holds the feed's carousel. Expanded state is left to
/// [`expand_first`].
pub fn render_accordion_item(section: &Section, parent_id: &str, opts: &RenderOptions) -> Element {
    let heading_id = section.heading_id();
    let collapse_id = section.collapse_id();

    let button = Element::new("button")
        .class("accordion-btn")
        .attr("type", "button")
        .attr("data-bs-toggle", "collapse")
        .attr("data-bs-target", format!("#{}", collapse_id))
        .attr("aria-expanded", "true")
        .attr("aria-controls", collapse_id.as_str())
        .child(
            Element::new("span")
                .class("accordion-btn-icon")
                .child(Element::new("i").class("fa-solid fa-angle-down")),
        )
        .child(
            Element::new("h2")
                .class("accordion-header")
                .attr("id", heading_id.as_str())
                .text(section.title.as_str()),
        );

    let panel = Element::new("div")
        .class("accordion-collapse collapse")
        .attr("id", collapse_id.as_str())
        .attr("aria-labelledby", heading_id)
        .attr("data-bs-parent", format!("#{}", parent_id))
        .child(Element::new("div").class("accordion-body").child(render_carousel(
            &section.articles,
            &section.num_id,
            &section.carousel,
            opts,
        )));

    Element::new("div")
        .class("accordion-item")
        .child(button)
        .child(panel)
}

/// Builds a section for `feed` with a fresh id pair and renders it.
pub fn generate_accordion_item<R: Rng>(
    source: FeedSource,
    feed: FeedResult,
    parent_id: &str,
    ids: &mut IdGenerator<R>,
    opts: &RenderOptions,
) -> (Element, Section) {
    let section = Section::new(source, feed, ids.next_id());
    (render_accordion_item(&section, parent_id, opts), section)
}

/// Renders the whole accordion, one item per section in order, with the
/// state's expanded section open.
pub fn create_news_accordion(state: &PageState, opts: &RenderOptions) -> Element {
    let mut accordion = Element::new("div").class("accordion").attr("id", ACCORDION_ID);
    for section in state.sections() {
        accordion.push(render_accordion_item(section, ACCORDION_ID, opts));
    }
    if let Some(expanded) = state.expanded() {
        expand_section(&mut accordion, expanded);
    }
    accordion
}

/// Opens the first section and marks every other toggle as collapsed.
pub fn expand_first(accordion: &mut Element) {
    expand_section(accordion, 0);
}

fn expand_section(accordion: &mut Element, expanded: usize) {
    let is_panel = |e: &Element| e.has_class("accordion-collapse");
    accordion.for_each_mut(&is_panel, &mut |idx: usize, panel: &mut Element| {
        if idx == expanded {
            panel.add_class("show");
        } else {
            panel.remove_class("show");
        }
    });

    let is_toggle = |e: &Element| e.has_class("accordion-btn");
    accordion.for_each_mut(&is_toggle, &mut |idx: usize, button: &mut Element| {
        if idx == expanded {
            button.remove_class("collapsed");
            button.set_attr("aria-expanded", "true");
        } else {
            button.add_class("collapsed");
            button.set_attr("aria-expanded", "false");
        }
    });
}
