use super::article::render_article;
use super::dom::Element;
use super::RenderOptions;
use crate::feed::ArticleRecord;
use crate::model::{CarouselState, Direction};

/// Renders a slideshow of `articles` with previous/next controls.
///
/// The container id is `carousel<num_id>`. Active slide, hidden controls and
/// control animations are projected from `state`. Each slide links to its
/// article in a new browsing context.
pub fn render_carousel(
    articles: &[ArticleRecord],
    num_id: &str,
    state: &CarouselState,
    opts: &RenderOptions,
) -> Element {
    let carousel_id = format!("carousel{}", num_id);

    let mut inner = Element::new("div").class("carousel-inner");

    if articles.is_empty() {
        inner.push(
            Element::new("div")
                .class("carousel-item active empty")
                .child(Element::new("p").class("carousel-empty").text("No articles")),
        );
    }

    for (idx, article) in articles.iter().enumerate() {
        let mut item = Element::new("div").class("carousel-item");
        if state.is_active(idx) {
            item.add_class("active");
        }

        let mut link = Element::new("a")
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer");
        if let Some(href) = article.link.as_deref().filter(|l| !l.trim().is_empty()) {
            link.set_attr("href", href.trim());
        }

        inner.push(item.child(link.child(render_article(article, opts))));
    }

    Element::new("div")
        .class("carousel slide")
        .attr("id", carousel_id.as_str())
        .attr("data-bs-wrap", "false")
        .child(inner)
        .child(render_control(&carousel_id, Direction::Prev, state))
        .child(render_control(&carousel_id, Direction::Next, state))
}

fn render_control(carousel_id: &str, direction: Direction, state: &CarouselState) -> Element {
    let icon = match direction {
        Direction::Prev => "fa-solid fa-angle-left",
        Direction::Next => "fa-solid fa-angle-right",
    };

    let mut button = Element::new("button")
        .class(direction.control_class())
        .class("carousel-btn")
        .attr("type", "button")
        .attr("data-bs-target", format!("#{}", carousel_id))
        .attr("data-bs-slide", direction.slide_attr());

    if state.is_hidden(direction) {
        button.add_class("hidden");
    }
    if state.is_animating(direction) {
        button.add_class(direction.animation_class());
    }

    button
        .child(
            Element::new("span")
                .class(&format!("{}-icon", direction.control_class()))
                .attr("aria-hidden", "true")
                .child(Element::new("i").class(icon)),
        )
        .child(
            Element::new("span")
                .class("visually-hidden")
                .text(direction.label()),
        )
}
