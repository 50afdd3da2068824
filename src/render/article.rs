use super::dom::Element;
use super::RenderOptions;
use crate::feed::ArticleRecord;
use crate::util::{
    format_date, machine_readable_date, parse_timestamp, strip_tags, truncate_excerpt,
};

const UNTITLED: &str = "Untitled";
const UNKNOWN_AUTHOR: &str = "Unknown author";
const UNKNOWN_DATE: &str = "Date unavailable";

fn field(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Renders one article: image, title, byline with date, and excerpt.
///
/// Missing fields render as placeholders instead of empty markup.
pub fn render_article(article: &ArticleRecord, opts: &RenderOptions) -> Element {
    let title = field(article.title.as_deref()).unwrap_or(UNTITLED);

    let image = match article.image_url() {
        Some(src) => Element::new("figure").class("article-image").child(
            Element::new("img")
                .attr("src", src)
                .attr("alt", "Article Image")
                .attr("loading", "lazy"),
        ),
        None => Element::new("figure").class("article-image no-image"),
    };

    let header = Element::new("header")
        .class("article-header")
        .child(Element::new("h3").class("article-title").text(title))
        .child(
            Element::new("div")
                .class("article-meta")
                .child(
                    Element::new("address")
                        .text(field(article.author.as_deref()).unwrap_or(UNKNOWN_AUTHOR)),
                )
                .child(Element::new("div").class("meta-separator"))
                .child(render_time(article.pub_date.as_deref(), opts)),
        );

    let excerpt = article
        .description
        .as_deref()
        .map(strip_tags)
        .unwrap_or_default();
    let content = Element::new("section")
        .class("article-content")
        .child(Element::new("p").text(truncate_excerpt(&excerpt, opts.excerpt_width)));

    Element::new("article")
        .class("carousel-article")
        .child(image)
        .child(
            Element::new("div")
                .class("article-body")
                .child(header)
                .child(content),
        )
}

fn render_time(pub_date: Option<&str>, opts: &RenderOptions) -> Element {
    let parsed = pub_date.and_then(|s| Some((machine_readable_date(s)?, parse_timestamp(s)?)));
    match parsed {
        Some((machine, ts)) => Element::new("time")
            .attr("datetime", machine)
            .text(format_date(&ts, opts.locale)),
        None => Element::new("time").text(UNKNOWN_DATE),
    }
}
