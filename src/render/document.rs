use super::behaviour::{carousel_script, carousel_style};
use super::dom::Element;

/// Id of the container that receives the accordion.
pub const CONTENT_ID: &str = "dynamic-content";

/// External stylesheets and scripts referenced by the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentAssets {
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
}

/// Wraps `content` in a complete HTML document.
///
/// `content` is placed inside the `#dynamic-content` container; nothing else
/// is inserted there. The built-in carousel style follows the external
/// stylesheets, and the carousel script runs last, after the external
/// scripts and the carousels it attaches to.
pub fn render_document(
    title: &str,
    lang: &str,
    content: &[Element],
    assets: &DocumentAssets,
) -> String {
    let mut container = Element::new("main").attr("id", CONTENT_ID);
    for element in content {
        container.push(element.clone());
    }

    let mut head = Element::new("head")
        .child(Element::new("meta").attr("charset", "utf-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1"),
        )
        .child(Element::new("title").text(title));
    for href in &assets.stylesheets {
        head.push(
            Element::new("link")
                .attr("rel", "stylesheet")
                .attr("href", href.as_str()),
        );
    }
    head.push(carousel_style());

    let mut body = Element::new("body")
        .child(
            Element::new("header")
                .class("page-header")
                .child(Element::new("h1").text(title)),
        )
        .child(container);
    for src in &assets.scripts {
        body.push(Element::new("script").attr("src", src.as_str()));
    }
    body.push(carousel_script());

    let html = Element::new("html")
        .attr("lang", lang)
        .child(head)
        .child(body);

    let mut out = String::from("<!DOCTYPE html>\n");
    html.write_html(&mut out);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> DocumentAssets {
        DocumentAssets {
            stylesheets: vec!["https://cdn.example/bootstrap.css".into()],
            scripts: vec!["https://cdn.example/bootstrap.js".into()],
        }
    }

    #[test]
    fn test_document_structure() {
        let accordion = Element::new("div").class("accordion").attr("id", "news-accordion");
        let doc = render_document("Magazines", "en-US", &[accordion], &assets());

        assert!(doc.starts_with("<!DOCTYPE html>\n<html lang=\"en-US\">"));
        assert!(doc.contains("<title>Magazines</title>"));
        assert!(doc.contains(
            r#"<link rel="stylesheet" href="https://cdn.example/bootstrap.css"><style>"#
        ));
        assert!(doc.contains(
            r#"<main id="dynamic-content"><div class="accordion" id="news-accordion"></div></main>"#
        ));
        assert!(doc.contains(
            r#"<script src="https://cdn.example/bootstrap.js"></script><script>"#
        ));
        assert!(doc.trim_end().ends_with("</script></body></html>"));
        assert_eq!(doc.matches("id=\"dynamic-content\"").count(), 1);
    }

    #[test]
    fn test_document_carries_carousel_behaviour() {
        let doc = render_document("M", "en-US", &[], &DocumentAssets::default());

        assert_eq!(doc.matches("<style>").count(), 1);
        assert!(doc.contains(".carousel-btn.hidden { display: none; }"));
        assert!(doc.contains(".carousel-btn.animate-next { animation:"));

        // The script is serialised verbatim and comes after the content
        let script_at = doc.find("\"slide.bs.carousel\"").unwrap();
        assert!(script_at > doc.find("</main>").unwrap());
        assert!(doc.contains("active >= slides - 1"));
        assert!(!doc.contains("&gt;="));
    }

    #[test]
    fn test_lang_is_passed_through() {
        let doc = render_document("M", "de-DE", &[], &DocumentAssets::default());
        assert!(doc.contains("<html lang=\"de-DE\">"));
    }
}
