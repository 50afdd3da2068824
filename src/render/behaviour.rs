//! Inline style and script carried by every page.
//!
//! The script applies the [`CarouselState`](crate::model::CarouselState)
//! rules to the live page. It listens on each carousel rather than per
//! control. On `slide.bs.carousel` it derives control visibility from the
//! index being moved to. A click on a visible control adds that control's
//! animation class, which is removed once on `animationend`. Clicks on a
//! hidden control are swallowed before Bootstrap's document-level handler
//! sees them. Carousels are rendered with `data-bs-wrap="false"`, so the
//! no-wrap rule holds for keyboard and touch navigation as well.

use super::dom::Element;

pub(crate) const CAROUSEL_STYLE: &str = r#"
.carousel { position: relative; }
.carousel-btn {
  position: absolute;
  top: 50%;
  z-index: 2;
  width: 2.5rem;
  height: 2.5rem;
  border: 0;
  border-radius: 50%;
  color: #fff;
  background: rgba(0, 0, 0, 0.5);
  transform: translateY(-50%);
}
.carousel-prev { left: 0.5rem; }
.carousel-next { right: 0.5rem; }
.carousel-btn.hidden { display: none; }
.carousel-btn.animate-prev { animation: magstand-nudge-prev 0.3s ease-out; }
.carousel-btn.animate-next { animation: magstand-nudge-next 0.3s ease-out; }
@keyframes magstand-nudge-prev { 50% { transform: translate(-0.25rem, -50%); } }
@keyframes magstand-nudge-next { 50% { transform: translate(0.25rem, -50%); } }
.article-image.no-image { min-height: 12rem; background: #e9ecef; }
.feed-errors { margin-top: 1rem; color: #842029; }
"#;

pub(crate) const CAROUSEL_SCRIPT: &str = r#"
(function () {
  "use strict";

  function sync(carousel, active) {
    var slides = carousel.querySelectorAll(".carousel-item:not(.empty)").length;
    var prev = carousel.querySelector(".carousel-prev");
    var next = carousel.querySelector(".carousel-next");
    if (prev) prev.classList.toggle("hidden", slides === 0 || active <= 0);
    if (next) next.classList.toggle("hidden", slides === 0 || active >= slides - 1);
  }

  function activeIndex(carousel) {
    var items = Array.prototype.slice.call(carousel.querySelectorAll(".carousel-item"));
    return items.findIndex(function (item) {
      return item.classList.contains("active");
    });
  }

  document.querySelectorAll(".carousel").forEach(function (carousel) {
    sync(carousel, activeIndex(carousel));

    carousel.addEventListener("slide.bs.carousel", function (event) {
      sync(carousel, event.to);
    });

    carousel.addEventListener("click", function (event) {
      var control = event.target.closest(".carousel-btn");
      if (!control || !carousel.contains(control)) return;
      if (control.classList.contains("hidden")) {
        event.preventDefault();
        event.stopPropagation();
        return;
      }
      var animation = control.classList.contains("carousel-prev")
        ? "animate-prev"
        : "animate-next";
      control.classList.add(animation);
      control.addEventListener(
        "animationend",
        function () {
          control.classList.remove(animation);
        },
        { once: true }
      );
    });
  });
})();
"#;

/// `<style>` element with the control, animation and placeholder rules.
pub fn carousel_style() -> Element {
    Element::new("style").raw(CAROUSEL_STYLE)
}

/// `<script>` element wiring carousel navigation. Must follow the carousels
/// in the document.
pub fn carousel_script() -> Element {
    Element::new("script").raw(CAROUSEL_SCRIPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;

    #[test]
    fn test_script_uses_rendered_class_names() {
        for direction in [Direction::Prev, Direction::Next] {
            let control = format!("\".{}\"", direction.control_class());
            let animation = format!("\"{}\"", direction.animation_class());
            assert!(CAROUSEL_SCRIPT.contains(&control), "missing {}", control);
            assert!(CAROUSEL_SCRIPT.contains(&animation), "missing {}", animation);
        }
        assert!(CAROUSEL_SCRIPT.contains("\".carousel-btn\""));
        assert!(CAROUSEL_SCRIPT.contains("\"hidden\""));
    }

    #[test]
    fn test_script_hooks() {
        assert!(CAROUSEL_SCRIPT.contains("\"slide.bs.carousel\""));
        assert!(CAROUSEL_SCRIPT.contains("event.to"));
        assert!(CAROUSEL_SCRIPT.contains("\"animationend\""));
        assert!(CAROUSEL_SCRIPT.contains("{ once: true }"));
        assert!(CAROUSEL_SCRIPT.contains("stopPropagation"));
    }

    #[test]
    fn test_style_defines_state_classes() {
        for direction in [Direction::Prev, Direction::Next] {
            let rule = format!(".carousel-btn.{} {{ animation:", direction.animation_class());
            assert!(CAROUSEL_STYLE.contains(&rule), "missing {}", rule);
        }
        assert!(CAROUSEL_STYLE.contains(".carousel-btn.hidden { display: none; }"));
        assert!(CAROUSEL_STYLE.contains("@keyframes magstand-nudge-prev"));
        assert!(CAROUSEL_STYLE.contains("@keyframes magstand-nudge-next"));
    }

    #[test]
    fn test_bodies_cannot_close_their_element_early() {
        assert!(!CAROUSEL_SCRIPT.contains("</"));
        assert!(!CAROUSEL_STYLE.contains("</"));
    }

    #[test]
    fn test_elements_serialise_unescaped() {
        let script = carousel_script().to_html();
        assert!(script.starts_with("<script>"));
        assert!(script.contains("active <= 0"));
        assert!(script.ends_with("</script>"));
        assert!(carousel_style().to_html().starts_with("<style>"));
    }
}
