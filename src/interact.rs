//! Click handling for carousels.
//!
//! [`Controller`] owns the [`PageState`] and applies UI events to it. Events
//! are delegated per carousel: a click anywhere in a carousel arrives here,
//! and only clicks that land on (or inside) a navigation control move the
//! carousel. Handlers never fail; events for unknown carousels are logged and
//! dropped.

use crate::model::{CarouselState, Direction, PageState};

/// What a click inside a carousel landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A navigation control or one of its icon/label children.
    Control(Direction),
    /// Anything else inside the carousel (a slide, its link, the image).
    Other,
}

impl ClickTarget {
    /// Resolves a click from the class lists of the clicked element and its
    /// ancestors, innermost first, stopping at the first navigation control.
    pub fn from_class_path<'a, I, C>(path: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = &'a str>,
    {
        for classes in path {
            let classes: Vec<&str> = classes.into_iter().collect();
            if !classes.contains(&"carousel-btn") {
                continue;
            }
            if classes.contains(&Direction::Prev.control_class()) {
                return ClickTarget::Control(Direction::Prev);
            }
            if classes.contains(&Direction::Next.control_class()) {
                return ClickTarget::Control(Direction::Next);
            }
        }
        ClickTarget::Other
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click {
        carousel: String,
        target: ClickTarget,
    },
    AnimationEnd {
        carousel: String,
        direction: Direction,
    },
}

pub struct Controller {
    state: PageState,
}

impl Controller {
    pub fn new(state: PageState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn into_state(self) -> PageState {
        self.state
    }

    pub fn carousel(&self, carousel_id: &str) -> Option<&CarouselState> {
        self.state
            .section_by_carousel(carousel_id)
            .map(|s| &s.carousel)
    }

    /// Applies one event. Returns `true` if any state changed.
    pub fn dispatch(&mut self, event: UiEvent) -> bool {
        match event {
            UiEvent::Click { carousel, target } => {
                let ClickTarget::Control(direction) = target else {
                    return false;
                };
                let Some(state) = self.state.carousel_mut(&carousel) else {
                    tracing::debug!(carousel = %carousel, "Click for unknown carousel ignored");
                    return false;
                };
                let moved = state.click(direction);
                tracing::trace!(
                    carousel = %carousel,
                    direction = direction.slide_attr(),
                    active = ?state.active(),
                    moved = moved,
                    "Carousel navigation"
                );
                moved
            }
            UiEvent::AnimationEnd {
                carousel,
                direction,
            } => match self.state.carousel_mut(&carousel) {
                Some(state) => state.animation_end(direction),
                None => {
                    tracing::debug!(
                        carousel = %carousel,
                        "Animation end for unknown carousel ignored"
                    );
                    false
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{ArticleRecord, FeedInfo, FeedResult};
    use crate::model::Section;

    fn state_with(slides: &[usize]) -> PageState {
        let sections = slides
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                Section::new(
                    format!("https://{}.example/rss", i).into(),
                    FeedResult {
                        feed: FeedInfo {
                            title: Some(format!("Feed {}", i)),
                            link: None,
                        },
                        items: vec![ArticleRecord::default(); n],
                    },
                    format!("{:04}", i),
                )
            })
            .collect();
        PageState::new(sections, Vec::new())
    }

    fn click(carousel: &str, direction: Direction) -> UiEvent {
        UiEvent::Click {
            carousel: carousel.to_string(),
            target: ClickTarget::Control(direction),
        }
    }

    #[test]
    fn test_click_path_resolution() {
        // Click on the icon inside the next button
        let path = vec![
            vec![],
            vec!["carousel-next-icon"],
            vec!["carousel-next", "carousel-btn"],
            vec!["carousel", "slide"],
        ];
        assert_eq!(
            ClickTarget::from_class_path(path),
            ClickTarget::Control(Direction::Next)
        );

        let slide = vec![vec!["carousel-article"], vec!["carousel-item", "active"]];
        assert_eq!(ClickTarget::from_class_path(slide), ClickTarget::Other);

        // A prev class without carousel-btn is not a control
        let fake = vec![vec!["carousel-prev"]];
        assert_eq!(ClickTarget::from_class_path(fake), ClickTarget::Other);
    }

    #[test]
    fn test_carousels_are_independent() {
        let mut controller = Controller::new(state_with(&[3, 3]));
        assert!(controller.dispatch(click("carousel0000", Direction::Next)));

        assert_eq!(controller.carousel("carousel0000").unwrap().active(), Some(1));
        assert_eq!(controller.carousel("carousel0001").unwrap().active(), Some(0));
    }

    #[test]
    fn test_non_control_click_is_ignored() {
        let mut controller = Controller::new(state_with(&[3]));
        let changed = controller.dispatch(UiEvent::Click {
            carousel: "carousel0000".into(),
            target: ClickTarget::Other,
        });
        assert!(!changed);
        assert_eq!(controller.carousel("carousel0000").unwrap().active(), Some(0));
    }

    #[test]
    fn test_unknown_carousel_is_ignored() {
        let mut controller = Controller::new(state_with(&[2]));
        assert!(!controller.dispatch(click("carousel9999", Direction::Next)));
        assert!(!controller.dispatch(UiEvent::AnimationEnd {
            carousel: "carousel9999".into(),
            direction: Direction::Next,
        }));
    }

    #[test]
    fn test_animation_lifecycle() {
        let mut controller = Controller::new(state_with(&[3]));
        controller.dispatch(click("carousel0000", Direction::Next));
        assert!(controller
            .carousel("carousel0000")
            .unwrap()
            .is_animating(Direction::Next));

        let end = UiEvent::AnimationEnd {
            carousel: "carousel0000".into(),
            direction: Direction::Next,
        };
        assert!(controller.dispatch(end.clone()));
        assert!(!controller.dispatch(end));
    }
}
