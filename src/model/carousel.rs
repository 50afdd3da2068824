/// Navigation direction of a carousel control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// Value of the control's `data-bs-slide` attribute.
    pub fn slide_attr(self) -> &'static str {
        match self {
            Direction::Prev => "prev",
            Direction::Next => "next",
        }
    }

    /// Class identifying the control element.
    pub fn control_class(self) -> &'static str {
        match self {
            Direction::Prev => "carousel-prev",
            Direction::Next => "carousel-next",
        }
    }

    /// Transient class applied while the control's click animation runs.
    pub fn animation_class(self) -> &'static str {
        match self {
            Direction::Prev => "animate-prev",
            Direction::Next => "animate-next",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Prev => "Previous",
            Direction::Next => "Next",
        }
    }
}

/// Navigation state of one carousel.
///
/// Control visibility is derived from the active index rather than stored, so
/// a control is hidden exactly when the active slide sits at its boundary.
/// With no slides both controls are hidden and there is no active slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    slides: usize,
    active: usize,
    prev_animating: bool,
    next_animating: bool,
}

impl CarouselState {
    /// Fresh state: first slide active, nothing animating.
    pub fn new(slides: usize) -> Self {
        Self {
            slides,
            active: 0,
            prev_animating: false,
            next_animating: false,
        }
    }

    pub fn slides(&self) -> usize {
        self.slides
    }

    /// Index of the active slide, `None` for an empty carousel.
    pub fn active(&self) -> Option<usize> {
        (self.slides > 0).then_some(self.active)
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active() == Some(index)
    }

    pub fn prev_hidden(&self) -> bool {
        self.slides == 0 || self.active == 0
    }

    pub fn next_hidden(&self) -> bool {
        self.slides == 0 || self.active + 1 >= self.slides
    }

    pub fn is_hidden(&self, direction: Direction) -> bool {
        match direction {
            Direction::Prev => self.prev_hidden(),
            Direction::Next => self.next_hidden(),
        }
    }

    pub fn is_animating(&self, direction: Direction) -> bool {
        match direction {
            Direction::Prev => self.prev_animating,
            Direction::Next => self.next_animating,
        }
    }

    /// Handles a click on a navigation control.
    ///
    /// Advances the active slide one step, then starts the control's
    /// animation. A click on a hidden control (nowhere to go) changes nothing
    /// and returns `false`.
    pub fn click(&mut self, direction: Direction) -> bool {
        if self.is_hidden(direction) {
            return false;
        }

        match direction {
            Direction::Prev => {
                self.active -= 1;
                self.prev_animating = true;
            }
            Direction::Next => {
                self.active += 1;
                self.next_animating = true;
            }
        }
        true
    }

    /// Handles the end of a control's animation. Clears the animation class
    /// once; returns `false` if that control was not animating.
    pub fn animation_end(&mut self, direction: Direction) -> bool {
        let flag = match direction {
            Direction::Prev => &mut self.prev_animating,
            Direction::Next => &mut self.next_animating,
        };
        std::mem::replace(flag, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_state() {
        let state = CarouselState::new(5);
        assert_eq!(state.active(), Some(0));
        assert!(state.prev_hidden());
        assert!(!state.next_hidden());
        assert!(!state.is_animating(Direction::Prev));
        assert!(!state.is_animating(Direction::Next));
    }

    #[test]
    fn test_boundaries_for_n_slides() {
        let n = 4;
        let mut state = CarouselState::new(n);

        for step in 1..n {
            assert!(state.click(Direction::Next));
            assert_eq!(state.active(), Some(step));
            if step < n - 1 {
                assert!(!state.prev_hidden());
                assert!(!state.next_hidden());
            }
        }
        // Last slide: next hidden, prev visible
        assert!(state.next_hidden());
        assert!(!state.prev_hidden());

        for _ in 1..n {
            assert!(state.click(Direction::Prev));
        }
        // Back at the first slide
        assert_eq!(state.active(), Some(0));
        assert!(state.prev_hidden());
        assert!(!state.next_hidden());
    }

    #[test]
    fn test_click_on_hidden_control_is_ignored() {
        let mut state = CarouselState::new(2);
        assert!(!state.click(Direction::Prev));
        assert_eq!(state.active(), Some(0));
        assert!(!state.is_animating(Direction::Prev));

        state.click(Direction::Next);
        assert!(!state.click(Direction::Next));
        assert_eq!(state.active(), Some(1));
    }

    #[test]
    fn test_single_slide_hides_both() {
        let state = CarouselState::new(1);
        assert!(state.prev_hidden());
        assert!(state.next_hidden());
        assert_eq!(state.active(), Some(0));
    }

    #[test]
    fn test_empty_carousel() {
        let mut state = CarouselState::new(0);
        assert_eq!(state.active(), None);
        assert!(state.prev_hidden());
        assert!(state.next_hidden());
        assert!(!state.click(Direction::Next));
    }

    #[test]
    fn test_animation_clears_once() {
        let mut state = CarouselState::new(3);
        state.click(Direction::Next);
        assert!(state.is_animating(Direction::Next));
        assert!(state.animation_end(Direction::Next));
        assert!(!state.is_animating(Direction::Next));
        // Second end event is a no-op
        assert!(!state.animation_end(Direction::Next));
        // Ending the other control's animation does nothing
        assert!(!state.animation_end(Direction::Prev));
    }

    #[test]
    fn test_both_controls_can_animate() {
        let mut state = CarouselState::new(3);
        state.click(Direction::Next);
        state.click(Direction::Prev);
        assert!(state.is_animating(Direction::Next));
        assert!(state.is_animating(Direction::Prev));
        state.animation_end(Direction::Prev);
        assert!(state.is_animating(Direction::Next));
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Prev), Just(Direction::Next)]
    }

    proptest! {
        #[test]
        fn prop_visibility_tracks_boundaries(
            slides in 0usize..12,
            clicks in proptest::collection::vec(direction(), 0..40),
        ) {
            let mut state = CarouselState::new(slides);
            for d in clicks {
                state.click(d);
                match state.active() {
                    Some(active) => {
                        prop_assert!(active < slides);
                        prop_assert_eq!(state.prev_hidden(), active == 0);
                        prop_assert_eq!(state.next_hidden(), active == slides - 1);
                    }
                    None => {
                        prop_assert_eq!(slides, 0);
                        prop_assert!(state.prev_hidden() && state.next_hidden());
                    }
                }
            }
        }
    }
}
