//! Explicit page and carousel state.
//!
//! The rendered markup is a projection of these types; nothing is read back
//! from markup.

mod carousel;
mod page;

pub use carousel::{CarouselState, Direction};
pub use page::{FailedSource, PageState, Section};
