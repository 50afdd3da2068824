//! Renders magazine feeds as an accordion of article carousels.
//!
//! The pipeline runs leaf-first: [`feed`] fetches each configured source,
//! [`page`] composes the results into [`model::PageState`], and [`render`]
//! projects that state into Bootstrap-compatible markup. [`interact`] applies
//! carousel navigation events to the same state.

pub mod config;
pub mod feed;
pub mod interact;
pub mod model;
pub mod page;
pub mod render;
pub mod util;
