//! HTML back end.
//!
//! [`markup`] turns a [`Scene`](arena_view_core::Scene) into an absolutely
//! positioned HTML fragment. [`HtmlMount`] keeps one document on disk and
//! swaps it atomically on every publish, so a browser pointed at the file
//! never reads half a scene.

pub mod markup;
pub mod mount;

pub use arena_view_core as core;
pub use arena_view_types as types;

pub use markup::{document, escape, scene_markup};
pub use mount::HtmlMount;
