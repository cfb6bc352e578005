//! Renderer boundary.
//!
//! Sits between the event source and a display surface:
//!
//! ```text
//! board_tick payload -> Snapshot -> compose() -> render(previous, next) -> Mount
//! ```
//!
//! The boundary owns its [`Mount`](arena_view_core::Mount) by value, so there
//! is exactly one writer per surface. Every render is a full replacement; no
//! state other than the current [`SceneHandle`] survives from one snapshot to
//! the next.

pub mod boundary;
pub mod handle;
pub mod mounts;
pub mod resources;

pub use arena_view_core as core;
pub use arena_view_types as types;

pub use boundary::{Boundary, Outcome};
pub use handle::{render, SceneHandle};
pub use mounts::{JsonMount, MemoryMount};
pub use resources::{load_assets, FsResources, InlineResources, ResourceError, Resources};
