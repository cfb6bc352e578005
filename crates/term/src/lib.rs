//! Terminal back end.
//!
//! Scenes are rasterised into a simple framebuffer and flushed to the
//! terminal as whole frames. There is no ratatui widget layer; the
//! framebuffer gives precise control over the cell aspect ratio so round
//! entities stay round.
//!
//! - [`scene_view`] is pure and unit-tested
//! - [`renderer`] owns the terminal and the escape-sequence encoding
//! - [`mount`] plugs both into the render boundary

pub mod fb;
pub mod mount;
pub mod renderer;
pub mod scene_view;

pub use arena_view_core as core;
pub use arena_view_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use mount::{markup_text, TerminalMount};
pub use renderer::{encode_full_into, TerminalRenderer};
pub use scene_view::{Projection, SceneView, Viewport};
