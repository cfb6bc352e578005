//! Arena viewer (workspace facade crate).
//!
//! Re-exports the crates under `crates/` so binaries, tests and benches can
//! use a single `arena_view::{adapter, core, engine, html, term, types}` path.

pub use arena_view_adapter as adapter;
pub use arena_view_core as core;
pub use arena_view_engine as engine;
pub use arena_view_html as html;
pub use arena_view_term as term;
pub use arena_view_types as types;
