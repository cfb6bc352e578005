//! Adapter module - tick transport over a TCP socket with a JSON protocol
//!
//! The game server (or the `tick-replay` tool) connects and streams
//! line-delimited JSON envelopes. The adapter decodes the envelope framing
//! and hands events to the synchronous render loop; it never interprets
//! payloads.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: feeder connects to the TCP socket (default `127.0.0.1:7878`)
//! 2. **Streaming**: feeder writes one envelope per line
//! 3. **Delivery**: envelopes from all feeders are merged, in arrival order,
//!    into one bounded channel
//! 4. **Rendering**: the render loop drains the channel and keeps only the
//!    newest `board_tick` (see [`runtime::skip_to_latest`])
//!
//! The protocol is one-way; nothing is written back to feeders.
//!
//! # Environment Variables
//!
//! - `ARENA_VIEW_HOST`: bind address (default: "127.0.0.1")
//! - `ARENA_VIEW_PORT`: port number (default: 7878, 0 for ephemeral)
//! - `ARENA_VIEW_MAX_PENDING`: channel capacity (default: 32)
//! - `ARENA_VIEW_RECORD`: append every received line to this file
//!
//! See [`config::ViewerConfig`] for the rendering-side variables.
//!
//! # Example Protocol Flow
//!
//! ```text
//! Feeder -> Viewer: {"event":"board_tick","payload":{"settings":{"width":800,"height":600},"players":[],"fruits":[]}}
//! Feeder -> Viewer: {"event":"board_tick","payload":{...}}
//! ```
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"event":"board_tick","payload":{"settings":{"width":400,"height":300},"players":[{"pid":"p1","name":"Ann","color":"#f00","pos_x":100,"pos_y":100,"size":40,"powered":1,"status":"normal","status_timer":0}],"fruits":[]}}
//! ```

pub mod config;
pub mod protocol;
pub mod runtime;
pub mod server;

pub use arena_view_types as types;

pub use config::{Backend, ConfigError, ViewerConfig};
pub use protocol::{decode_line, decode_line_or_snapshot, encode_line, Envelope, ProtocolError};
pub use runtime::{skip_to_latest, Transport, TransportClosed};
pub use server::{run_server, InboundEvent};
