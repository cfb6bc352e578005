//! Protocol module - line-delimited JSON event envelopes
//!
//! Every line on the wire is one envelope:
//!
//! ```text
//! {"event":"board_tick","payload":{"settings":{...},"players":[...],"fruits":[...]}}
//! ```
//!
//! The payload is kept as raw JSON; decoding it into a snapshot is the
//! renderer boundary's job, so one bad payload costs one frame, not the
//! connection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Snapshot, BOARD_TICK};

/// One named event with its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default)]
    pub payload: Value,
}

impl Envelope {
    pub fn new(event: impl Into<String>, payload: Value) -> Self {
        Self {
            event: event.into(),
            payload,
        }
    }

    pub fn board_tick(snapshot: &Snapshot) -> Self {
        Self::new(BOARD_TICK, snapshot.to_value())
    }

    pub fn is_board_tick(&self) -> bool {
        self.event == BOARD_TICK
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("empty line")]
    Empty,

    #[error("invalid envelope: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse one wire line into an envelope.
pub fn decode_line(line: &str) -> Result<Envelope, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(line)?)
}

/// Encode an envelope as one wire line, including the trailing newline.
pub fn encode_line(envelope: &Envelope) -> Result<String, ProtocolError> {
    let mut line = serde_json::to_string(envelope)?;
    line.push('\n');
    Ok(line)
}

/// Parse a line that is either an envelope or a bare snapshot object.
///
/// Bare snapshots (objects without an `event` key) are wrapped as
/// `board_tick`. Used by the replay tool to accept recorded payloads.
pub fn decode_line_or_snapshot(line: &str) -> Result<Envelope, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }
    let value: Value = serde_json::from_str(line)?;
    if value.get("event").is_some() {
        return Ok(serde_json::from_value(value)?);
    }
    Ok(Envelope::new(BOARD_TICK, value))
}
