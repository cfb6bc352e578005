//! Transport runtime integration.
//!
//! Bridges the synchronous render loop with the async tick listener.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

use crate::config::ViewerConfig;
use crate::server::{run_server, InboundEvent};

const READY_TIMEOUT: Duration = Duration::from_secs(5);

/// Every sender is gone; no further events will arrive.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
#[error("tick listener stopped")]
pub struct TransportClosed;

/// Running transport instance.
pub struct Transport {
    rt: Runtime,
    event_rx: mpsc::Receiver<InboundEvent>,
    local_addr: SocketAddr,
}

impl Transport {
    /// Start the listener on a background runtime and wait until it is bound.
    pub fn start(config: ViewerConfig) -> anyhow::Result<Self> {
        let capacity = config.max_pending.max(1);
        let (event_tx, event_rx) = mpsc::channel::<InboundEvent>(capacity);
        let (ready_tx, ready_rx) = oneshot::channel();

        let rt = Runtime::new().context("failed to create tokio runtime")?;
        rt.spawn(async move {
            if let Err(e) = run_server(config, event_tx, Some(ready_tx)).await {
                error!(error = %e, "tick listener stopped");
            }
        });

        let local_addr = rt
            .block_on(async { tokio::time::timeout(READY_TIMEOUT, ready_rx).await })
            .context("tick listener did not become ready")?
            .context("tick listener failed to start")?;

        Ok(Self {
            rt,
            event_rx,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn try_recv(&mut self) -> Option<InboundEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Block up to `timeout` for the next event. `Ok(None)` means the wait
    /// timed out.
    pub fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<InboundEvent>, TransportClosed> {
        let rx = &mut self.event_rx;
        match self.rt.block_on(async { tokio::time::timeout(timeout, rx.recv()).await }) {
            Ok(Some(event)) => Ok(Some(event)),
            Ok(None) => Err(TransportClosed),
            Err(_elapsed) => Ok(None),
        }
    }

    /// Take everything queued right now, keeping only the newest board tick.
    pub fn drain(&mut self) -> Vec<InboundEvent> {
        let mut pending = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            pending.push(event);
        }
        skip_to_latest(pending)
    }

    /// Wait up to `timeout` for at least one event, then take everything
    /// else already queued. Superseded ticks are dropped.
    pub fn next_batch(&mut self, timeout: Duration) -> Result<Vec<InboundEvent>, TransportClosed> {
        let Some(first) = self.recv_timeout(timeout)? else {
            return Ok(Vec::new());
        };
        let mut pending = vec![first];
        while let Ok(event) = self.event_rx.try_recv() {
            pending.push(event);
        }
        Ok(skip_to_latest(pending))
    }
}

/// Drop every `board_tick` except the last one; other events keep their
/// relative order.
///
/// Each tick is a complete snapshot, so only the newest one matters for
/// what ends up on screen.
pub fn skip_to_latest(events: Vec<InboundEvent>) -> Vec<InboundEvent> {
    let Some(last_tick) = events.iter().rposition(|e| e.envelope.is_board_tick()) else {
        return events;
    };
    let before = events.len();
    let kept: Vec<InboundEvent> = events
        .into_iter()
        .enumerate()
        .filter(|(i, e)| *i == last_tick || !e.envelope.is_board_tick())
        .map(|(_, e)| e)
        .collect();
    if kept.len() < before {
        debug!(dropped = before - kept.len(), "skipped superseded ticks");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Envelope;
    use serde_json::json;

    fn event(name: &str, n: u64) -> InboundEvent {
        InboundEvent {
            client_id: 1,
            envelope: Envelope::new(name, json!(n)),
        }
    }

    #[test]
    fn keeps_only_newest_tick() {
        let events = vec![
            event("board_tick", 1),
            event("chat", 2),
            event("board_tick", 3),
            event("board_tick", 4),
            event("chat", 5),
        ];
        let kept: Vec<(String, u64)> = skip_to_latest(events)
            .into_iter()
            .map(|e| (e.envelope.event, e.envelope.payload.as_u64().unwrap()))
            .collect();
        assert_eq!(
            kept,
            vec![
                ("chat".to_string(), 2),
                ("board_tick".to_string(), 4),
                ("chat".to_string(), 5)
            ]
        );
    }

    fn detached(event_rx: mpsc::Receiver<InboundEvent>) -> Transport {
        Transport {
            rt: Runtime::new().unwrap(),
            event_rx,
            local_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }

    #[test]
    fn next_batch_reports_closed_once_senders_are_gone() {
        let (tx, rx) = mpsc::channel(4);
        let mut transport = detached(rx);

        tx.try_send(event("board_tick", 1)).unwrap();
        tx.try_send(event("board_tick", 2)).unwrap();
        drop(tx);

        // Queued events are still delivered before the close is reported.
        let batch = transport.next_batch(Duration::from_millis(10)).unwrap();
        assert_eq!(batch, vec![event("board_tick", 2)]);
        assert_eq!(
            transport.next_batch(Duration::from_millis(10)),
            Err(TransportClosed)
        );
    }

    #[test]
    fn quiet_open_channel_times_out_empty() {
        let (_tx, rx) = mpsc::channel(4);
        let mut transport = detached(rx);
        assert_eq!(transport.recv_timeout(Duration::from_millis(10)), Ok(None));
        assert_eq!(transport.next_batch(Duration::from_millis(10)), Ok(Vec::new()));
    }

    #[test]
    fn no_ticks_is_a_no_op() {
        let events = vec![event("chat", 1), event("chat", 2)];
        assert_eq!(skip_to_latest(events.clone()), events);
        assert!(skip_to_latest(Vec::new()).is_empty());
    }
}
