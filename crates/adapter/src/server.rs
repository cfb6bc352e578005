//! TCP listener for tick feeds
//!
//! Accepts any number of feeder connections and funnels every decoded
//! envelope into one bounded channel, so the consumer sees a single ordered
//! stream regardless of how many feeders are connected.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::protocol::{decode_line, Envelope, ProtocolError};

/// Lines waiting for the recorder; beyond this, lines go unrecorded.
const RECORD_CAPACITY: usize = 1024;
/// Pause after a failed accept (e.g. out of file descriptors).
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// An envelope tagged with the connection it arrived on.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundEvent {
    pub client_id: usize,
    pub envelope: Envelope,
}

/// Bind, then accept feeders until the event receiver is dropped.
///
/// `ready_tx` receives the bound address (useful with port 0).
pub async fn run_server(
    config: ViewerConfig,
    event_tx: mpsc::Sender<InboundEvent>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind tick listener on {addr}"))?;
    let bound = listener.local_addr()?;
    info!(addr = %bound, "tick listener ready");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let record_tx = config.record_path.clone().map(spawn_recorder);
    let mut client_id_counter = 0usize;

    loop {
        let accepted = tokio::select! {
            accepted = listener.accept() => accepted,
            _ = event_tx.closed() => {
                info!("event consumer gone, stopping tick listener");
                return Ok(());
            }
        };
        let (socket, peer) = match accepted {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, addr = %peer, "feeder connected");

        let event_tx = event_tx.clone();
        let record_tx = record_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, client_id, event_tx, record_tx).await {
                warn!(client_id, error = %e, "feeder connection error");
            }
            info!(client_id, "feeder disconnected");
        });
    }
}

async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    event_tx: mpsc::Sender<InboundEvent>,
    record_tx: Option<mpsc::Sender<String>>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(socket).lines();

    while let Some(line) = lines.next_line().await? {
        if let Some(tx) = &record_tx {
            record(tx, client_id, &line);
        }
        match decode_line(&line) {
            Ok(envelope) => {
                let event = InboundEvent {
                    client_id,
                    envelope,
                };
                // Waiting here is the backpressure: a slow consumer slows
                // the feeder instead of growing the queue.
                if event_tx.send(event).await.is_err() {
                    return Ok(());
                }
            }
            Err(ProtocolError::Empty) => {}
            Err(e) => {
                warn!(client_id, error = %e, "dropping undecodable line");
            }
        }
    }
    Ok(())
}

/// Hand `line` to the recorder without waiting. A full or closed recorder
/// drops the line.
fn record(tx: &mpsc::Sender<String>, client_id: usize, line: &str) -> bool {
    match tx.try_send(line.to_owned()) {
        Ok(()) => true,
        Err(mpsc::error::TrySendError::Full(_)) => {
            debug!(client_id, "recorder behind, line not recorded");
            false
        }
        Err(mpsc::error::TrySendError::Closed(_)) => false,
    }
}

/// Append every received line to `path`, one per line.
fn spawn_recorder(path: PathBuf) -> mpsc::Sender<String> {
    let (tx, mut rx) = mpsc::channel::<String>(RECORD_CAPACITY);
    tokio::spawn(async move {
        use tokio::fs::OpenOptions;

        let mut file = match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
        {
            Ok(f) => f,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "tick recording disabled");
                return;
            }
        };
        debug!(path = %path.display(), "recording ticks");

        while let Some(mut line) = rx.recv().await {
            line.push('\n');
            if file.write_all(line.as_bytes()).await.is_err() {
                break;
            }
        }
        let _ = file.flush().await;
    });
    tx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_recorder_drops_lines_instead_of_queueing() {
        let (tx, mut rx) = mpsc::channel::<String>(2);
        assert!(record(&tx, 1, "a"));
        assert!(record(&tx, 1, "b"));
        assert!(!record(&tx, 1, "c"));

        assert_eq!(rx.try_recv().unwrap(), "a");
        assert!(record(&tx, 1, "d"));
        assert_eq!(rx.try_recv().unwrap(), "b");
        assert_eq!(rx.try_recv().unwrap(), "d");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_recorder_is_ignored() {
        let (tx, rx) = mpsc::channel::<String>(2);
        drop(rx);
        assert!(!record(&tx, 1, "a"));
    }

    #[tokio::test]
    async fn recorder_appends_one_line_per_entry() {
        let name = format!("arena-view-record-{}.jsonl", std::process::id());
        let path = std::env::temp_dir().join(name);
        let _ = std::fs::remove_file(&path);

        let tx = spawn_recorder(path.clone());
        assert!(record(&tx, 1, "{\"event\":\"a\"}"));
        assert!(record(&tx, 2, "{\"event\":\"b\"}"));
        drop(tx);

        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        let mut text = String::new();
        while tokio::time::Instant::now() < deadline {
            text = tokio::fs::read_to_string(&path).await.unwrap_or_default();
            if text.lines().count() == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let _ = std::fs::remove_file(&path);
        assert_eq!(text, "{\"event\":\"a\"}\n{\"event\":\"b\"}\n");
    }
}
