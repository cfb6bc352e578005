//! Replays a recorded tick file into a running viewer.
//!
//! Usage: `tick-replay <file> [addr] [interval_ms]`
//!
//! Each non-empty line of `<file>` is either a full envelope or a bare
//! snapshot object (wrapped as `board_tick`). Files written through
//! `ARENA_VIEW_RECORD` replay as-is.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use arena_view::adapter::{decode_line_or_snapshot, encode_line};

const DEFAULT_ADDR: &str = "127.0.0.1:7878";
const DEFAULT_INTERVAL_MS: u64 = 33;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: tick-replay <file> [addr] [interval_ms]");
    };
    let addr = args.next().unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let interval = match args.next() {
        Some(ms) => ms
            .parse::<u64>()
            .with_context(|| format!("invalid interval {ms:?}"))?,
        None => DEFAULT_INTERVAL_MS,
    };

    let text = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {path}"))?;

    let mut lines = Vec::new();
    for (n, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode_line_or_snapshot(line).and_then(|e| encode_line(&e)) {
            Ok(encoded) => lines.push(encoded),
            Err(e) => warn!(line = n + 1, error = %e, "skipping undecodable line"),
        }
    }
    if lines.is_empty() {
        bail!("{path}: nothing to replay");
    }

    let mut stream = TcpStream::connect(addr.as_str())
        .await
        .with_context(|| format!("failed to connect to {addr}"))?;
    info!(addr = %addr, ticks = lines.len(), interval_ms = interval, "replaying");

    let mut ticker = tokio::time::interval(Duration::from_millis(interval.max(1)));
    for line in &lines {
        ticker.tick().await;
        stream.write_all(line.as_bytes()).await?;
    }
    stream.flush().await?;
    info!("replay finished");
    Ok(())
}
