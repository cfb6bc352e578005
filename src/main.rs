//! Arena viewer (default binary).
//!
//! Listens for `board_tick` envelopes and renders every snapshot into the
//! configured back end. The terminal back end uses a custom
//! framebuffer-based renderer (no ratatui widgets/layout).

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use arena_view::adapter::{Backend, Transport, ViewerConfig};
use arena_view::core::Mount;
use arena_view::engine::{Boundary, FsResources, JsonMount, Outcome};
use arena_view::html::HtmlMount;
use arena_view::term::{TerminalMount, TerminalRenderer};

fn main() -> Result<()> {
    let config = ViewerConfig::from_env()?;
    init_tracing(config.backend);

    info!(
        host = %config.host,
        port = config.port,
        backend = ?config.backend,
        assets = %config.assets_dir.display(),
        "configuration loaded"
    );

    let mut transport = Transport::start(config.clone())?;
    info!(addr = %transport.local_addr(), "listening for ticks");

    let resources = FsResources::new(&config.assets_dir);
    match config.backend {
        Backend::Term => run_terminal(&config, &mut transport, &resources),
        Backend::Html => {
            let mut boundary = Boundary::new(HtmlMount::new(&config.html_out), &resources);
            info!(path = %config.html_out.display(), "writing pages");
            loop {
                pump(&mut boundary, &mut transport, config.frame_interval)?;
            }
        }
        Backend::Json => {
            let mut boundary = Boundary::new(JsonMount::new(io::stdout()), &resources);
            loop {
                pump(&mut boundary, &mut transport, config.frame_interval)?;
            }
        }
    }
}

/// Logs go to stderr. The terminal back end owns the screen, so it stays
/// silent unless `RUST_LOG` asks otherwise (redirect stderr to a file).
fn init_tracing(backend: Backend) {
    let fallback = match backend {
        Backend::Term => "off",
        Backend::Html | Backend::Json => "info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

/// Deliver whatever arrived within `wait` to the boundary. Fails once the
/// tick listener has stopped.
fn pump<M: Mount>(
    boundary: &mut Boundary<M>,
    transport: &mut Transport,
    wait: Duration,
) -> Result<()> {
    for inbound in transport.next_batch(wait)? {
        let envelope = &inbound.envelope;
        if let Outcome::Skipped = boundary.handle_event(&envelope.event, &envelope.payload) {
            warn!(client = inbound.client_id, "tick skipped");
        }
    }
    Ok(())
}

fn run_terminal(
    config: &ViewerConfig,
    transport: &mut Transport,
    resources: &FsResources,
) -> Result<()> {
    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;

    let mut boundary = Boundary::new(TerminalMount::new(renderer), resources);
    let result = terminal_loop(config, transport, &mut boundary);

    // Always try to restore terminal state.
    let _ = boundary.mount_mut().renderer_mut().exit();
    result
}

fn terminal_loop(
    config: &ViewerConfig,
    transport: &mut Transport,
    boundary: &mut Boundary<TerminalMount>,
) -> Result<()> {
    loop {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press && should_quit(key) => {
                    return Ok(());
                }
                Event::Resize(..) => {
                    if let Err(e) = boundary.mount_mut().redraw() {
                        warn!(error = %e, "redraw after resize failed");
                    }
                }
                _ => {}
            }
        }

        pump(boundary, transport, config.frame_interval)?;
    }
}

fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
