use serde_json::Value;
use tracing::{debug, warn};

use crate::core::{compose, Assets, Mount};
use crate::handle::{render, SceneHandle};
use crate::resources::{load_assets, Resources};
use crate::types::{Snapshot, BOARD_TICK};

/// Event names the boundary handles.
pub const SUBSCRIPTIONS: &[&str] = &[BOARD_TICK];

/// What happened to one delivered event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A scene was composed and handed to the mount. `generation` is the
    /// handle generation afterwards (unchanged if the publish failed).
    Rendered { generation: u64 },
    /// The payload was not a snapshot; the previous scene stays up.
    Skipped,
    /// Not an event this boundary subscribes to.
    Ignored,
}

/// Owns one mount and keeps it showing the newest snapshot.
pub struct Boundary<M: Mount> {
    mount: M,
    assets: Assets,
    current: SceneHandle,
}

impl<M: Mount> Boundary<M> {
    /// Load startup resources and install the initial layout.
    ///
    /// Neither step can fail the construction: problems are logged and the
    /// boundary renders unstyled.
    pub fn new<R: Resources + ?Sized>(mut mount: M, resources: &R) -> Self {
        let assets = load_assets(resources);
        if let Err(e) = mount.install(&assets) {
            warn!(error = %e, "initial mount failed");
        }
        Self {
            mount,
            assets,
            current: SceneHandle::empty(),
        }
    }

    pub fn subscribes_to(name: &str) -> bool {
        SUBSCRIPTIONS.contains(&name)
    }

    /// Handle one named event from the transport.
    pub fn handle_event(&mut self, name: &str, payload: &Value) -> Outcome {
        if !Self::subscribes_to(name) {
            debug!(event = name, "ignoring event");
            return Outcome::Ignored;
        }
        match Snapshot::from_value(payload) {
            Ok(snapshot) => Outcome::Rendered {
                generation: self.show(&snapshot),
            },
            Err(e) => {
                warn!(event = name, error = %e, "malformed snapshot skipped");
                Outcome::Skipped
            }
        }
    }

    /// Compose `snapshot` and replace the mount's content with it.
    pub fn show(&mut self, snapshot: &Snapshot) -> u64 {
        debug!(
            players = snapshot.players.len(),
            fruits = snapshot.fruits.len(),
            "composing snapshot"
        );
        let next = compose(snapshot);
        let previous = std::mem::take(&mut self.current);
        self.current = render(&mut self.mount, previous, next);
        self.current.generation()
    }

    pub fn current(&self) -> &SceneHandle {
        &self.current
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn mount(&self) -> &M {
        &self.mount
    }

    pub fn mount_mut(&mut self) -> &mut M {
        &mut self.mount
    }

    pub fn into_mount(self) -> M {
        self.mount
    }
}
