//! In-process mounts: an in-memory surface and a JSON-lines writer.

use std::io::Write;

use crate::core::{Assets, Mount, MountError, Scene};

/// Keeps the last published scene. Used by tests and embedders that read
/// the scene back instead of drawing it.
#[derive(Debug, Default)]
pub struct MemoryMount {
    assets: Option<Assets>,
    current: Option<Scene>,
    publishes: u64,
}

impl MemoryMount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assets(&self) -> Option<&Assets> {
        self.assets.as_ref()
    }

    pub fn current(&self) -> Option<&Scene> {
        self.current.as_ref()
    }

    pub fn publishes(&self) -> u64 {
        self.publishes
    }
}

impl Mount for MemoryMount {
    fn install(&mut self, assets: &Assets) -> Result<(), MountError> {
        self.assets = Some(assets.clone());
        self.current = None;
        Ok(())
    }

    fn replace(&mut self, scene: &Scene) -> Result<(), MountError> {
        self.current = Some(scene.clone());
        self.publishes += 1;
        Ok(())
    }
}

/// Writes each scene as one JSON line.
///
/// The line is serialized into a scratch buffer first and handed to the
/// writer in a single `write_all`, so consumers never see half a scene.
pub struct JsonMount<W: Write> {
    out: W,
    buf: Vec<u8>,
}

impl<W: Write> JsonMount<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Mount for JsonMount<W> {
    fn install(&mut self, _assets: &Assets) -> Result<(), MountError> {
        Ok(())
    }

    fn replace(&mut self, scene: &Scene) -> Result<(), MountError> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, scene)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}
