use tracing::{debug, error};

use crate::core::{Mount, Scene};

/// The scene currently shown on a mount.
///
/// Produced only by [`render`]; the generation increases by one for every
/// successful publish.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneHandle {
    generation: u64,
    scene: Option<Scene>,
}

impl SceneHandle {
    /// Handle for a mount that has not shown any scene yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }
}

/// Publish `next` on `mount`, superseding `previous`.
///
/// On a publish failure the error is logged and `previous` is returned
/// unchanged, since the mount still shows it.
pub fn render<M: Mount + ?Sized>(mount: &mut M, previous: SceneHandle, next: Scene) -> SceneHandle {
    match mount.replace(&next) {
        Ok(()) => {
            let generation = previous.generation.wrapping_add(1);
            debug!(
                generation,
                elements = next.elements.len(),
                "scene published"
            );
            SceneHandle {
                generation,
                scene: Some(next),
            }
        }
        Err(e) => {
            error!(generation = previous.generation, error = %e, "scene publish failed");
            previous
        }
    }
}
