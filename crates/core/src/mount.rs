//! Display surface interface.
//!
//! A [`Mount`] is the single container a renderer owns. Implementations must
//! publish a scene as one unit: a reader of the surface sees either the whole
//! previous scene or the whole new one, never a mix.

use std::io;

use crate::scene::Scene;

/// Resources loaded once at startup.
///
/// Either part may be missing when loading failed; mounts then render
/// unstyled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assets {
    /// Stylesheet text (`main.css`).
    pub stylesheet: Option<String>,
    /// Initial layout shown before the first scene (`main.html`).
    pub layout: Option<String>,
}

impl Assets {
    pub fn is_degraded(&self) -> bool {
        self.stylesheet.is_none() || self.layout.is_none()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("mount i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("scene serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("mount unavailable: {0}")]
    Unavailable(String),
}

pub trait Mount {
    /// One-time setup: show the initial layout.
    fn install(&mut self, assets: &Assets) -> Result<(), MountError>;

    /// Replace everything on the surface with `scene`.
    fn replace(&mut self, scene: &Scene) -> Result<(), MountError>;
}

impl<M: Mount + ?Sized> Mount for Box<M> {
    fn install(&mut self, assets: &Assets) -> Result<(), MountError> {
        (**self).install(assets)
    }

    fn replace(&mut self, scene: &Scene) -> Result<(), MountError> {
        (**self).replace(scene)
    }
}
