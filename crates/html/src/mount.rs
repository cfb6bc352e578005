use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::{Assets, Mount, MountError, Scene};
use crate::markup::{document, scene_markup};

/// Keeps a single HTML page on disk in sync with the latest scene.
///
/// Each write goes to a sibling temp file first and is renamed over the
/// target, which replaces the page in one step on the same filesystem.
#[derive(Debug)]
pub struct HtmlMount {
    path: PathBuf,
    stylesheet: Option<String>,
    writes: u64,
}

impl HtmlMount {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stylesheet: None,
            writes: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of pages written so far, including the initial layout.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    fn write_page(&mut self, body: &str) -> Result<(), MountError> {
        let page = document(self.stylesheet.as_deref(), body);
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, page.as_bytes())?;
        fs::rename(&tmp, &self.path)?;
        self.writes += 1;
        debug!(path = %self.path.display(), bytes = page.len(), "page written");
        Ok(())
    }
}

impl Mount for HtmlMount {
    fn install(&mut self, assets: &Assets) -> Result<(), MountError> {
        self.stylesheet = assets.stylesheet.clone();
        let layout = assets.layout.clone().unwrap_or_default();
        self.write_page(&layout)
    }

    fn replace(&mut self, scene: &Scene) -> Result<(), MountError> {
        self.write_page(&scene_markup(scene))
    }
}
