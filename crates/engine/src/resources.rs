//! Startup resources: one stylesheet import and one layout fetch.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::Assets;

pub const STYLESHEET: &str = "main.css";
pub const LAYOUT: &str = "main.html";

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

pub trait Resources {
    fn import_stylesheet(&self, name: &str) -> Result<String, ResourceError>;

    fn fetch(&self, name: &str) -> Result<String, ResourceError>;
}

/// Resources read from a directory.
#[derive(Debug, Clone)]
pub struct FsResources {
    root: PathBuf,
}

impl FsResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, name: &str) -> Result<String, ResourceError> {
        let path = self.root.join(name);
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ResourceError::NotFound(path.display().to_string())
            } else {
                ResourceError::Io {
                    name: path.display().to_string(),
                    source,
                }
            }
        })
    }
}

impl Resources for FsResources {
    fn import_stylesheet(&self, name: &str) -> Result<String, ResourceError> {
        self.read(name)
    }

    fn fetch(&self, name: &str) -> Result<String, ResourceError> {
        self.read(name)
    }
}

/// Resources held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct InlineResources {
    files: BTreeMap<String, String>,
}

impl InlineResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, body: &str) -> Self {
        self.files.insert(name.to_string(), body.to_string());
        self
    }

    fn get(&self, name: &str) -> Result<String, ResourceError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))
    }
}

impl Resources for InlineResources {
    fn import_stylesheet(&self, name: &str) -> Result<String, ResourceError> {
        self.get(name)
    }

    fn fetch(&self, name: &str) -> Result<String, ResourceError> {
        self.get(name)
    }
}

/// Load both startup resources. Failures are logged and leave that part
/// empty; they never abort startup.
pub fn load_assets<R: Resources + ?Sized>(resources: &R) -> Assets {
    let stylesheet = resources
        .import_stylesheet(STYLESHEET)
        .inspect_err(|e| {
            warn!(resource = STYLESHEET, error = %e, "stylesheet import failed, unstyled");
        })
        .ok();
    let layout = resources
        .fetch(LAYOUT)
        .inspect_err(|e| {
            warn!(resource = LAYOUT, error = %e, "layout fetch failed, mounting empty");
        })
        .ok();

    let assets = Assets { stylesheet, layout };
    if !assets.is_degraded() {
        info!("startup resources loaded");
    }
    assets
}
