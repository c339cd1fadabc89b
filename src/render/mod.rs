//! Graph rendering through the external Graphviz `dot` tool
//!
//! Failures here are never fatal for the caller: the shell reports them as
//! warnings and carries on.

pub mod dot;

use crate::config::RenderConfig;
use crate::graph::GraphStore;
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use dot::to_dot;

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Graphviz executable '{0}' not found; install Graphviz and make sure it is on PATH")]
    ToolNotFound(String),

    #[error("Graphviz exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Writes DOT files and turns them into images
#[derive(Debug, Clone)]
pub struct GraphRenderer {
    config: RenderConfig,
}

impl GraphRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Path of the intermediate DOT file
    pub fn dot_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.dot", self.config.output.display()))
    }

    /// Path of the final image
    pub fn image_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.{}", self.config.output.display(), self.config.format))
    }

    /// Write the DOT source for `store` and return its path
    pub fn write_dot(&self, store: &GraphStore) -> RenderResult<PathBuf> {
        let path = self.dot_path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, to_dot(store, &self.config))?;
        debug!(path = %path.display(), "wrote dot source");
        Ok(path)
    }

    /// Render `store` to an image; the DOT file is removed on success
    ///
    /// Once the image exists, a failed cleanup is only logged.
    pub fn render(&self, store: &GraphStore) -> RenderResult<PathBuf> {
        let dot_path = self.write_dot(store)?;
        let image_path = self.image_path();

        let output = Command::new(&self.config.dot_binary)
            .arg(format!("-T{}", self.config.format))
            .arg("-o")
            .arg(&image_path)
            .arg(&dot_path)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    RenderError::ToolNotFound(self.config.dot_binary.clone())
                }
                _ => RenderError::Io(e),
            })?;

        if !output.status.success() {
            return Err(RenderError::ToolFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if let Err(e) = std::fs::remove_file(&dot_path) {
            warn!(path = %dot_path.display(), error = %e, "could not remove dot source");
        }
        info!(path = %image_path.display(), "rendered graph");
        Ok(image_path)
    }
}
