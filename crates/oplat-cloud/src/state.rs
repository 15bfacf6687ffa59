//! Project-local state directory
//!
//! Backends that keep state on the local machine (the rendered compose
//! file) keep it under `<project>/.oplat/`.

use crate::error::{CloudError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

pub const DEFAULT_STATE_DIR: &str = ".oplat";

/// A project's state directory
#[derive(Debug, Clone)]
pub struct StateDir {
    path: PathBuf,
}

impl StateDir {
    /// `<project_root>/<dir_name>`
    pub fn new(project_root: impl AsRef<Path>, dir_name: impl AsRef<Path>) -> Self {
        Self {
            path: project_root.as_ref().join(dir_name),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_dir()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Create the directory on first use
    pub async fn ensure(&self) -> Result<&Path> {
        if !self.path.exists() {
            fs::create_dir_all(&self.path).await?;
            tracing::debug!(path = %self.path.display(), "Created state directory");
        }
        Ok(&self.path)
    }

    /// Read a file from the state directory; absence of the directory or
    /// the file is reported as `InfrastructureNotFound` with `hint` attached
    pub async fn read(&self, name: &str, hint: &str) -> Result<String> {
        let path = self.file(name);
        if !self.exists() || !path.is_file() {
            return Err(CloudError::InfrastructureNotFound(format!(
                "{} does not exist. {}",
                path.display(),
                hint
            )));
        }

        Ok(fs::read_to_string(&path).await?)
    }
}
