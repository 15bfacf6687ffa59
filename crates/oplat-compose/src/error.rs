//! Compose provider error types

use oplat_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Docker Compose is not installed. Please install Docker with the compose plugin")]
    ComposeNotInstalled,

    #[error("docker compose {command} failed: {message}")]
    CommandFailed { command: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<ComposeError> for CloudError {
    fn from(err: ComposeError) -> Self {
        match err {
            ComposeError::IoError(e) => CloudError::Io(e),
            other @ ComposeError::ComposeNotInstalled => {
                CloudError::BackendUnavailable(other.to_string())
            }
            other => CloudError::CommandFailed(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposeError>;
