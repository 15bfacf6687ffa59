use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Manifest file not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Failed to parse manifest {}\nReason: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("IO error: {path}\nReason: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template already initialized in {}", .0.display())]
    TemplateAlreadyInitialized(PathBuf),

    #[error("Template '{template}' has no partial for resource kind '{kind}'")]
    TemplatePartialNotFound { template: String, kind: String },

    #[error("Invalid template pack: {0}")]
    InvalidTemplate(String),

    #[error("Template error: {file}\nReason: {message}")]
    TemplateError { file: String, message: String },

    #[error("Template render error: {0}")]
    TemplateRenderError(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
