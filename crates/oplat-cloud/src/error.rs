//! Provider error types

use thiserror::Error;

/// Errors surfaced through the provider contract
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Stack {0} not found")]
    StackNotFound(String),

    #[error("Resource {0} not found")]
    ResourceKindNotFound(String),

    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    #[error("Output not found: {0}")]
    OutputNotFound(String),

    #[error("Infrastructure not found: {0}")]
    InfrastructureNotFound(String),

    #[error("Stack {0} already exists")]
    AlreadyExists(String),

    #[error("No updates are to be performed")]
    NoChanges,

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Core(#[from] oplat_core::CoreError),
}

impl CloudError {
    /// True for every "something named is absent" condition
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CloudError::ProviderNotFound(_)
                | CloudError::StackNotFound(_)
                | CloudError::ResourceKindNotFound(_)
                | CloudError::SecretNotFound(_)
                | CloudError::OutputNotFound(_)
                | CloudError::InfrastructureNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
