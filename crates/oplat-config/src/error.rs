use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config file {}\nReason: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(
        "Cannot derive a stack name from '{0}'. A stack name needs at least one letter \
        and may contain only letters, digits and '-'. Set OPLAT_STACK_NAME or stack_name \
        in the config file"
    )]
    InvalidStackName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
