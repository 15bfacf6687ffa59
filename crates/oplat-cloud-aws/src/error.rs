//! AWS provider error types

use oplat_cloud::CloudError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("Stack {0} already exists")]
    AlreadyExists(String),

    #[error("No updates are to be performed")]
    NoChanges,

    #[error("Stack {0} not found")]
    StackNotFound(String),

    #[error("Secret not found: {0}")]
    SecretNotFound(String),

    #[error("Secret {0} has no string payload")]
    EmptySecret(String),

    #[error("Invalid ARN: {0}")]
    InvalidArn(String),

    #[error("CloudFormation API error: {0}")]
    CloudFormation(String),

    #[error("Secrets Manager API error: {0}")]
    SecretsManager(String),
}

impl From<AwsError> for CloudError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::AlreadyExists(stack) => CloudError::AlreadyExists(stack),
            AwsError::NoChanges => CloudError::NoChanges,
            AwsError::StackNotFound(stack) => CloudError::StackNotFound(stack),
            AwsError::SecretNotFound(secret) => CloudError::SecretNotFound(secret),
            AwsError::InvalidArn(arn) => CloudError::InvalidFormat(format!("invalid ARN: {arn}")),
            other => CloudError::ApiError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AwsError>;
