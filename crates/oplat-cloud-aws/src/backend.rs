//! Stack backend seam
//!
//! The provider talks to CloudFormation and Secrets Manager only through
//! [`StackBackend`]. Implementations classify the two recoverable
//! create-or-update conditions into [`AwsError::AlreadyExists`] and
//! [`AwsError::NoChanges`], and report a missing stack as `Ok(None)` from
//! `describe_stack`.
//!
//! [`AwsError::AlreadyExists`]: crate::error::AwsError::AlreadyExists
//! [`AwsError::NoChanges`]: crate::error::AwsError::NoChanges

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// The parts of a described stack the provider reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackDescription {
    /// Backend-native status, e.g. `CREATE_COMPLETE`
    pub status: String,
    pub outputs: HashMap<String, String>,
}

#[async_trait]
pub trait StackBackend: Send + Sync {
    async fn create_stack(&self, stack_name: &str, template_body: &str) -> Result<()>;

    async fn update_stack(&self, stack_name: &str, template_body: &str) -> Result<()>;

    async fn delete_stack(&self, stack_name: &str) -> Result<()>;

    async fn describe_stack(&self, stack_name: &str) -> Result<Option<StackDescription>>;

    /// String payload of the secret identified by `secret_id` (name or ARN)
    async fn get_secret_value(&self, secret_id: &str) -> Result<String>;
}
