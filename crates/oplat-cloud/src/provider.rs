//! Infrastructure provider trait definition

use crate::error::Result;
use crate::resource::{ResourceDefinition, ResourceOutputValue};
use async_trait::async_trait;
use oplat_core::Manifest;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Infrastructure provider abstraction trait
///
/// Every backend (CloudFormation stacks, local docker compose) implements
/// this trait so the CLI can drive them through the same lifecycle. A
/// provider is bound to exactly one stack name for its whole lifetime.
#[async_trait]
pub trait InfrastructureProvider: Send + Sync {
    /// Returns the provider name (e.g., "aws-cloudformation", "docker-compose")
    fn name(&self) -> &str;

    /// The stack every operation of this provider targets
    fn stack_name(&self) -> &str;

    /// Render `resources` into one descriptor and apply it.
    ///
    /// Calling this twice with the same manifests converges to the same
    /// backend state instead of failing.
    async fn create_infrastructure(&self, resources: &[Manifest]) -> Result<()>;

    /// Remove the bound stack's resources
    async fn destroy_infrastructure(&self) -> Result<()>;

    /// Map the backend-native state to [`InfrastructureStatus`]
    async fn get_infrastructure_status(&self) -> Result<InfrastructureStatus>;

    /// The resource kinds this provider can provision
    fn list_available_resources(&self) -> Vec<ResourceDefinition>;

    /// Raw backend key/value data that resources resolve their outputs from
    async fn get_stack_output(&self) -> Result<HashMap<String, String>>;

    /// Resolve every output of the catalog entry matching `manifest.kind`
    async fn get_resource_outputs(&self, manifest: &Manifest) -> Result<Vec<ResourceOutputValue>>;
}

/// Infrastructure status, derived from backend state on every query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfrastructureStatus {
    Creating,
    Running,
    Stopped,
    Unknown,
}

impl InfrastructureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfrastructureStatus::Creating => "creating",
            InfrastructureStatus::Running => "running",
            InfrastructureStatus::Stopped => "stopped",
            InfrastructureStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for InfrastructureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
