//! Resource catalog
//!
//! A catalog entry knows the output schema of one resource kind and how to
//! resolve its values against the provider that owns it. Entries are typed
//! by their provider: a provider only registers entries built for it.

use crate::error::{CloudError, Result};
use async_trait::async_trait;
use oplat_core::Manifest;
use serde::{Deserialize, Serialize};

/// One declared output of a resource kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub key: String,
    pub description: String,
}

impl OutputSpec {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }

    pub fn with_value(&self, value: impl Into<String>) -> ResourceOutputValue {
        ResourceOutputValue {
            key: self.key.clone(),
            description: self.description.clone(),
            value: value.into(),
        }
    }
}

/// A resolved output value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOutputValue {
    pub key: String,
    pub description: String,
    pub value: String,
}

/// Static description of a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub kind: String,
    pub description: String,
    pub outputs: Vec<OutputSpec>,
}

/// A resource kind provisionable by provider `P`
#[async_trait]
pub trait Resource<P: ?Sized + Sync>: Send + Sync {
    fn definition(&self) -> &ResourceDefinition;

    fn kind(&self) -> &str {
        &self.definition().kind
    }

    fn outputs(&self) -> &[OutputSpec] {
        &self.definition().outputs
    }

    /// Resolve every declared output for `manifest`, in declared order
    async fn get_output_values(
        &self,
        provider: &P,
        manifest: &Manifest,
    ) -> Result<Vec<ResourceOutputValue>>;
}

/// The resource kinds registered with one provider instance
pub struct ResourceCatalog<P: ?Sized + Sync> {
    entries: Vec<Box<dyn Resource<P>>>,
}

impl<P: ?Sized + Sync> ResourceCatalog<P> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, resource: impl Resource<P> + 'static) -> Self {
        self.entries.push(Box::new(resource));
        self
    }

    pub fn find(&self, kind: &str) -> Option<&dyn Resource<P>> {
        self.entries
            .iter()
            .find(|r| r.kind() == kind)
            .map(|r| r.as_ref())
    }

    pub fn definitions(&self) -> Vec<ResourceDefinition> {
        self.entries.iter().map(|r| r.definition().clone()).collect()
    }
}

impl<P: ?Sized + Sync> Default for ResourceCatalog<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Providers that own a resource catalog
pub trait ResourceRegistry: Sync {
    fn catalog(&self) -> &ResourceCatalog<Self>;
}

/// Find the catalog entry for `manifest.kind` and let it resolve the outputs.
///
/// Shared by every provider's `get_resource_outputs`.
pub async fn get_resource_outputs<P: ResourceRegistry>(
    provider: &P,
    manifest: &Manifest,
) -> Result<Vec<ResourceOutputValue>> {
    let resource = provider
        .catalog()
        .find(&manifest.kind)
        .ok_or_else(|| CloudError::ResourceKindNotFound(manifest.kind.clone()))?;

    tracing::debug!(
        kind = %manifest.kind,
        name = %manifest.name(),
        "Resolving resource outputs"
    );

    resource.get_output_values(provider, manifest).await
}
