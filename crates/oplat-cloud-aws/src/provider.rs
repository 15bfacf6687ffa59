//! CloudFormation provider implementation

use crate::backend::StackBackend;
use crate::error::AwsError;
use crate::resources::PostgresResource;
use crate::sdk::AwsSdkBackend;
use async_trait::async_trait;
use oplat_cloud::{
    CloudError, InfrastructureProvider, InfrastructureStatus, ResourceCatalog, ResourceDefinition,
    ResourceOutputValue, ResourceRegistry, Result, get_resource_outputs,
};
use oplat_core::{BuiltinTemplate, Manifest, Scaffolder, TemplateSource};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{error, info, warn};

pub const PROVIDER_NAME: &str = "aws-cloudformation";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Outcome of a create-or-update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackChange {
    Created,
    Updated,
    Unchanged,
}

/// Map a CloudFormation stack status onto the four-way status
pub fn status_from_stack_status(status: &str) -> InfrastructureStatus {
    match status {
        "" => InfrastructureStatus::Unknown,
        "CREATE_IN_PROGRESS" | "UPDATE_IN_PROGRESS" | "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS" => {
            InfrastructureStatus::Creating
        }
        "CREATE_COMPLETE" | "UPDATE_COMPLETE" => InfrastructureStatus::Running,
        _ => InfrastructureStatus::Stopped,
    }
}

/// Provisions manifests as one CloudFormation stack
pub struct AwsCloudFormationProvider {
    stack_name: String,
    region: String,
    backend: Box<dyn StackBackend>,
    scaffolder: Scaffolder,
    catalog: ResourceCatalog<AwsCloudFormationProvider>,
}

impl AwsCloudFormationProvider {
    /// Connect to `region` with the default AWS credential chain.
    ///
    /// `template_dir` overrides the built-in CloudFormation template pack.
    pub async fn new(
        stack_name: impl Into<String>,
        region: impl Into<String>,
        template_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let region = region.into();
        let backend = AwsSdkBackend::load(&region).await;
        let template = TemplateSource::or_builtin(template_dir, BuiltinTemplate::AwsCloudFormation);

        Self::with_backend(stack_name, region, &template, Box::new(backend))
    }

    pub fn with_backend(
        stack_name: impl Into<String>,
        region: impl Into<String>,
        template: &TemplateSource,
        backend: Box<dyn StackBackend>,
    ) -> Result<Self> {
        Ok(Self {
            stack_name: stack_name.into(),
            region: region.into(),
            backend,
            scaffolder: Scaffolder::from_source(template)?,
            catalog: ResourceCatalog::new().with(PostgresResource::new()),
        })
    }

    /// Render `resources` into a CloudFormation template body
    pub fn render_template(&self, resources: &[Manifest]) -> Result<String> {
        let dir = tempfile::tempdir()?;
        self.scaffolder.init(dir.path())?;

        for manifest in resources {
            self.scaffolder
                .run_partial(&manifest.kind, manifest, dir.path())?;
        }

        Ok(std::fs::read_to_string(
            self.scaffolder.descriptor_path(dir.path()),
        )?)
    }

    /// Create the stack, falling back to an update when it already exists.
    /// An update without changes is a success.
    pub async fn create_or_update_stack(&self, template_body: &str) -> Result<StackChange> {
        match self
            .backend
            .create_stack(&self.stack_name, template_body)
            .await
        {
            Ok(()) => {
                info!(stack = %self.stack_name, region = %self.region, "Creating resource...");
                return Ok(StackChange::Created);
            }
            Err(AwsError::AlreadyExists(_)) => {}
            Err(e) => {
                error!(stack = %self.stack_name, "Failed to create or update stack: {}", e);
                return Err(e.into());
            }
        }

        match self
            .backend
            .update_stack(&self.stack_name, template_body)
            .await
        {
            Ok(()) => {
                info!(stack = %self.stack_name, region = %self.region, "Updating resource...");
                Ok(StackChange::Updated)
            }
            Err(AwsError::NoChanges) => {
                info!(stack = %self.stack_name, "No updates are to be performed");
                Ok(StackChange::Unchanged)
            }
            Err(e) => {
                error!(stack = %self.stack_name, "Failed to create or update stack: {}", e);
                Err(e.into())
            }
        }
    }

    /// Payload of a Secrets Manager secret
    pub async fn get_secret_value(&self, secret_id: &str) -> Result<String> {
        self.backend
            .get_secret_value(secret_id)
            .await
            .map_err(|e| {
                error!(secret = %secret_id, "Error getting secret value: {}", e);
                CloudError::from(e)
            })
    }
}

impl ResourceRegistry for AwsCloudFormationProvider {
    fn catalog(&self) -> &ResourceCatalog<Self> {
        &self.catalog
    }
}

#[async_trait]
impl InfrastructureProvider for AwsCloudFormationProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn stack_name(&self) -> &str {
        &self.stack_name
    }

    async fn create_infrastructure(&self, resources: &[Manifest]) -> Result<()> {
        let template_body = self.render_template(resources)?;
        self.create_or_update_stack(&template_body).await?;
        Ok(())
    }

    async fn destroy_infrastructure(&self) -> Result<()> {
        let existing = self.backend.describe_stack(&self.stack_name).await?;
        if existing.is_none() {
            warn!(stack = %self.stack_name, "Stack does not exist, nothing to delete");
            return Ok(());
        }

        match self.backend.delete_stack(&self.stack_name).await {
            Ok(()) => {
                info!(stack = %self.stack_name, region = %self.region, "Deleting resource...");
                Ok(())
            }
            Err(e) => {
                error!(stack = %self.stack_name, "Failed to delete stack: {}", e);
                Err(e.into())
            }
        }
    }

    async fn get_infrastructure_status(&self) -> Result<InfrastructureStatus> {
        let stack = self
            .backend
            .describe_stack(&self.stack_name)
            .await?
            .ok_or_else(|| CloudError::StackNotFound(self.stack_name.clone()))?;

        Ok(status_from_stack_status(&stack.status))
    }

    fn list_available_resources(&self) -> Vec<ResourceDefinition> {
        self.catalog.definitions()
    }

    async fn get_stack_output(&self) -> Result<HashMap<String, String>> {
        let stack = self
            .backend
            .describe_stack(&self.stack_name)
            .await?
            .ok_or_else(|| CloudError::StackNotFound(self.stack_name.clone()))?;

        Ok(stack.outputs)
    }

    async fn get_resource_outputs(&self, manifest: &Manifest) -> Result<Vec<ResourceOutputValue>> {
        get_resource_outputs(self, manifest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStackBackend;

    fn postgres(name: &str) -> Manifest {
        Manifest::new("oplat/v1", "Postgres", name)
    }

    fn provider(backend: FakeStackBackend) -> AwsCloudFormationProvider {
        AwsCloudFormationProvider::with_backend(
            "shop",
            DEFAULT_REGION,
            &TemplateSource::Builtin(BuiltinTemplate::AwsCloudFormation),
            Box::new(backend),
        )
        .unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_from_stack_status("CREATE_IN_PROGRESS"),
            InfrastructureStatus::Creating
        );
        assert_eq!(
            status_from_stack_status("UPDATE_IN_PROGRESS"),
            InfrastructureStatus::Creating
        );
        assert_eq!(
            status_from_stack_status("CREATE_COMPLETE"),
            InfrastructureStatus::Running
        );
        assert_eq!(
            status_from_stack_status("UPDATE_COMPLETE"),
            InfrastructureStatus::Running
        );
        assert_eq!(
            status_from_stack_status("ROLLBACK_COMPLETE"),
            InfrastructureStatus::Stopped
        );
        assert_eq!(
            status_from_stack_status("DELETE_IN_PROGRESS"),
            InfrastructureStatus::Stopped
        );
    }

    #[test]
    fn test_render_template_contains_postgres_resources() {
        let provider = provider(FakeStackBackend::new());
        let body = provider.render_template(&[postgres("mydb")]).unwrap();

        assert!(body.contains("mydbSecret"));
        assert!(body.contains("mydbInstance"));
        assert!(body.contains("AWS::RDS::DBInstance"));
    }

    #[tokio::test]
    async fn test_create_twice_is_create_then_unchanged() {
        let backend = FakeStackBackend::new();
        let provider = provider(backend.clone());
        let body = provider.render_template(&[postgres("mydb")]).unwrap();

        assert_eq!(
            provider.create_or_update_stack(&body).await.unwrap(),
            StackChange::Created
        );
        assert_eq!(
            provider.create_or_update_stack(&body).await.unwrap(),
            StackChange::Unchanged
        );
        assert_eq!(backend.create_calls(), 2);
        assert_eq!(backend.update_calls(), 1);
    }

    #[tokio::test]
    async fn test_changed_template_is_update() {
        let backend = FakeStackBackend::new();
        let provider = provider(backend.clone());

        provider
            .create_infrastructure(&[postgres("mydb")])
            .await
            .unwrap();
        let body = provider
            .render_template(&[postgres("mydb"), postgres("reports")])
            .unwrap();

        assert_eq!(
            provider.create_or_update_stack(&body).await.unwrap(),
            StackChange::Updated
        );
    }

    #[tokio::test]
    async fn test_create_failure_propagates() {
        let backend = FakeStackBackend::new().failing_create("Template format error");
        let provider = provider(backend);

        let err = provider
            .create_infrastructure(&[postgres("mydb")])
            .await
            .unwrap_err();
        assert!(matches!(err, CloudError::ApiError(ref m) if m.contains("Template format error")));
    }

    #[tokio::test]
    async fn test_status_of_missing_stack_is_not_found() {
        let provider = provider(FakeStackBackend::new());

        let err = provider.get_infrastructure_status().await.unwrap_err();
        assert!(matches!(err, CloudError::StackNotFound(ref s) if s == "shop"));
    }

    #[tokio::test]
    async fn test_status_is_stable_without_mutation() {
        let backend = FakeStackBackend::new();
        let provider = provider(backend.clone());
        provider
            .create_infrastructure(&[postgres("mydb")])
            .await
            .unwrap();

        let first = provider.get_infrastructure_status().await.unwrap();
        let second = provider.get_infrastructure_status().await.unwrap();
        assert_eq!(first, InfrastructureStatus::Running);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_destroy_missing_stack_is_noop() {
        let backend = FakeStackBackend::new();
        let provider = provider(backend.clone());

        provider.destroy_infrastructure().await.unwrap();
        assert_eq!(backend.delete_calls(), 0);
    }

    #[tokio::test]
    async fn test_destroy_existing_stack() {
        let backend = FakeStackBackend::new();
        let provider = provider(backend.clone());
        provider
            .create_infrastructure(&[postgres("mydb")])
            .await
            .unwrap();

        provider.destroy_infrastructure().await.unwrap();
        assert_eq!(backend.delete_calls(), 1);
        assert!(provider.get_infrastructure_status().await.is_err());
    }

    #[tokio::test]
    async fn test_stack_output_is_verbatim() {
        let backend = FakeStackBackend::new().with_stack(
            "shop",
            "CREATE_COMPLETE",
            &[("mydbSecret", "arn:aws:secretsmanager:us-east-1:1:secret:mydbSecret-AbC123")],
        );
        let provider = provider(backend);

        let outputs = provider.get_stack_output().await.unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(
            outputs["mydbSecret"],
            "arn:aws:secretsmanager:us-east-1:1:secret:mydbSecret-AbC123"
        );
    }

    #[test]
    fn test_lists_postgres() {
        let provider = provider(FakeStackBackend::new());
        let resources = provider.list_available_resources();

        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].kind, "Postgres");
        assert_eq!(resources[0].outputs.len(), 7);
        assert_eq!(provider.name(), "aws-cloudformation");
        assert_eq!(provider.stack_name(), "shop");
    }
}
