//! Provider selection by name

use oplat_cloud::{CloudError, InfrastructureProvider};
use oplat_cloud_aws::AwsCloudFormationProvider;
use oplat_compose::DockerComposeProvider;
use oplat_config::Config;
use std::path::Path;

pub const AVAILABLE_PROVIDERS: [&str; 2] = [
    oplat_cloud_aws::PROVIDER_NAME,
    oplat_compose::PROVIDER_NAME,
];

/// Build the provider called `name`, bound to this project's stack
pub async fn resolve(
    name: &str,
    config: &Config,
    project_root: &Path,
) -> anyhow::Result<Box<dyn InfrastructureProvider>> {
    if !AVAILABLE_PROVIDERS.contains(&name) {
        return Err(CloudError::ProviderNotFound(format!(
            "{} (available: {})",
            name,
            AVAILABLE_PROVIDERS.join(", ")
        ))
        .into());
    }

    let stack_name = config.stack_name_for(project_root)?;
    tracing::debug!(provider = %name, stack = %stack_name, "Resolving provider");

    let provider: Box<dyn InfrastructureProvider> = if name == oplat_cloud_aws::PROVIDER_NAME {
        Box::new(
            AwsCloudFormationProvider::new(
                stack_name,
                config.aws.region.clone(),
                config.templates.aws_cloudformation.clone(),
            )
            .await?,
        )
    } else {
        Box::new(DockerComposeProvider::new(
            stack_name,
            project_root,
            &config.state_dir,
            config.templates.docker_compose.clone(),
        )?)
    };

    Ok(provider)
}
