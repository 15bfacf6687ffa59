//! [`StackBackend`] on top of the AWS SDK

use crate::backend::{StackBackend, StackDescription};
use crate::error::{AwsError, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_cloudformation::types::Capability;
use std::collections::HashMap;

const NO_UPDATES_MESSAGE: &str = "No updates are to be performed";

/// CloudFormation + Secrets Manager clients for one region
pub struct AwsSdkBackend {
    cloudformation: aws_sdk_cloudformation::Client,
    secrets: aws_sdk_secretsmanager::Client,
}

impl AwsSdkBackend {
    /// Resolve credentials through the default provider chain
    pub async fn load(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        tracing::debug!(region = %region, "Loaded AWS configuration");

        Self {
            cloudformation: aws_sdk_cloudformation::Client::new(&config),
            secrets: aws_sdk_secretsmanager::Client::new(&config),
        }
    }
}

/// CloudFormation rejects an update without a diff as a ValidationError
/// carrying this message
fn is_no_changes(message: Option<&str>) -> bool {
    message.is_some_and(|m| m.trim().trim_end_matches('.') == NO_UPDATES_MESSAGE)
}

/// DescribeStacks on an unknown name fails with "Stack with id X does not exist"
fn is_missing_stack(message: Option<&str>) -> bool {
    message.is_some_and(|m| m.contains("does not exist"))
}

#[async_trait]
impl StackBackend for AwsSdkBackend {
    async fn create_stack(&self, stack_name: &str, template_body: &str) -> Result<()> {
        let result = self
            .cloudformation
            .create_stack()
            .stack_name(stack_name)
            .template_body(template_body)
            .capabilities(Capability::CapabilityNamedIam)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_already_exists_exception()) =>
            {
                Err(AwsError::AlreadyExists(stack_name.to_string()))
            }
            Err(err) => Err(AwsError::CloudFormation(
                DisplayErrorContext(&err).to_string(),
            )),
        }
    }

    async fn update_stack(&self, stack_name: &str, template_body: &str) -> Result<()> {
        let result = self
            .cloudformation
            .update_stack()
            .stack_name(stack_name)
            .template_body(template_body)
            .capabilities(Capability::CapabilityNamedIam)
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_no_changes(err.as_service_error().and_then(|e| e.message())) => {
                Err(AwsError::NoChanges)
            }
            Err(err) => Err(AwsError::CloudFormation(
                DisplayErrorContext(&err).to_string(),
            )),
        }
    }

    async fn delete_stack(&self, stack_name: &str) -> Result<()> {
        self.cloudformation
            .delete_stack()
            .stack_name(stack_name)
            .send()
            .await
            .map_err(|err| AwsError::CloudFormation(DisplayErrorContext(&err).to_string()))?;
        Ok(())
    }

    async fn describe_stack(&self, stack_name: &str) -> Result<Option<StackDescription>> {
        let result = self
            .cloudformation
            .describe_stacks()
            .stack_name(stack_name)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(err) if is_missing_stack(err.as_service_error().and_then(|e| e.message())) => {
                return Ok(None);
            }
            Err(err) => {
                return Err(AwsError::CloudFormation(
                    DisplayErrorContext(&err).to_string(),
                ));
            }
        };

        let Some(stack) = output.stacks().first() else {
            return Ok(None);
        };

        let outputs = stack
            .outputs()
            .iter()
            .filter_map(|o| {
                let key = o.output_key()?;
                Some((key.to_string(), o.output_value().unwrap_or_default().to_string()))
            })
            .collect::<HashMap<_, _>>();

        Ok(Some(StackDescription {
            status: stack
                .stack_status()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            outputs,
        }))
    }

    async fn get_secret_value(&self, secret_id: &str) -> Result<String> {
        let result = self
            .secrets
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await;

        match result {
            Ok(output) => output
                .secret_string()
                .map(str::to_string)
                .ok_or_else(|| AwsError::EmptySecret(secret_id.to_string())),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception()) =>
            {
                Err(AwsError::SecretNotFound(secret_id.to_string()))
            }
            Err(err) => Err(AwsError::SecretsManager(
                aws_sdk_secretsmanager::error::DisplayErrorContext(&err).to_string(),
            )),
        }
    }
}
