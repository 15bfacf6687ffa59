//! AWS CloudFormation provider for oplat
//!
//! Renders manifests into one CloudFormation template, applies it as the
//! bound stack with create-or-update semantics, and resolves resource
//! outputs through stack outputs and Secrets Manager.

pub mod arn;
pub mod backend;
pub mod error;
pub mod provider;
pub mod resources;
pub mod sdk;

#[cfg(test)]
mod testing;

pub use arn::{ParsedArn, parse_arn};
pub use backend::{StackBackend, StackDescription};
pub use error::{AwsError, Result};
pub use provider::{
    AwsCloudFormationProvider, DEFAULT_REGION, PROVIDER_NAME, StackChange,
    status_from_stack_status,
};
pub use sdk::AwsSdkBackend;
