//! oplat infrastructure provider abstraction
//!
//! This crate defines the contract every oplat backend implements and the
//! resource-output resolution pipeline shared between them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                    oplat CLI                     │
//! │        (resource create/delete/status,           │
//! │               export-env)                        │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                 oplat-cloud                      │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait InfrastructureProvider { ... }     │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────────┐  ┌──────────────────┐     │
//! │  │ ResourceCatalog  │  │  get_resource_   │     │
//! │  │  (per provider)  │  │     outputs      │     │
//! │  └──────────────────┘  └──────────────────┘     │
//! └───────┬─────────────────┬───────────────────────┘
//!         │                 │
//! ┌───────▼───────┐ ┌───────▼───────┐
//! │ CloudFormation│ │ docker compose│
//! │   provider    │ │   provider    │
//! └───────────────┘ └───────────────┘
//! ```

pub mod env;
pub mod error;
pub mod postgres;
pub mod provider;
pub mod resource;
pub mod state;

// Re-exports
pub use env::{EnvMapping, env_key};
pub use error::{CloudError, Result};
pub use postgres::{DatabaseCredentials, build_connection_string, postgres_definition};
pub use provider::{InfrastructureProvider, InfrastructureStatus};
pub use resource::{
    OutputSpec, Resource, ResourceCatalog, ResourceDefinition, ResourceOutputValue,
    ResourceRegistry, get_resource_outputs,
};
pub use state::{DEFAULT_STATE_DIR, StateDir};
