//! Postgres as a compose service
//!
//! Credentials are read back from the rendered compose file: service
//! `<name>Db`, its `POSTGRES_*` environment and the port published for
//! container port 5432.

use crate::provider::DockerComposeProvider;
use async_trait::async_trait;
use oplat_cloud::postgres::{POSTGRES_ENGINE, parse_port};
use oplat_cloud::{
    CloudError, DatabaseCredentials, InfrastructureProvider, Resource, ResourceDefinition,
    ResourceOutputValue, Result, postgres_definition,
};
use oplat_core::Manifest;
use serde_yaml::Value;

pub const COMPOSE_FILE_OUTPUT: &str = "dockerComposeFile";

const POSTGRES_PORT: &str = "5432";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_USER: &str = "postgres";

pub struct PostgresResource {
    definition: ResourceDefinition,
}

impl PostgresResource {
    pub fn new() -> Self {
        Self {
            definition: postgres_definition("A postgres database using docker compose"),
        }
    }
}

impl Default for PostgresResource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Resource<DockerComposeProvider> for PostgresResource {
    fn definition(&self) -> &ResourceDefinition {
        &self.definition
    }

    async fn get_output_values(
        &self,
        provider: &DockerComposeProvider,
        manifest: &Manifest,
    ) -> Result<Vec<ResourceOutputValue>> {
        let stack_outputs = provider.get_stack_output().await?;
        let descriptor = stack_outputs.get(COMPOSE_FILE_OUTPUT).ok_or_else(|| {
            CloudError::InfrastructureNotFound(format!(
                "Docker Compose file not found for resource {}",
                manifest.name()
            ))
        })?;

        let credentials = credentials_from_descriptor(descriptor, manifest.name())?;
        credentials.to_output_values(self.outputs(), POSTGRES_ENGINE)
    }
}

/// Read the credentials of resource `name` out of a compose file
pub fn credentials_from_descriptor(descriptor: &str, name: &str) -> Result<DatabaseCredentials> {
    let document: Value = serde_yaml::from_str(descriptor)?;
    let service_name = format!("{name}Db");

    let service = document
        .get("services")
        .and_then(|services| services.get(&service_name))
        .ok_or_else(|| {
            CloudError::OutputNotFound(format!(
                "service {service_name} for resource {name} in the compose file"
            ))
        })?;

    let environment = service.get("environment");
    let env = |key: &str| environment.and_then(|e| env_value(e, key));

    let username = env("POSTGRES_USER").unwrap_or_else(|| DEFAULT_USER.to_string());
    let password = env("POSTGRES_PASSWORD").ok_or_else(|| {
        CloudError::OutputNotFound(format!("POSTGRES_PASSWORD of service {service_name}"))
    })?;
    // the postgres image defaults the database to the user name
    let dbname = env("POSTGRES_DB").unwrap_or_else(|| username.clone());
    let host = env("POSTGRES_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = service
        .get("ports")
        .and_then(Value::as_sequence)
        .and_then(|ports| ports.iter().find_map(published_postgres_port))
        .unwrap_or_else(|| POSTGRES_PORT.to_string());

    Ok(DatabaseCredentials {
        username,
        password,
        host,
        port: parse_port(&port)?,
        dbname,
    })
}

/// Look `key` up in an environment block given either as a mapping or as a
/// list of `KEY=value` entries
fn env_value(environment: &Value, key: &str) -> Option<String> {
    match environment {
        Value::Mapping(map) => map.get(key).and_then(scalar_to_string),
        Value::Sequence(entries) => entries.iter().find_map(|entry| {
            let entry = entry.as_str()?;
            let (k, v) = entry.split_once('=')?;
            (k.trim() == key).then(|| v.to_string())
        }),
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Host port of a port entry whose container side is 5432.
///
/// Short syntax: `[ip:]host:container[/proto]`; long syntax:
/// `{target, published}`. Entries without a published port are skipped.
fn published_postgres_port(entry: &Value) -> Option<String> {
    match entry {
        Value::String(spec) => {
            let spec = spec.split('/').next().unwrap_or_default();
            let parts: Vec<&str> = spec.split(':').collect();
            let (container, rest) = parts.split_last()?;
            if *container != POSTGRES_PORT {
                return None;
            }
            rest.last()
                .map(|host| host.trim().to_string())
                .filter(|host| !host.is_empty())
        }
        Value::Mapping(_) => {
            let target = entry.get("target").and_then(scalar_to_string)?;
            if target != POSTGRES_PORT {
                return None;
            }
            entry.get("published").and_then(scalar_to_string)
        }
        _ => None,
    }
}
