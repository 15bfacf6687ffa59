//! Resource kinds provisionable through docker compose

mod postgres;

pub use postgres::{COMPOSE_FILE_OUTPUT, PostgresResource, credentials_from_descriptor};
