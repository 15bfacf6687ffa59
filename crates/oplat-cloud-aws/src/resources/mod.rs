//! Resource kinds provisionable through CloudFormation

mod postgres;

pub use postgres::PostgresResource;
