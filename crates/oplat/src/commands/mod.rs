pub mod export_env;
pub mod resource;
