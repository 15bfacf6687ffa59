//! Local docker compose provider for oplat
//!
//! Renders manifests into a compose file under the project's state
//! directory and drives `docker compose up/down/ps` against it.

pub mod compose;
pub mod error;
pub mod provider;
pub mod resources;
pub mod status;

pub use compose::DockerCompose;
pub use error::{ComposeError, Result};
pub use provider::{DockerComposeProvider, PROVIDER_NAME};
pub use status::{parse_ps_rows, status_from_ps};
