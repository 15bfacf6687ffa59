//! oplat core
//!
//! Manifest model, manifest loading, and the templating layer that renders
//! manifests into backend-native descriptor files.

pub mod error;
pub mod loader;
pub mod manifest;
pub mod scaffold;
pub mod template;

pub use error::{CoreError, Result};
pub use loader::{load_manifests, parse_manifests};
pub use manifest::{Manifest, Metadata};
pub use scaffold::{BuiltinTemplate, Scaffolder, TemplatePack, TemplateSource, merge_yaml};
pub use template::TemplateProcessor;
