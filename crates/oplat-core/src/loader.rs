//! Manifest file loading

use crate::error::{CoreError, Result};
use crate::manifest::Manifest;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Load every manifest document from a YAML file.
///
/// Documents are separated by `---`; empty documents are skipped.
#[tracing::instrument]
pub fn load_manifests(path: &Path) -> Result<Vec<Manifest>> {
    if !path.exists() {
        return Err(CoreError::ManifestNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let manifests = parse_manifests(&content).map_err(|e| match e {
        CoreError::Yaml(err) => CoreError::ManifestParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        },
        other => other,
    })?;

    info!(
        manifest = %path.display(),
        count = manifests.len(),
        "Loaded manifests"
    );

    Ok(manifests)
}

/// Parse manifests from YAML text
pub fn parse_manifests(content: &str) -> Result<Vec<Manifest>> {
    let mut manifests = Vec::new();

    for document in serde_yaml::Deserializer::from_str(content) {
        let value = serde_yaml::Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }

        require_fields(&value)?;
        let manifest: Manifest = serde_yaml::from_value(value)?;
        validate(&manifest)?;

        debug!(kind = %manifest.kind, name = %manifest.name(), "Parsed manifest");
        manifests.push(manifest);
    }

    if manifests.is_empty() {
        return Err(CoreError::InvalidManifest(
            "no manifest documents found".to_string(),
        ));
    }

    Ok(manifests)
}

/// Reject documents lacking an identity field before serde reports it as
/// a parse error
fn require_fields(document: &serde_yaml::Value) -> Result<()> {
    for field in ["apiVersion", "kind"] {
        if document.get(field).is_none_or(serde_yaml::Value::is_null) {
            return Err(CoreError::InvalidManifest(format!("{field} is missing")));
        }
    }
    if document
        .get("metadata")
        .and_then(|metadata| metadata.get("name"))
        .is_none_or(serde_yaml::Value::is_null)
    {
        return Err(CoreError::InvalidManifest(
            "metadata.name is missing".to_string(),
        ));
    }
    Ok(())
}

fn validate(manifest: &Manifest) -> Result<()> {
    if manifest.api_version.trim().is_empty() {
        return Err(CoreError::InvalidManifest("apiVersion is empty".to_string()));
    }
    if manifest.kind.trim().is_empty() {
        return Err(CoreError::InvalidManifest("kind is empty".to_string()));
    }
    if manifest.metadata.name.trim().is_empty() {
        return Err(CoreError::InvalidManifest(format!(
            "metadata.name is empty for kind '{}'",
            manifest.kind
        )));
    }
    Ok(())
}
