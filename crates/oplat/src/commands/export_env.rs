use crate::utils;
use anyhow::Context;
use colored::Colorize;
use oplat_cloud::{EnvMapping, InfrastructureProvider};
use oplat_core::Manifest;
use std::path::Path;

/// Resolve every manifest's outputs, print them as `KEY=value` and
/// overwrite `output` with the same lines.
///
/// Stdout carries only the variables so it can be sourced or piped.
pub async fn handle(
    provider: &dyn InfrastructureProvider,
    manifests: &[Manifest],
    output: &Path,
) -> anyhow::Result<()> {
    let mut mapping = EnvMapping::new();

    for manifest in manifests {
        let outputs = provider
            .get_resource_outputs(manifest)
            .await
            .with_context(|| {
                format!(
                    "Failed to resolve outputs of {} {}",
                    manifest.kind,
                    manifest.name()
                )
            })?;

        for value in &outputs {
            tracing::debug!(
                resource = %manifest.name(),
                key = %value.key,
                "{}",
                value.description
            );
        }
        mapping.extend_outputs(manifest.name(), &outputs);
    }

    print!("{}", mapping.render());

    mapping
        .write_to(output)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;

    eprintln!(
        "{} Environment written to {}",
        "✓".green(),
        utils::display_path(output).cyan()
    );
    Ok(())
}
