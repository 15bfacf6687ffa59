use crate::utils;
use colored::Colorize;
use oplat_cloud::InfrastructureProvider;
use oplat_core::Manifest;

pub async fn create(
    provider: &dyn InfrastructureProvider,
    manifests: &[Manifest],
) -> anyhow::Result<()> {
    println!("{}", "Creating resources...".yellow());
    println!(
        "Stack: {} ({})",
        provider.stack_name().cyan(),
        provider.name()
    );

    println!();
    println!(
        "{}",
        format!("Resources ({}):", manifests.len()).bold()
    );
    for manifest in manifests {
        println!("  • {} {}", manifest.kind, manifest.name().cyan());
    }

    provider.create_infrastructure(manifests).await?;

    println!();
    println!(
        "{}",
        format!("✓ Stack {} is up to date", provider.stack_name())
            .green()
            .bold()
    );
    Ok(())
}

pub async fn delete(provider: &dyn InfrastructureProvider) -> anyhow::Result<()> {
    println!("{}", "Deleting resources...".yellow());
    println!(
        "Stack: {} ({})",
        provider.stack_name().cyan(),
        provider.name()
    );

    provider.destroy_infrastructure().await?;

    println!();
    println!(
        "{}",
        format!("✓ Stack {} deleted", provider.stack_name())
            .green()
            .bold()
    );
    Ok(())
}

pub async fn status(provider: &dyn InfrastructureProvider) -> anyhow::Result<()> {
    let status = provider.get_infrastructure_status().await?;

    println!(
        "{:<20} {:<20} {}",
        "STACK".bold(),
        "PROVIDER".bold(),
        "STATUS".bold()
    );
    println!(
        "{:<20} {:<20} {}",
        provider.stack_name().cyan(),
        provider.name(),
        utils::colored_status(status)
    );
    Ok(())
}

pub fn list(provider: &dyn InfrastructureProvider) {
    let resources = provider.list_available_resources();

    println!(
        "{}",
        format!("Resources available with {}:", provider.name()).bold()
    );
    if resources.is_empty() {
        println!("{}", "  (none)".dimmed());
        return;
    }

    for resource in resources {
        println!();
        println!("  {} - {}", resource.kind.cyan().bold(), resource.description);
        println!("    {}", "Outputs:".dimmed());
        for output in &resource.outputs {
            println!("      • {:<18} {}", output.key, output.description.dimmed());
        }
    }
}
