mod commands;
mod providers;
mod utils;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use oplat_config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oplat")]
#[command(about = "Provision development infrastructure from resource manifests", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the resources of this project's stack
    #[command(subcommand)]
    Resource(ResourceCommands),
    /// Write resource outputs as environment variables to stdout and a .env file
    #[command(name = "export-env")]
    ExportEnv {
        /// Manifest file declaring the resources
        #[arg(short, long)]
        manifest: PathBuf,
        /// Provider name (aws-cloudformation, docker-compose)
        #[arg(short, long)]
        provider: Option<String>,
        /// Environment file to overwrite
        #[arg(short, long, default_value = ".env")]
        output: PathBuf,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ResourceCommands {
    /// Create or update the resources declared in a manifest
    Create {
        /// Manifest file declaring the resources
        #[arg(short, long)]
        manifest: PathBuf,
        /// Provider name (aws-cloudformation, docker-compose)
        #[arg(short, long)]
        provider: Option<String>,
    },
    /// Delete the stack's resources
    Delete {
        /// Provider name (aws-cloudformation, docker-compose)
        #[arg(short, long)]
        provider: Option<String>,
    },
    /// Show the stack's status
    Status {
        /// Provider name (aws-cloudformation, docker-compose)
        #[arg(short, long)]
        provider: Option<String>,
    },
    /// List the resource kinds a provider supports
    List {
        /// Provider name (aws-cloudformation, docker-compose)
        #[arg(short, long)]
        provider: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_context() -> anyhow::Result<(Config, PathBuf)> {
    let config = Config::load().context("Failed to load configuration")?;
    let project_root = std::env::current_dir().context("Failed to read current directory")?;
    Ok((config, project_root))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Version => {
            println!("oplat {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Resource(command) => {
            let (config, project_root) = load_context()?;
            match command {
                ResourceCommands::Create { manifest, provider } => {
                    let manifests = oplat_core::load_manifests(&manifest)?;
                    let provider = providers::resolve(
                        config.provider(provider.as_deref()),
                        &config,
                        &project_root,
                    )
                    .await?;
                    commands::resource::create(provider.as_ref(), &manifests).await?;
                }
                ResourceCommands::Delete { provider } => {
                    let provider = providers::resolve(
                        config.provider(provider.as_deref()),
                        &config,
                        &project_root,
                    )
                    .await?;
                    commands::resource::delete(provider.as_ref()).await?;
                }
                ResourceCommands::Status { provider } => {
                    let provider = providers::resolve(
                        config.provider(provider.as_deref()),
                        &config,
                        &project_root,
                    )
                    .await?;
                    commands::resource::status(provider.as_ref()).await?;
                }
                ResourceCommands::List { provider } => {
                    let provider = providers::resolve(
                        config.provider(provider.as_deref()),
                        &config,
                        &project_root,
                    )
                    .await?;
                    commands::resource::list(provider.as_ref());
                }
            }
        }
        Commands::ExportEnv {
            manifest,
            provider,
            output,
        } => {
            let (config, project_root) = load_context()?;
            let manifests = oplat_core::load_manifests(&manifest)?;
            let provider =
                providers::resolve(config.provider(provider.as_deref()), &config, &project_root)
                    .await?;
            commands::export_env::handle(provider.as_ref(), &manifests, &output).await?;
        }
    }

    Ok(())
}
