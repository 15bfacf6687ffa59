pub mod error;
pub mod stack;

pub use error::*;
pub use stack::{MAX_STACK_NAME_LEN, derive_stack_name, sanitize_stack_name};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "OPLAT_CONFIG_PATH";
pub const PROVIDER_ENV: &str = "OPLAT_PROVIDER";
pub const REGION_ENV: &str = "AWS_REGION";
pub const STACK_NAME_ENV: &str = "OPLAT_STACK_NAME";

pub const DEFAULT_PROVIDER: &str = "aws-cloudformation";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_STATE_DIR: &str = ".oplat";

/// User configuration
///
/// Values resolve in this order, first wins: command line, environment,
/// config file, built-in default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_provider: String,
    pub aws: AwsSettings,
    pub state_dir: PathBuf,
    pub templates: TemplateSettings,
    pub stack_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsSettings {
    pub region: String,
}

/// Template pack directories overriding the built-in packs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    pub aws_cloudformation: Option<PathBuf>,
    pub docker_compose: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: DEFAULT_PROVIDER.to_string(),
            aws: AwsSettings::default(),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            templates: TemplateSettings::default(),
            stack_name: None,
        }
    }
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
        }
    }
}

/// Location of the config file
///
/// `OPLAT_CONFIG_PATH` when set, `~/.config/oplat/config.yaml` otherwise.
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
        && !path.is_empty()
    {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|dir| dir.join("oplat").join("config.yaml"))
}

impl Config {
    /// Config file (if any) with environment overrides applied
    pub fn load() -> Result<Self> {
        let config = match config_file_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// Read `path`; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(provider) = non_empty_env(PROVIDER_ENV) {
            self.default_provider = provider;
        }
        if let Some(region) = non_empty_env(REGION_ENV) {
            self.aws.region = region;
        }
        if let Some(stack_name) = non_empty_env(STACK_NAME_ENV) {
            self.stack_name = Some(stack_name);
        }
        self
    }

    /// `cli` when given, the configured provider otherwise
    pub fn provider<'a>(&'a self, cli: Option<&'a str>) -> &'a str {
        cli.unwrap_or(self.default_provider.as_str())
    }

    /// The configured stack name, or one derived from `project_dir`
    pub fn stack_name_for(&self, project_dir: &Path) -> Result<String> {
        match &self.stack_name {
            Some(name) => sanitize_stack_name(name),
            None => derive_stack_name(project_dir),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
