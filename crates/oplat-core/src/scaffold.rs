//! Descriptor scaffolding
//!
//! A template pack turns manifests into one backend-native descriptor file
//! (a CloudFormation template, a compose file). `Scaffolder::init` lays the
//! base descriptor down in a target directory, `Scaffolder::run_partial`
//! renders the partial for a manifest's kind and merges it into that file.

use crate::error::{CoreError, Result};
use crate::manifest::Manifest;
use crate::template::TemplateProcessor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Marker written by `init` into the target directory
pub const TEMPLATE_MARKER: &str = ".oplat-template.json";

const PACK_FILE: &str = "template.yaml";
const BASE_FILE: &str = "base.yaml";
const PARTIALS_DIR: &str = "partials";

/// Template packs shipped with the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinTemplate {
    AwsCloudFormation,
    DockerCompose,
}

/// Where a template pack comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Builtin(BuiltinTemplate),
    Directory(PathBuf),
}

impl TemplateSource {
    /// Use `dir` when given, the builtin pack otherwise
    pub fn or_builtin(dir: Option<PathBuf>, builtin: BuiltinTemplate) -> Self {
        match dir {
            Some(dir) => TemplateSource::Directory(dir),
            None => TemplateSource::Builtin(builtin),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PackManifest {
    name: String,
    descriptor: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TemplateMarker {
    template: String,
    initialized_at: DateTime<Utc>,
}

/// A loaded template pack
#[derive(Debug, Clone)]
pub struct TemplatePack {
    name: String,
    descriptor: String,
    base: String,
    partials: HashMap<String, String>,
}

impl TemplatePack {
    pub fn builtin(template: BuiltinTemplate) -> Self {
        let (name, descriptor, base, partials): (&str, &str, &str, &[(&str, &str)]) =
            match template {
                BuiltinTemplate::AwsCloudFormation => (
                    "template-aws-cloudformation",
                    "cloudformation-template.yaml",
                    include_str!("../templates/aws-cloudformation/base.yaml"),
                    &[(
                        "Postgres",
                        include_str!("../templates/aws-cloudformation/partials/Postgres.yaml"),
                    )],
                ),
                BuiltinTemplate::DockerCompose => (
                    "template-docker-compose",
                    "docker-compose.yaml",
                    include_str!("../templates/docker-compose/base.yaml"),
                    &[(
                        "Postgres",
                        include_str!("../templates/docker-compose/partials/Postgres.yaml"),
                    )],
                ),
            };

        Self {
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            base: base.to_string(),
            partials: partials
                .iter()
                .map(|(kind, body)| (kind.to_string(), body.to_string()))
                .collect(),
        }
    }

    /// Load a pack from a directory holding `template.yaml`, `base.yaml`
    /// and `partials/<Kind>.yaml`
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let read = |path: PathBuf| {
            std::fs::read_to_string(&path).map_err(|e| CoreError::IoError {
                path,
                message: e.to_string(),
            })
        };

        let pack: PackManifest = serde_yaml::from_str(&read(dir.join(PACK_FILE))?)?;
        if pack.descriptor.contains(['/', '\\']) {
            return Err(CoreError::InvalidTemplate(format!(
                "descriptor must be a plain file name: {}",
                pack.descriptor
            )));
        }

        let base = read(dir.join(BASE_FILE))?;

        let mut partials = HashMap::new();
        let partials_dir = dir.join(PARTIALS_DIR);
        let entries = std::fs::read_dir(&partials_dir).map_err(|e| CoreError::IoError {
            path: partials_dir.clone(),
            message: e.to_string(),
        })?;

        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            if let Some(kind) = path.file_stem().and_then(|s| s.to_str()) {
                partials.insert(kind.to_string(), read(path.clone())?);
            }
        }

        debug!(
            template = %pack.name,
            partial_count = partials.len(),
            "Loaded template pack from directory"
        );

        Ok(Self {
            name: pack.name,
            descriptor: pack.descriptor,
            base,
            partials,
        })
    }

    pub fn load(source: &TemplateSource) -> Result<Self> {
        match source {
            TemplateSource::Builtin(template) => Ok(Self::builtin(*template)),
            TemplateSource::Directory(dir) => Self::from_dir(dir),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// File name of the rendered descriptor
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

/// Renders manifests into a descriptor file
#[derive(Debug, Clone)]
pub struct Scaffolder {
    pack: TemplatePack,
}

impl Scaffolder {
    pub fn new(pack: TemplatePack) -> Self {
        Self { pack }
    }

    pub fn from_source(source: &TemplateSource) -> Result<Self> {
        Ok(Self::new(TemplatePack::load(source)?))
    }

    pub fn pack(&self) -> &TemplatePack {
        &self.pack
    }

    pub fn descriptor_path(&self, target: &Path) -> PathBuf {
        target.join(&self.pack.descriptor)
    }

    /// Lay the base descriptor down in `target`.
    ///
    /// Fails with `TemplateAlreadyInitialized` when `target` was initialized
    /// before; the existing descriptor is left untouched in that case.
    pub fn init(&self, target: &Path) -> Result<()> {
        let marker_path = target.join(TEMPLATE_MARKER);
        if marker_path.exists() {
            return Err(CoreError::TemplateAlreadyInitialized(target.to_path_buf()));
        }

        std::fs::create_dir_all(target)?;

        let base: Value = serde_yaml::from_str(&self.pack.base)?;
        std::fs::write(self.descriptor_path(target), serde_yaml::to_string(&base)?)?;

        let marker = TemplateMarker {
            template: self.pack.name().to_string(),
            initialized_at: Utc::now(),
        };
        std::fs::write(&marker_path, serde_json::to_string_pretty(&marker)?)?;

        info!(
            template = %self.pack.name(),
            target = %target.display(),
            "Initialized template"
        );
        Ok(())
    }

    /// Render the partial for `kind` and merge it into the descriptor in `target`
    pub fn run_partial(&self, kind: &str, manifest: &Manifest, target: &Path) -> Result<PathBuf> {
        let partial =
            self.pack
                .partials
                .get(kind)
                .ok_or_else(|| CoreError::TemplatePartialNotFound {
                    template: self.pack.name().to_string(),
                    kind: kind.to_string(),
                })?;

        let mut processor = TemplateProcessor::new();
        processor.add_variable("manifest", manifest);
        let rendered =
            processor.render_named(&format!("{}/{}.yaml", self.pack.name(), kind), partial)?;
        let fragment: Value = serde_yaml::from_str(&rendered)?;

        let descriptor_path = self.descriptor_path(target);
        let mut descriptor: Value = match std::fs::read_to_string(&descriptor_path) {
            Ok(content) => serde_yaml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                serde_yaml::from_str(&self.pack.base)?
            }
            Err(e) => {
                return Err(CoreError::IoError {
                    path: descriptor_path,
                    message: e.to_string(),
                });
            }
        };

        merge_yaml(&mut descriptor, fragment);
        std::fs::write(&descriptor_path, serde_yaml::to_string(&descriptor)?)?;

        debug!(
            template = %self.pack.name(),
            kind = %kind,
            name = %manifest.name(),
            "Rendered partial"
        );
        Ok(descriptor_path)
    }
}

/// Deep-merge `overlay` into `base`: mappings merge key by key, any other
/// value replaces what was there.
pub fn merge_yaml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
