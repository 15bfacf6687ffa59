//! Manifest model
//!
//! A manifest declares one resource to provision. `kind` selects the
//! resource catalog entry and the template partial, `metadata.name`
//! identifies the resource inside its stack.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A user-authored resource declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub api_version: String,
    pub kind: String,
    pub metadata: Metadata,
    #[serde(default)]
    pub spec: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub name: String,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new(
        api_version: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            metadata: Metadata {
                name: name.into(),
                annotations: BTreeMap::new(),
            },
            spec: Map::new(),
        }
    }

    pub fn with_spec(mut self, key: impl Into<String>, value: Value) -> Self {
        self.spec.insert(key.into(), value);
        self
    }

    /// Resource name (`metadata.name`)
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Returns a copy with `spec.stack.name` set to `stack_name` when unset.
    ///
    /// Other keys under `spec.stack` and an existing name are preserved.
    pub fn with_default_stack_name(&self, stack_name: &str) -> Manifest {
        let mut manifest = self.clone();

        let stack = manifest
            .spec
            .entry("stack")
            .or_insert_with(|| Value::Object(Map::new()));

        if !stack.is_object() {
            *stack = Value::Object(Map::new());
        }

        if let Value::Object(stack) = stack {
            let has_name = stack.get("name").is_some_and(|n| !n.is_null());
            if !has_name {
                stack.insert("name".to_string(), Value::String(stack_name.to_string()));
            }
        }

        manifest
    }
}
