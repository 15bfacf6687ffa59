//! Flatten resource outputs into a `KEY=value` environment mapping

use crate::resource::ResourceOutputValue;
use std::path::Path;

/// `<resourceName>_<outputKey>` in UPPER_SNAKE_CASE
///
/// `mydb` + `connectionString` becomes `MYDB_CONNECTION_STRING`.
pub fn env_key(resource_name: &str, output_key: &str) -> String {
    let raw = format!("{resource_name}_{output_key}");
    let mut key = String::with_capacity(raw.len() + 8);
    let mut prev: Option<char> = None;

    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            let boundary = c.is_ascii_uppercase()
                && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            if boundary && !key.ends_with('_') {
                key.push('_');
            }
            key.push(c.to_ascii_uppercase());
        } else if !key.is_empty() && !key.ends_with('_') {
            key.push('_');
        }
        prev = Some(c);
    }

    key.trim_end_matches('_').to_string()
}

/// Ordered environment mapping; later inserts of an existing key replace
/// its value in place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMapping {
    entries: Vec<(String, String)>,
}

impl EnvMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Add every output of the resource named `resource_name`
    pub fn extend_outputs(&mut self, resource_name: &str, outputs: &[ResourceOutputValue]) {
        for output in outputs {
            self.insert(env_key(resource_name, &output.key), output.value.clone());
        }
    }

    /// `KEY=value` lines, one per entry
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Overwrite `path` with the rendered mapping
    pub async fn write_to(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::write(path, self.render()).await
    }
}
