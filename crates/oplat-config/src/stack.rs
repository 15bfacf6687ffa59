//! Stack name derivation
//!
//! CloudFormation stack names and compose project names both accept
//! `[A-Za-z][A-Za-z0-9-]*` up to 128 characters.

use crate::error::{ConfigError, Result};
use std::path::Path;

pub const MAX_STACK_NAME_LEN: usize = 128;

/// Sanitize `raw` into a valid stack name
pub fn sanitize_stack_name(raw: &str) -> Result<String> {
    let mut name = String::with_capacity(raw.len());
    let mut in_invalid_run = false;

    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            name.push(c);
            in_invalid_run = false;
        } else if !in_invalid_run {
            name.push('-');
            in_invalid_run = true;
        }
    }

    let name: String = name
        .trim_start_matches(|c: char| !c.is_ascii_alphabetic())
        .chars()
        .take(MAX_STACK_NAME_LEN)
        .collect();

    if name.is_empty() {
        return Err(ConfigError::InvalidStackName(raw.to_string()));
    }
    Ok(name)
}

/// Stack name for the project rooted at `dir`: its final path component
pub fn derive_stack_name(dir: &Path) -> Result<String> {
    let base = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    sanitize_stack_name(&base).map_err(|_| ConfigError::InvalidStackName(dir.display().to_string()))
}
