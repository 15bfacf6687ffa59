//! Template rendering
//!
//! Renders descriptor partials with Tera.

use crate::error::{CoreError, Result};
use serde::Serialize;
use tera::{Context, Tera};

/// Tera-backed template processor
pub struct TemplateProcessor {
    tera: Tera,
    context: Context,
}

impl TemplateProcessor {
    pub fn new() -> Self {
        Self {
            tera: Tera::default(),
            context: Context::new(),
        }
    }

    /// Add a single variable to the render context
    pub fn add_variable<T: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &T) {
        self.context.insert(key.into(), value);
    }

    /// Render a string as a template
    pub fn render_str(&mut self, template: &str) -> Result<String> {
        self.tera
            .render_str(template, &self.context)
            .map_err(|e| CoreError::TemplateRenderError(extract_tera_error_detail(&e)))
    }

    /// Render a named template, attributing failures to `name`
    pub fn render_named(&mut self, name: &str, template: &str) -> Result<String> {
        self.render_str(template).map_err(|e| match e {
            CoreError::TemplateRenderError(message) => CoreError::TemplateError {
                file: name.to_string(),
                message,
            },
            other => other,
        })
    }
}

impl Default for TemplateProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Flatten a Tera error chain into one readable message
fn extract_tera_error_detail(e: &tera::Error) -> String {
    use std::error::Error;

    let mut details = vec![e.to_string()];
    let mut source = e.source();
    while let Some(err) = source {
        details.push(err.to_string());
        source = err.source();
    }

    let full_error = details.join(" | ");

    if full_error.contains("not found in context")
        && let Some(start) = full_error.find("Variable `")
        && let Some(end) = full_error[start..].find("` not found")
    {
        let var_name = &full_error[start + 10..start + end];
        return format!(
            "undefined variable: `{}`\nHint: add it to the manifest spec or use a `default` filter",
            var_name
        );
    }

    full_error
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_manifest_fields() {
        let mut processor = TemplateProcessor::new();
        processor.add_variable("manifest", &json!({ "metadata": { "name": "mydb" } }));

        let rendered = processor
            .render_str("{{ manifest.metadata.name }}Db")
            .unwrap();
        assert_eq!(rendered, "mydbDb");
    }

    #[test]
    fn test_default_filter() {
        let mut processor = TemplateProcessor::new();
        processor.add_variable("manifest", &json!({ "spec": {} }));

        let rendered = processor
            .render_str(r#"{{ manifest.spec.port | default(value=5432) }}"#)
            .unwrap();
        assert_eq!(rendered, "5432");
    }

    #[test]
    fn test_undefined_variable_names_the_variable() {
        let mut processor = TemplateProcessor::new();
        let err = processor
            .render_named("Postgres.yaml", "{{ missing }}")
            .unwrap_err();

        match err {
            CoreError::TemplateError { file, message } => {
                assert_eq!(file, "Postgres.yaml");
                assert!(message.contains("missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
