//! Specification templates.
//!
//! A template is JSON text with `{{ name }}` placeholders. Substituted values
//! are escaped as JSON string content, so placeholders belong inside string
//! literals.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use serde_json::Value;

use crate::GeneratorError;

/// File holding the template body inside a template directory.
pub const TEMPLATE_FILE: &str = "template_spec.json";

/// Template for CRUD components.
pub const CRUD_TEMPLATE: &str = "api-crud-entity";

const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}";

#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    body: String,
    placeholder: Regex,
}

impl Template {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Result<Self, GeneratorError> {
        let placeholder =
            Regex::new(PLACEHOLDER_PATTERN).map_err(|e| GeneratorError::Template(e.to_string()))?;

        Ok(Self {
            name: name.into(),
            body: body.into(),
            placeholder,
        })
    }

    /// Load `<templates_dir>/<name>/template_spec.json`.
    pub fn load(templates_dir: &Path, name: &str) -> Result<Self, GeneratorError> {
        let path = templates_dir.join(name).join(TEMPLATE_FILE);
        let body = std::fs::read_to_string(&path).map_err(|e| GeneratorError::io(&path, e))?;
        Self::new(name, body)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substitute every placeholder and parse the result as JSON.
    pub fn render(&self, context: &BTreeMap<&str, String>) -> Result<Value, GeneratorError> {
        let mut rendered = String::with_capacity(self.body.len());
        let mut last = 0;

        for caps in self.placeholder.captures_iter(&self.body) {
            let (Some(whole), Some(key)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let value = context.get(key.as_str()).ok_or_else(|| {
                GeneratorError::Template(format!(
                    "template {} references unknown variable `{}`",
                    self.name,
                    key.as_str()
                ))
            })?;

            rendered.push_str(&self.body[last..whole.start()]);
            rendered.push_str(&escape_json_content(value));
            last = whole.end();
        }
        rendered.push_str(&self.body[last..]);

        Ok(serde_json::from_str(&rendered)?)
    }
}

/// `value` escaped for placement between JSON string quotes.
fn escape_json_content(value: &str) -> String {
    let quoted = Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn context(pairs: &[(&'static str, &str)]) -> BTreeMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, v.to_string())).collect()
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let template = Template::new(
            "t",
            r#"{"id": "{{component_id}}", "aisp": "Manage {{ entity }} records"}"#,
        )
        .unwrap();

        let spec = template
            .render(&context(&[("component_id", "API-CRUD-WIDGET-1A2B"), ("entity", "widget")]))
            .unwrap();
        assert_eq!(
            spec,
            json!({"id": "API-CRUD-WIDGET-1A2B", "aisp": "Manage widget records"})
        );
    }

    #[test]
    fn test_render_escapes_values() {
        let template = Template::new("t", r#"{"entity": "{{ entity }}"}"#).unwrap();
        let spec = template.render(&context(&[("entity", "say \"hi\"\n")])).unwrap();
        assert_eq!(spec, json!({"entity": "say \"hi\"\n"}));
    }

    #[test]
    fn test_unknown_variable_is_an_error() {
        let template = Template::new("t", r#"{"x": "{{ missing }}"}"#).unwrap();
        assert!(matches!(
            template.render(&context(&[])),
            Err(GeneratorError::Template(msg)) if msg.contains("missing")
        ));
    }

    #[test]
    fn test_rendered_text_must_be_json() {
        let template = Template::new("t", "not json {{ entity }}").unwrap();
        assert!(matches!(
            template.render(&context(&[("entity", "widget")])),
            Err(GeneratorError::RenderedJson(_))
        ));
    }
}
