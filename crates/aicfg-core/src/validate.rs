//! Validation seam between resolution and projection
//!
//! Business-rule validation of the merged document belongs to the schema
//! layer, an external collaborator. This module defines the seam plus a
//! structural default that checks shapes only: sections that must be
//! objects, and the absence of `extends` from a resolved document.

use std::fmt;

use serde_json::{Map, Value};

/// Sections of the canonical document that must be JSON objects when
/// present.
const OBJECT_SECTIONS: [&str; 6] = ["skills", "rules", "prompts", "mcp", "hooks", "editors"];

/// A single validation finding, located by dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The validation contract the loader consumes.
pub trait ConfigValidator {
    fn validate(&self, doc: &Map<String, Value>) -> std::result::Result<(), Vec<ValidationIssue>>;
}

/// Shape-only validator used when no schema layer is wired in.
#[derive(Debug, Default)]
pub struct StructuralValidator;

impl ConfigValidator for StructuralValidator {
    fn validate(&self, doc: &Map<String, Value>) -> std::result::Result<(), Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        if doc.contains_key("extends") {
            issues.push(ValidationIssue::new(
                "extends",
                "must not appear in a resolved document",
            ));
        }

        for section in OBJECT_SECTIONS {
            if let Some(value) = doc.get(section) {
                if !value.is_object() {
                    issues.push(ValidationIssue::new(
                        section,
                        format!("must be an object, got {}", type_name(value)),
                    ));
                }
            }
        }

        if issues.is_empty() { Ok(()) } else { Err(issues) }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_valid_document_passes() {
        let validator = StructuralValidator;
        let document = doc(json!({
            "$schema": "https://example.com/schema.json",
            "skills": {},
            "mcp": {"github": {"command": "x"}},
            "editors": {"zed": {}}
        }));
        assert!(validator.validate(&document).is_ok());
    }

    #[test]
    fn test_non_object_section_flagged() {
        let validator = StructuralValidator;
        let document = doc(json!({"skills": ["not", "a", "map"]}));
        let issues = validator.validate(&document).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "skills");
    }

    #[test]
    fn test_stray_extends_flagged() {
        let validator = StructuralValidator;
        let document = doc(json!({"extends": "./base.json"}));
        let issues = validator.validate(&document).unwrap_err();
        assert!(issues.iter().any(|i| i.path == "extends"));
    }
}
