//! Schema validation with detailed error reporting

use jsonschema::error::ValidationErrorKind;
use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::loader::{read_source, InputFormat, LoadError};
use crate::schema::registry::{SchemaKind, SchemaRegistry};

/// Validation error with source location information
#[derive(Debug, Error, Diagnostic)]
#[error("Schema validation failed: {summary}")]
#[diagnostic(code(prepflow::schema::validation_error))]
pub struct ValidationError {
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<SchemaViolation>,
}

/// A single schema violation
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaViolation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl SchemaViolation {
    pub fn new(message: String, hint: String, span: SourceSpan, help: Option<String>) -> Self {
        Self {
            span,
            message,
            hint,
            help,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ValidationError {
    pub fn new(filename: &str, source: &str, violations: Vec<SchemaViolation>) -> Self {
        let count = violations.len();
        let summary = if count == 1 {
            "1 error".to_string()
        } else {
            format!("{} errors", count)
        };
        Self {
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }
}

/// Why a file could not be validated
#[derive(Debug, Error, Diagnostic)]
pub enum ValidateFileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(#[from] ValidationError),
}

/// Schema validator with compiled schemas
pub struct Validator {
    compiled: HashMap<SchemaKind, JsonValidator>,
}

impl Validator {
    pub fn new(registry: &SchemaRegistry) -> Self {
        let mut compiled = HashMap::new();

        for kind in SchemaKind::ALL {
            let Some(schema_str) = registry.get(*kind) else {
                continue;
            };
            match serde_json::from_str::<JsonValue>(schema_str)
                .map_err(|e| e.to_string())
                .and_then(|json| validator_for(&json).map_err(|e| e.to_string()))
            {
                Ok(validator) => {
                    compiled.insert(*kind, validator);
                }
                Err(e) => tracing::warn!(schema = %kind, error = %e, "schema failed to compile"),
            }
        }

        Self { compiled }
    }

    /// Validate document text, collecting every violation
    pub fn validate(
        &self,
        content: &str,
        filename: &str,
        format: InputFormat,
        kind: SchemaKind,
    ) -> Result<(), ValidationError> {
        let value = parse_value(content, filename, format)?;
        self.validate_value(&value, content, filename, kind)
    }

    fn validate_value(
        &self,
        value: &JsonValue,
        content: &str,
        filename: &str,
        kind: SchemaKind,
    ) -> Result<(), ValidationError> {
        let Some(schema) = self.compiled.get(&kind) else {
            return Ok(());
        };

        let violations: Vec<SchemaViolation> = schema
            .iter_errors(value)
            .map(|e| error_to_violation(content, &e))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(filename, content, violations))
        }
    }

    /// Validate a file, detecting whether it is a workflow or a material
    pub fn validate_file(&self, path: &Path) -> Result<SchemaKind, ValidateFileError> {
        let (content, filename) = read_source(path)?;
        let format = InputFormat::from_path(path);
        let value = parse_value(&content, &filename, format)?;
        let kind = SchemaKind::detect(path, &value);

        self.validate_value(&value, &content, &filename, kind)?;
        Ok(kind)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&SchemaRegistry::default())
    }
}

/// Parse YAML or JSON into a JSON value, reporting syntax problems as a
/// single violation
fn parse_value(
    content: &str,
    filename: &str,
    format: InputFormat,
) -> Result<JsonValue, ValidationError> {
    let parsed = match format {
        InputFormat::Json => serde_json::from_str::<JsonValue>(content).map_err(|e| {
            let offset = crate::yaml::diagnostics::line_col_to_offset(content, e.line(), e.column());
            (format!("JSON parse error: {}", e), line_span(content, offset))
        }),
        InputFormat::Yaml => serde_yml::from_str::<serde_yml::Value>(content)
            .map_err(|e| {
                (
                    format!("YAML parse error: {}", e),
                    find_error_span(content, e.location()),
                )
            })
            .and_then(|yaml| {
                serde_json::to_value(&yaml).map_err(|e| {
                    (
                        format!("Failed to convert YAML to JSON: {}", e),
                        (0, content.len()).into(),
                    )
                })
            }),
    };

    parsed.map_err(|(message, span)| {
        let violation = SchemaViolation::new(
            message,
            "invalid syntax".to_string(),
            span,
            Some("Check syntax - proper indentation, colons, quotes".to_string()),
        );
        ValidationError::new(filename, content, vec![violation])
    })
}

/// Convert a JSON Schema validation error to our violation format
fn error_to_violation(content: &str, error: &JsonSchemaError) -> SchemaViolation {
    let path = error.instance_path.to_string();
    let message = format_schema_error(error);
    let hint = format_error_hint(error);
    let help = generate_help_message(error);
    let span = find_path_span(content, &path);

    SchemaViolation::new(message, hint, span, help)
}

fn format_schema_error(error: &JsonSchemaError) -> String {
    let path = if error.instance_path.as_str().is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", error.instance_path)
    };

    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            format!("Missing required field: {} at {}", prop_str, path)
        }
        ValidationErrorKind::Type { kind } => {
            format!("Wrong type at {}: expected {:?}", path, kind)
        }
        ValidationErrorKind::Enum { options } => {
            format!(
                "Invalid value at {}: must be one of: {}",
                path,
                format_enum_options(options)
            )
        }
        ValidationErrorKind::Pattern { pattern } => {
            format!("Value at {} doesn't match pattern: {}", path, pattern)
        }
        ValidationErrorKind::MinLength { limit } => {
            format!("Value at {} is too short: minimum {} characters", path, limit)
        }
        ValidationErrorKind::UniqueItems => {
            format!("Duplicate entries at {}", path)
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            format!("Unknown field(s) at {}: {}", path, unexpected.join(", "))
        }
        _ => format!("Validation error at {}: {}", path, error),
    }
}

fn format_enum_options(options: &JsonValue) -> String {
    if let Some(arr) = options.as_array() {
        arr.iter()
            .map(|v| v.as_str().map(|s| s.to_string()).unwrap_or_else(|| v.to_string()))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        options.to_string()
    }
}

/// Short hint for the error label
fn format_error_hint(error: &JsonSchemaError) -> String {
    match &error.kind {
        ValidationErrorKind::Required { .. } => "required field missing",
        ValidationErrorKind::Type { .. } => "wrong type",
        ValidationErrorKind::Enum { .. } => "invalid value",
        ValidationErrorKind::Pattern { .. } => "pattern mismatch",
        ValidationErrorKind::MinLength { .. } => "too short",
        ValidationErrorKind::UniqueItems => "duplicate",
        ValidationErrorKind::AdditionalProperties { .. } => "unknown field",
        _ => "validation error",
    }
    .to_string()
}

fn generate_help_message(error: &JsonSchemaError) -> Option<String> {
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            Some(format!("Add the '{}' field to your file", prop_str))
        }
        ValidationErrorKind::Enum { options } => {
            Some(format!("Valid values: {}", format_enum_options(options)))
        }
        ValidationErrorKind::Pattern { .. } => {
            Some("Slugs are lowercase words joined by hyphens, e.g. ss-304".to_string())
        }
        ValidationErrorKind::Type { kind } => Some(format!("Expected value of type: {:?}", kind)),
        ValidationErrorKind::AdditionalProperties { unexpected } => {
            if unexpected.len() == 1 {
                Some(format!(
                    "Remove the '{}' field or check spelling (run `prepflow options` for field names)",
                    unexpected[0]
                ))
            } else {
                Some("Remove unknown fields or check spelling".to_string())
            }
        }
        _ => None,
    }
}

/// Span of the rest of the line starting at `offset`
fn line_span(content: &str, offset: usize) -> SourceSpan {
    let offset = offset.min(content.len());
    let rest = &content[offset..];
    let len = rest.find('\n').unwrap_or(rest.len()).max(1);
    (offset, len).into()
}

fn find_error_span(content: &str, location: Option<serde_yml::Location>) -> SourceSpan {
    match location {
        Some(loc) => line_span(content, loc.index()),
        None => line_span(content, 0),
    }
}

/// Find the span for a JSON pointer in YAML content
fn find_path_span(content: &str, json_path: &str) -> SourceSpan {
    let parts: Vec<&str> = json_path.split('/').filter(|s| !s.is_empty()).collect();

    let Some(last) = parts.last() else {
        return line_span(content, 0);
    };

    // Array index - point at the parent key
    if last.parse::<usize>().is_ok() && parts.len() >= 2 {
        if let Some(span) = find_key_span(content, parts[parts.len() - 2]) {
            return span;
        }
    }

    find_key_span(content, last).unwrap_or_else(|| line_span(content, 0))
}

/// Span of `key:` (or `"key":`) at the start of a line
fn find_key_span(content: &str, key: &str) -> Option<SourceSpan> {
    let plain = format!("{}:", key);
    let quoted = format!("\"{}\":", key);

    let mut offset = 0;
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with(&plain) || trimmed.starts_with(&quoted) {
            let indent = line.len() - trimmed.len();
            return Some((offset + indent, trimmed.len()).into());
        }
        offset += line.len() + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn validate_yaml(yaml: &str, kind: SchemaKind) -> Result<(), ValidationError> {
        Validator::default().validate(yaml, "test.yaml", InputFormat::Yaml, kind)
    }

    #[test]
    fn test_validator_compiles_all_schemas() {
        let validator = Validator::default();
        for kind in SchemaKind::ALL {
            assert!(validator.compiled.contains_key(kind));
        }
    }

    #[test]
    fn test_valid_workflow() {
        let yaml = r#"
processStages: [sectioning, polishing]
materialHardness: "Hard (50-65 HRC)"
applications: ["Quality Control"]
selectedMaterial:
  name: D2 Tool Steel
  hardness_category: hard
"#;
        assert!(validate_yaml(yaml, SchemaKind::Workflow).is_ok());
    }

    #[test]
    fn test_unknown_stage_and_field() {
        let yaml = "processStages: [lapping]\nmaterialHardnes: Hard\n";
        let err = validate_yaml(yaml, SchemaKind::Workflow).unwrap_err();
        assert_eq!(err.violation_count(), 2);
        assert!(err
            .violations()
            .iter()
            .any(|v| v.message().contains("materialHardnes")));
    }

    #[test]
    fn test_material_requires_name() {
        let err = validate_yaml("slug: ss-304\n", SchemaKind::Material).unwrap_err();
        assert!(err.violations()[0].message().contains("Missing required field: name"));
    }

    #[test]
    fn test_bad_hardness_category() {
        let yaml = "name: Mystery\nhardness_category: squishy\n";
        let err = validate_yaml(yaml, SchemaKind::Material).unwrap_err();
        assert!(err.violations()[0].message().contains("must be one of"));
    }

    #[test]
    fn test_syntax_error_is_single_violation() {
        let err = validate_yaml("processStages: [grinding\n", SchemaKind::Workflow).unwrap_err();
        assert_eq!(err.violation_count(), 1);
        assert!(err.violations()[0].message().starts_with("YAML parse error"));
    }

    #[test]
    fn test_validate_file_detects_kind() {
        let dir = tempdir().unwrap();
        let workflow = dir.path().join("run.json");
        fs::write(&workflow, r#"{"processStages": ["etching"]}"#).unwrap();
        assert_eq!(
            Validator::default().validate_file(&workflow).unwrap(),
            SchemaKind::Workflow
        );

        let material = dir.path().join("alloy.yaml");
        fs::write(&material, "name: Alloy 42\nslug: Not A Slug\n").unwrap();
        assert!(matches!(
            Validator::default().validate_file(&material),
            Err(ValidateFileError::Invalid(_))
        ));
    }

    #[test]
    fn test_builtin_materials_are_valid() {
        let validator = Validator::default();
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("materials");
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            assert!(
                validator.validate_file(&path).is_ok(),
                "{} failed validation",
                path.display()
            );
        }
    }

    #[test]
    fn test_find_key_span() {
        let content = "a: 1\n  processStages: []\n";
        let span = find_key_span(content, "processStages").unwrap();
        assert_eq!(span.offset(), 7);
    }
}
