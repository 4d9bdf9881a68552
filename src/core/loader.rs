//! Workflow input loading
//!
//! Workflow files are YAML or JSON, picked by extension (`.json` is JSON,
//! everything else YAML, which also accepts plain JSON). `-` reads stdin.

use miette::Diagnostic;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::entities::WorkflowInput;
use crate::yaml::YamlSyntaxError;

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("Cannot read {path}")]
    #[diagnostic(code(prepflow::input::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] YamlSyntaxError),
}

/// Input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Yaml,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
            _ => InputFormat::Yaml,
        }
    }
}

/// Read and parse a workflow file, `-` for stdin
pub fn load_workflow(path: &Path) -> Result<WorkflowInput, LoadError> {
    let (content, name) = read_source(path)?;
    let input = parse_workflow(&content, &name, InputFormat::from_path(path))?;
    tracing::debug!(file = %name, stages = input.process_stages.len(), "loaded workflow input");
    Ok(input)
}

/// Read a file (or stdin for `-`) into a string plus display name
pub fn read_source(path: &Path) -> Result<(String, String), LoadError> {
    let name = path.display().to_string();
    let io_err = |source| LoadError::Io {
        path: name.clone(),
        source,
    };

    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_err)?
    };

    Ok((content, name))
}

/// Parse workflow input text
///
/// An empty document yields the default input (no stages).
pub fn parse_workflow(
    content: &str,
    filename: &str,
    format: InputFormat,
) -> Result<WorkflowInput, LoadError> {
    if content.trim().is_empty() {
        return Ok(WorkflowInput::default());
    }

    let input = match format {
        InputFormat::Json => serde_json::from_str(content)
            .map_err(|e| YamlSyntaxError::from_json_error(&e, content, filename))?,
        InputFormat::Yaml => serde_yml::from_str(content)
            .map_err(|e| YamlSyntaxError::from_serde_error(&e, content, filename))?,
    };

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Hardness, ProcessStage, SampleSize};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_yaml_form_labels() {
        let yaml = r#"
processStages: [sectioning, grinding]
materialHardness: "Very Hard (> 65 HRC)"
sampleSize: "Large (50-100mm)"
materialType: Hard Metals (Carbides)
"#;
        let input = parse_workflow(yaml, "w.yaml", InputFormat::Yaml).unwrap();
        assert_eq!(
            input.process_stages,
            vec![ProcessStage::Sectioning, ProcessStage::Grinding]
        );
        assert_eq!(input.material_hardness, Hardness::VeryHard);
        assert_eq!(input.sample_size, SampleSize::Large);
        assert_eq!(input.material_type, "Hard Metals (Carbides)");
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"processStages": ["etching"], "materialType": "Carbon Steel"}"#;
        let input = parse_workflow(json, "w.json", InputFormat::Json).unwrap();
        assert_eq!(input.process_stages, vec![ProcessStage::Etching]);
    }

    #[test]
    fn test_empty_document_is_default() {
        let input = parse_workflow("  \n", "w.yaml", InputFormat::Yaml).unwrap();
        assert!(input.process_stages.is_empty());
    }

    #[test]
    fn test_syntax_error_is_diagnostic() {
        let err = parse_workflow("processStages: [grinding\n", "w.yaml", InputFormat::Yaml)
            .unwrap_err();
        assert!(matches!(err, LoadError::Syntax(_)));
        assert!(err.to_string().starts_with("YAML syntax error"));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.json");
        fs::write(&path, r#"{"processStages": ["cleaning"]}"#).unwrap();
        assert_eq!(
            load_workflow(&path).unwrap().process_stages,
            vec![ProcessStage::Cleaning]
        );

        assert_eq!(InputFormat::from_path(Path::new("a.yml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.JSON")), InputFormat::Json);
    }

    #[test]
    fn test_missing_file() {
        let err = load_workflow(Path::new("/nonexistent/workflow.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
