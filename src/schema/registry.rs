//! Embedded JSON schemas

use rust_embed::Embed;
use std::collections::HashMap;
use std::path::Path;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// Which kind of document a schema describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Workflow,
    Material,
}

impl SchemaKind {
    pub const ALL: &'static [SchemaKind] = &[SchemaKind::Workflow, SchemaKind::Material];

    pub fn filename(&self) -> &'static str {
        match self {
            SchemaKind::Workflow => "workflow.schema.json",
            SchemaKind::Material => "material.schema.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Workflow => "workflow",
            SchemaKind::Material => "material",
        }
    }

    /// Guess the document kind from its location and top-level keys
    ///
    /// Files inside a `materials` directory, or documents with a `name` but
    /// no `processStages`, are material entries. Everything else is a
    /// workflow.
    pub fn detect(path: &Path, value: &serde_json::Value) -> Self {
        let in_materials_dir = path
            .parent()
            .and_then(|p| p.file_name())
            .is_some_and(|n| n == "materials");
        let looks_like_material =
            value.get("name").is_some() && value.get("processStages").is_none();

        if in_materials_dir || looks_like_material {
            SchemaKind::Material
        } else {
            SchemaKind::Workflow
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Schema sources by kind
pub struct SchemaRegistry {
    schemas: HashMap<SchemaKind, String>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        let mut schemas = HashMap::new();

        for kind in SchemaKind::ALL {
            if let Some(file) = EmbeddedSchemas::get(kind.filename()) {
                if let Ok(text) = std::str::from_utf8(&file.data) {
                    schemas.insert(*kind, text.to_string());
                }
            }
        }

        Self { schemas }
    }
}

impl SchemaRegistry {
    pub fn get(&self, kind: SchemaKind) -> Option<&str> {
        self.schemas.get(&kind).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_schemas_embedded_and_parse() {
        let registry = SchemaRegistry::default();
        for kind in SchemaKind::ALL {
            let text = registry.get(*kind).unwrap();
            let value: serde_json::Value = serde_json::from_str(text).unwrap();
            assert_eq!(value["type"], "object");
        }
    }

    #[test]
    fn test_detect_kind() {
        let material = json!({"name": "AISI 1045"});
        let workflow = json!({"processStages": ["grinding"]});

        assert_eq!(SchemaKind::detect(Path::new("x.yaml"), &material), SchemaKind::Material);
        assert_eq!(SchemaKind::detect(Path::new("x.yaml"), &workflow), SchemaKind::Workflow);
        assert_eq!(
            SchemaKind::detect(Path::new("lib/materials/x.yaml"), &workflow),
            SchemaKind::Material
        );
    }
}
