//! Material library - the material lookup collaborator
//!
//! Built-in materials are embedded from `materials/*.yaml`. A user
//! directory can extend the library; a user file with the same slug (or
//! name, when there is no slug) replaces the built-in entry.

use rust_embed::Embed;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

use crate::entities::Material;

#[derive(Embed)]
#[folder = "materials/"]
struct EmbeddedMaterials;

/// Anything that can find a material by slug or name
pub trait MaterialLookup {
    fn find(&self, key: &str) -> Option<&Material>;
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),
}

/// In-memory material library
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    /// Library containing only the embedded materials
    pub fn builtin() -> Self {
        let mut library = Self::default();

        for file in EmbeddedMaterials::iter() {
            let filename = file.as_ref();
            let Some(content) = EmbeddedMaterials::get(filename) else {
                continue;
            };
            let Ok(text) = std::str::from_utf8(&content.data) else {
                tracing::warn!(file = filename, "skipping non-UTF-8 material file");
                continue;
            };
            match serde_yml::from_str::<Material>(text) {
                Ok(material) => library.insert(material),
                Err(e) => tracing::warn!(file = filename, error = %e, "skipping invalid material file"),
            }
        }

        tracing::debug!(count = library.len(), "loaded built-in materials");
        library
    }

    /// Embedded materials extended with `dir`, if given
    pub fn load(dir: Option<&Path>) -> Self {
        let mut library = Self::builtin();
        if let Some(dir) = dir {
            library.extend_from_dir(dir);
        }
        library
    }

    pub fn from_materials(materials: Vec<Material>) -> Self {
        let mut library = Self::default();
        for material in materials {
            library.insert(material);
        }
        library
    }

    /// Add every `.yaml`/`.yml` material under `dir`
    ///
    /// Files that fail to parse are skipped with a warning. Returns the
    /// number of materials added or replaced.
    pub fn extend_from_dir(&mut self, dir: &Path) -> usize {
        if !dir.is_dir() {
            tracing::warn!(path = %dir.display(), "material directory not found");
            return 0;
        }

        let mut added = 0;
        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let is_yaml = path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if !is_yaml {
                continue;
            }

            let parsed = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    serde_yml::from_str::<Material>(&content).map_err(|e| e.to_string())
                });
            match parsed {
                Ok(material) => {
                    self.insert(material);
                    added += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping material file")
                }
            }
        }

        tracing::debug!(path = %dir.display(), added, "extended material library");
        added
    }

    /// Insert, replacing any entry with the same identity
    pub fn insert(&mut self, material: Material) {
        let key = identity(&material);
        if let Some(existing) = self.materials.iter_mut().find(|m| identity(m) == key) {
            *existing = material;
        } else {
            self.materials.push(material);
        }
    }

    /// Materials sorted by name
    pub fn materials(&self) -> Vec<&Material> {
        let mut all: Vec<&Material> = self.materials.iter().collect();
        all.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        all
    }

    /// Case-insensitive substring search over name, slug and category
    pub fn search(&self, query: &str) -> Vec<&Material> {
        let query = query.trim().to_lowercase();
        self.materials()
            .into_iter()
            .filter(|m| {
                query.is_empty()
                    || m.name.to_lowercase().contains(&query)
                    || m.slug.as_deref().is_some_and(|s| s.contains(&query))
                    || m.category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&query))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialLookup for MaterialLibrary {
    fn find(&self, key: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.matches(key))
    }
}

fn identity(material: &Material) -> String {
    material
        .slug
        .clone()
        .unwrap_or_else(|| material.name.clone())
        .to_lowercase()
}
