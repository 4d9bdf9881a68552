//! Material entity - authoritative preparation data for a specific material

use serde::{Deserialize, Serialize};

use crate::core::links;
use crate::entities::tiers::Hardness;

/// A material record from the material library
///
/// When present on a workflow, its stored grinding and polishing sequences
/// replace the sequences the engine would otherwise synthesize from the
/// hardness tier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name (e.g., "Stainless Steel 304")
    pub name: String,

    /// URL slug used for lookup and the material page path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Material family (e.g., "Austenitic Stainless Steel")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Hardness tier (soft, medium, hard, very-hard)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_category"
    )]
    pub hardness_category: Option<Hardness>,

    /// Grit labels, coarse to fine
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_grinding_sequence: Vec<String>,

    /// Particle sizes in µm, coarse to fine
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_polishing_sequence: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_etchants: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_notes: Option<String>,
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_hardness(mut self, hardness: Hardness) -> Self {
        self.hardness_category = Some(hardness);
        self
    }

    pub fn with_grinding_sequence<I, S>(mut self, grits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommended_grinding_sequence = grits.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_polishing_sequence<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommended_polishing_sequence = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Stored grinding sequence, `None` when empty
    pub fn grinding_sequence(&self) -> Option<&[String]> {
        non_empty(&self.recommended_grinding_sequence)
    }

    /// Stored polishing sequence, `None` when empty
    pub fn polishing_sequence(&self) -> Option<&[String]> {
        non_empty(&self.recommended_polishing_sequence)
    }

    /// Hardness tier, ignoring an explicit `Unspecified`
    pub fn hardness(&self) -> Option<Hardness> {
        self.hardness_category
            .filter(|h| *h != Hardness::Unspecified)
    }

    /// Case-insensitive match against slug or name
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        self.slug
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(key))
            || self.name.eq_ignore_ascii_case(key)
    }

    /// Site path of the material page, if the material has a slug
    pub fn page_path(&self) -> Option<String> {
        self.slug
            .as_deref()
            .map(|slug| format!("{}/{}", links::MATERIALS, slug))
    }
}

fn serialize_category<S>(hardness: &Option<Hardness>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match hardness.and_then(|h| h.category()) {
        Some(category) => serializer.serialize_str(category),
        None => serializer.serialize_none(),
    }
}

fn non_empty(seq: &[String]) -> Option<&[String]> {
    if seq.is_empty() {
        None
    } else {
        Some(seq)
    }
}
