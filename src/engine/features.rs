//! Feature derivation
//!
//! Every rule block reads these flags instead of inspecting raw input, so
//! the interpretation of the form lives in exactly one place.

use serde::Serialize;

use crate::entities::{Application, Hardness, WorkflowInput};

/// Flags derived once per evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Features {
    /// Effective hardness tier (input, or the selected material's tier)
    pub hardness: Hardness,

    /// Hard or very hard
    pub is_hard: bool,
    pub is_very_hard: bool,
    pub is_soft: bool,

    /// Large or very large
    pub is_large: bool,
    pub is_very_large: bool,
    pub is_small: bool,

    /// Thin sections and small/delicate parts
    pub is_delicate: bool,

    /// High or very high
    pub is_high_throughput: bool,
    pub is_very_high_throughput: bool,

    pub is_automated: bool,
    pub is_semi_automated: bool,

    /// EBSD application, or an EBSD-grade surface finish
    pub needs_ebsd: bool,

    /// Hard metals (carbides) or ceramics
    pub is_hard_material: bool,
    pub is_brittle: bool,
}

impl Features {
    /// Derive flags from a workflow input. Never fails.
    pub fn derive(input: &WorkflowInput) -> Self {
        let hardness = effective_hardness(input);
        let hard_class = is_hard_material_class(input);

        let features = Self {
            hardness,
            is_hard: hardness.is_hard(),
            is_very_hard: hardness.is_very_hard(),
            is_soft: hardness.is_soft(),
            is_large: input.sample_size.is_large(),
            is_very_large: input.sample_size.is_very_large(),
            is_small: input.sample_size.is_small(),
            is_delicate: input.sample_shape.is_delicate(),
            is_high_throughput: input.throughput.is_high(),
            is_very_high_throughput: input.throughput.is_very_high(),
            is_automated: input.automation.is_automated(),
            is_semi_automated: input.automation.is_semi_automated(),
            needs_ebsd: input.has_application(&Application::Ebsd)
                || input.surface_finish.is_ebsd_grade(),
            is_hard_material: hard_class,
            is_brittle: hard_class,
        };

        tracing::debug!(?features, "derived workflow features");
        features
    }

    /// Hard-material class or very hard tier; selects SiC abrasives and the
    /// extended sequences
    pub fn wants_aggressive_abrasive(&self) -> bool {
        self.is_hard_material || self.is_very_hard
    }
}

/// Input hardness, falling back to the selected material's category
fn effective_hardness(input: &WorkflowInput) -> Hardness {
    match input.material_hardness {
        Hardness::Unspecified => input
            .selected_material
            .as_ref()
            .and_then(|m| m.hardness())
            .unwrap_or(Hardness::Unspecified),
        explicit => explicit,
    }
}

/// Material type (or the selected material's category) names hard metals or
/// ceramics
fn is_hard_material_class(input: &WorkflowInput) -> bool {
    let names_hard_class = |label: &str| {
        let l = label.to_lowercase();
        l.contains("hard metal") || l.contains("ceramic")
    };

    names_hard_class(&input.material_type)
        || input
            .selected_material
            .as_ref()
            .and_then(|m| m.category.as_deref())
            .is_some_and(names_hard_class)
}
