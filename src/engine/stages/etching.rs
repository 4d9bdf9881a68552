//! Etching rules
//!
//! The ventilation recommendation is unconditional: any workflow that etches
//! gets exactly one fume hood, whatever else the input says.

use crate::core::links::{self, link};
use crate::engine::stages::StageContext;
use crate::engine::text::{human_list, sentences};
use crate::entities::{Recommendation, Stage};

pub(super) fn evaluate(ctx: &StageContext<'_>) -> Vec<Recommendation> {
    vec![
        Recommendation::equipment(
            Stage::Etching,
            "Fume Hood / Ventilation System",
            "SAFETY CRITICAL: Essential for safe handling of etchants. Protects operators from chemical fumes and ensures compliance with safety regulations. Required for all etching operations.",
        ),
        Recommendation::consumable(Stage::Etching, "Etchants (material-specific)", etchant_reasoning(ctx)),
    ]
}

fn etchant_reasoning(ctx: &StageContext<'_>) -> String {
    let material = ctx.input.selected_material.as_ref();

    let known = material
        .filter(|m| !m.common_etchants.is_empty())
        .map(|m| format!("Common etchants for {}: {}.", m.name, human_list(&m.common_etchants)))
        .unwrap_or_default();
    // Link labels stay fixed; free-form names would break the markup
    let page = material
        .and_then(|m| m.page_path().map(|path| (m.name.as_str(), path)))
        .map(|(name, path)| {
            format!(
                "Preparation notes for {} are on its {}.",
                name,
                link(links::MATERIAL_PAGE_LABEL, &path)
            )
        })
        .unwrap_or_default();

    sentences([
        format!(
            "Select etchants appropriate for {}.",
            ctx.material_type_or("your material")
        ),
        known,
        "Common options include nital for carbon steels, Vilella's for stainless steel, and Kroll's for titanium.".to_string(),
        format!(
            "Use the {} to find the right etchant for your material, or browse the {} for comprehensive information.",
            link("Etchant Selector tool", links::ETCHANT_SELECTOR),
            link("Etchants Database", links::ETCHANTS_DATABASE)
        ),
        page,
    ])
}
