//! Per-stage rule blocks
//!
//! Each block inspects the derived [`Features`] plus its own stage
//! refinements and emits recommendations in rule declaration order. Blocks
//! are independent: several rules in one block may fire together, and
//! nothing is deduplicated.

mod cleaning;
mod etching;
mod final_polishing;
mod grinding;
mod hardness;
mod microscopy;
mod mounting;
mod polishing;
mod sectioning;

use crate::engine::features::Features;
use crate::entities::{Recommendation, Stage, WorkflowInput};

/// Read-only view handed to every rule block
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    pub input: &'a WorkflowInput,
    pub features: &'a Features,
}

impl<'a> StageContext<'a> {
    pub fn new(input: &'a WorkflowInput, features: &'a Features) -> Self {
        Self { input, features }
    }

    /// Material type as typed, or `fallback` when blank
    pub fn material_type_or(&self, fallback: &'a str) -> &'a str {
        crate::engine::text::or_default(&self.input.material_type, fallback)
    }
}

/// Run the rule block for one stage
pub fn evaluate(stage: Stage, ctx: &StageContext<'_>) -> Vec<Recommendation> {
    match stage {
        Stage::Sectioning => sectioning::evaluate(ctx),
        Stage::Mounting => mounting::evaluate(ctx),
        Stage::Grinding => grinding::evaluate(ctx),
        Stage::Polishing => polishing::evaluate(ctx),
        Stage::FinalPolishing => final_polishing::evaluate(ctx),
        Stage::Etching => etching::evaluate(ctx),
        Stage::Microscopy => microscopy::evaluate(ctx),
        Stage::Cleaning => cleaning::evaluate(ctx),
        Stage::Hardness => hardness::evaluate(ctx),
    }
}

/// Grinder/polisher platen size label
pub(crate) fn platen_size(features: &Features) -> &'static str {
    if features.is_large {
        "12 inch"
    } else {
        "8-10 inch"
    }
}

/// Grinder/polisher control label
pub(crate) fn control_type(features: &Features) -> &'static str {
    if features.is_automated {
        "Programmable"
    } else if features.is_semi_automated {
        "Semi-automated"
    } else {
        "Manual"
    }
}
