//! Recommendation engine
//!
//! A pure function from a [`WorkflowInput`] to an ordered list of
//! [`Recommendation`]s. Features are derived once, then each selected stage's
//! rule block runs in the fixed [`Stage::ORDER`], so output grouping follows
//! the preparation sequence regardless of how stages were selected.
//!
//! The engine never fails and never looks anything up: material resolution
//! happens beforehand (see [`WorkflowInput::resolve_material`]) and link
//! markup in justification text is left for the renderer.

pub mod features;
pub mod sequence;
pub mod stages;
pub mod text;

use serde::Serialize;
use std::collections::BTreeSet;

pub use features::Features;
pub use sequence::{GritSequence, SequenceSource};

use crate::entities::{Recommendation, Stage, WorkflowInput};
use stages::StageContext;

/// Generate recommendations for a workflow
///
/// Recommendations appear grouped by stage in preparation order. Selecting a
/// stage twice does not duplicate its output, and unrecognised stage
/// identifiers contribute nothing.
pub fn generate_recommendations(input: &WorkflowInput) -> Vec<Recommendation> {
    RecommendationEngine::new().generate(input)
}

/// Stateless engine handle
///
/// Holds no configuration; exists so callers can pass the engine around as a
/// value alongside other collaborators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, input: &WorkflowInput) -> Vec<Recommendation> {
        let selected = selected_stages(input);
        if selected.is_empty() {
            tracing::debug!("no recognised stages selected");
            return Vec::new();
        }

        let features = Features::derive(input);
        let ctx = StageContext::new(input, &features);

        let mut recommendations = Vec::new();
        for stage in Stage::ORDER.into_iter().filter(|s| selected.contains(s)) {
            let recs = stages::evaluate(stage, &ctx);
            tracing::debug!(stage = stage.as_str(), count = recs.len(), "evaluated stage");
            recommendations.extend(recs);
        }

        recommendations
    }

    /// Derived flags and abrasive sequences, for diagnostics and `--explain` output
    pub fn explain(&self, input: &WorkflowInput) -> Explanation {
        let features = Features::derive(input);
        Explanation {
            grinding: sequence::grinding_sequence(input, &features),
            polishing: sequence::polishing_sequence(input, &features),
            features,
        }
    }
}

/// What the rule blocks see for one input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    #[serde(flatten)]
    pub features: Features,
    pub grinding: GritSequence,
    pub polishing: GritSequence,
}

/// Output stages to evaluate for the selected process stages
pub fn selected_stages(input: &WorkflowInput) -> BTreeSet<Stage> {
    input
        .process_stages
        .iter()
        .flat_map(|s| s.stages().iter().copied())
        .collect()
}
