//! Grinding and polishing sequences
//!
//! A selected material's stored sequence always wins. Without one, the
//! sequence is synthesized from the hardness tier: soft materials start at
//! a finer grit to limit deformation, everything else runs the full
//! extended sequence.

use serde::Serialize;

use crate::engine::features::Features;
use crate::entities::WorkflowInput;

const SOFT_GRINDING: &[&str] = &["240", "320", "400", "600"];
const FULL_GRINDING: &[&str] = &["120", "240", "320", "400", "600", "800", "1200"];

const SOFT_POLISHING: &[&str] = &["6", "3", "1", "0.5", "0.25"];
const FULL_POLISHING: &[&str] = &["9", "6", "3", "1", "0.5", "0.25"];

/// Where a sequence came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceSource {
    Material,
    Heuristic,
}

/// Ordered grit or particle-size labels, coarse to fine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GritSequence {
    steps: Vec<String>,
    source: SequenceSource,
}

impl GritSequence {
    fn from_material(steps: &[String]) -> Self {
        Self {
            steps: steps.to_vec(),
            source: SequenceSource::Material,
        }
    }

    fn heuristic(steps: &[&str]) -> Self {
        Self {
            steps: steps.iter().map(|s| s.to_string()).collect(),
            source: SequenceSource::Heuristic,
        }
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn source(&self) -> SequenceSource {
        self.source
    }

    /// Comma-separated list, e.g. `"120, 240, 320"`
    pub fn list(&self) -> String {
        self.steps.join(", ")
    }

    /// First-to-last range, e.g. `"120-1200 grit"`
    pub fn range(&self) -> String {
        match (self.steps.first(), self.steps.last()) {
            (Some(first), Some(last)) => format!("{}-{} grit", first, last),
            _ => "progressive grit sizes".to_string(),
        }
    }

    pub fn contains(&self, step: &str) -> bool {
        self.steps.iter().any(|s| s == step)
    }

    /// Includes one of the optional fine grits (800, 1200)
    pub fn has_fine_grits(&self) -> bool {
        self.contains("800") || self.contains("1200")
    }

    /// First diamond size of at least 3 µm, `"3"` when there is none
    pub fn coarse_diamond(&self) -> &str {
        self.steps
            .iter()
            .find(|s| leading_number(s).is_some_and(|n| n >= 3.0))
            .map(String::as_str)
            .unwrap_or("3")
    }
}

/// Grinding sequence for this workflow
pub fn grinding_sequence(input: &WorkflowInput, features: &Features) -> GritSequence {
    if let Some(steps) = input
        .selected_material
        .as_ref()
        .and_then(|m| m.grinding_sequence())
    {
        return GritSequence::from_material(steps);
    }

    if features.is_soft {
        GritSequence::heuristic(SOFT_GRINDING)
    } else {
        GritSequence::heuristic(FULL_GRINDING)
    }
}

/// Diamond polishing sequence for this workflow
pub fn polishing_sequence(input: &WorkflowInput, features: &Features) -> GritSequence {
    if let Some(steps) = input
        .selected_material
        .as_ref()
        .and_then(|m| m.polishing_sequence())
    {
        return GritSequence::from_material(steps);
    }

    if features.is_soft {
        GritSequence::heuristic(SOFT_POLISHING)
    } else {
        GritSequence::heuristic(FULL_POLISHING)
    }
}

/// Numeric prefix of a label such as `"0.25"`, `"9 µm"` or `"P1200"`
fn leading_number(label: &str) -> Option<f64> {
    let digits: String = label
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Hardness, Material};

    fn sequence_for(hardness: Hardness) -> GritSequence {
        let input = WorkflowInput::new(["grinding"]).with_hardness(hardness);
        grinding_sequence(&input, &Features::derive(&input))
    }

    #[test]
    fn test_soft_sequence_starts_finer() {
        let soft = sequence_for(Hardness::Soft);
        assert_eq!(soft.list(), "240, 320, 400, 600");
        assert_eq!(soft.range(), "240-600 grit");
        assert!(!soft.has_fine_grits());
        assert_eq!(soft.source(), SequenceSource::Heuristic);
    }

    #[test]
    fn test_very_hard_covers_soft() {
        let soft = sequence_for(Hardness::Soft);
        let very_hard = sequence_for(Hardness::VeryHard);

        for grit in soft.steps() {
            assert!(very_hard.contains(grit), "missing {}", grit);
        }
        let first = |s: &GritSequence| leading_number(&s.steps()[0]).unwrap();
        assert!(first(&very_hard) <= first(&soft));
        assert!(very_hard.has_fine_grits());
    }

    #[test]
    fn test_material_sequence_is_verbatim() {
        let material = Material::new("Custom")
            .with_grinding_sequence(["P180", "P600"])
            .with_polishing_sequence(["6 µm", "1 µm"]);
        let input = WorkflowInput::new(["grinding"])
            .with_hardness(Hardness::Soft)
            .with_material(material);
        let features = Features::derive(&input);

        let grinding = grinding_sequence(&input, &features);
        assert_eq!(grinding.list(), "P180, P600");
        assert_eq!(grinding.source(), SequenceSource::Material);

        let polishing = polishing_sequence(&input, &features);
        assert_eq!(polishing.steps(), &["6 µm".to_string(), "1 µm".to_string()]);
        assert_eq!(polishing.coarse_diamond(), "6 µm");
    }

    #[test]
    fn test_empty_material_sequence_falls_back() {
        let input = WorkflowInput::new(["polishing"])
            .with_hardness(Hardness::Soft)
            .with_material(Material::new("No data"));
        let features = Features::derive(&input);

        let polishing = polishing_sequence(&input, &features);
        assert_eq!(polishing.list(), "6, 3, 1, 0.5, 0.25");
        assert_eq!(polishing.source(), SequenceSource::Heuristic);
    }

    #[test]
    fn test_coarse_diamond() {
        let input = WorkflowInput::new(["polishing"]);
        let features = Features::derive(&input);
        assert_eq!(polishing_sequence(&input, &features).coarse_diamond(), "9");

        let fine_only = GritSequence::heuristic(&["1", "0.25"]);
        assert_eq!(fine_only.coarse_diamond(), "3");
    }

    #[test]
    fn test_empty_range() {
        let empty = GritSequence::heuristic(&[]);
        assert_eq!(empty.range(), "progressive grit sizes");
        assert_eq!(empty.list(), "");
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("0.25"), Some(0.25));
        assert_eq!(leading_number("9 µm"), Some(9.0));
        assert_eq!(leading_number("P1200"), Some(1200.0));
        assert_eq!(leading_number("fine"), None);
    }
}
