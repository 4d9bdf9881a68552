//! Recommendation records produced by the engine

use serde::{Deserialize, Serialize};

/// Whether a recommendation is a piece of equipment or a consumable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Equipment,
    Consumable,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Equipment => write!(f, "equipment"),
            Category::Consumable => write!(f, "consumable"),
        }
    }
}

/// Stage a recommendation belongs to
///
/// `FinalPolishing` is never selected directly; it is evaluated whenever
/// polishing is selected and carries the terminal finishing step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Sectioning,
    Mounting,
    Grinding,
    Polishing,
    FinalPolishing,
    Etching,
    Microscopy,
    Cleaning,
    Hardness,
}

impl Stage {
    /// Fixed evaluation order
    pub const ORDER: [Stage; 9] = [
        Stage::Sectioning,
        Stage::Mounting,
        Stage::Grinding,
        Stage::Polishing,
        Stage::FinalPolishing,
        Stage::Etching,
        Stage::Microscopy,
        Stage::Cleaning,
        Stage::Hardness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Sectioning => "sectioning",
            Stage::Mounting => "mounting",
            Stage::Grinding => "grinding",
            Stage::Polishing => "polishing",
            Stage::FinalPolishing => "final-polishing",
            Stage::Etching => "etching",
            Stage::Microscopy => "microscopy",
            Stage::Cleaning => "cleaning",
            Stage::Hardness => "hardness",
        }
    }

    /// Heading used when grouping output
    pub fn title(&self) -> &'static str {
        match self {
            Stage::Sectioning => "Sectioning",
            Stage::Mounting => "Mounting",
            Stage::Grinding => "Grinding",
            Stage::Polishing => "Polishing",
            Stage::FinalPolishing => "Final Polishing",
            Stage::Etching => "Etching",
            Stage::Microscopy => "Microscopy",
            Stage::Cleaning => "Cleaning",
            Stage::Hardness => "Hardness Testing",
        }
    }

    /// The selectable stage that gates this one
    pub fn parent(&self) -> Stage {
        match self {
            Stage::FinalPolishing => Stage::Polishing,
            other => *other,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recommended equipment class or consumable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Item or equipment class label
    #[serde(rename = "type")]
    pub item_type: String,

    /// Justification text; may contain `[label](path)` link markup
    pub reasoning: String,

    pub category: Category,

    pub stage: Stage,
}

impl Recommendation {
    pub fn equipment(stage: Stage, item_type: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            reasoning: reasoning.into(),
            category: Category::Equipment,
            stage,
        }
    }

    pub fn consumable(stage: Stage, item_type: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            reasoning: reasoning.into(),
            category: Category::Consumable,
            stage,
        }
    }
}
