//! Categorical input tiers
//!
//! The builder form submits human-readable option labels such as
//! `"Very Hard (> 65 HRC)"` or `"Semi-Automated"`. Each tier parses those
//! labels into a closed enum so that rule blocks branch on variants instead
//! of substrings. Parsing is total: anything unrecognised (including the
//! empty string) lands on `Unspecified` or the documented default.
//!
//! When a label could match more than one tier, the most specific tier
//! wins: `"Very Hard"` is never also `Hard`, `"Semi-Automated"` is never
//! also `Automated`.

use serde::{Deserialize, Serialize};

/// Implements the string conversions shared by every tier:
/// `From<String>`, `From<Tier> for String` and `Display`, all routed through
/// the tier's `From<&str>` and `label()`.
macro_rules! label_conversions {
    ($tier:ty) => {
        impl From<String> for $tier {
            fn from(label: String) -> Self {
                Self::from(label.as_str())
            }
        }

        impl From<$tier> for String {
            fn from(tier: $tier) -> Self {
                tier.label().to_string()
            }
        }

        impl std::fmt::Display for $tier {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }
    };
}

pub(crate) use label_conversions;

pub(crate) fn normalize(label: &str) -> String {
    label.trim().to_lowercase().replace(['-', '_'], " ")
}

/// Material hardness tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Hardness {
    Soft,
    Medium,
    Hard,
    VeryHard,
    #[default]
    Unspecified,
}

impl Hardness {
    pub const ALL: &'static [Hardness] = &[
        Hardness::Soft,
        Hardness::Medium,
        Hardness::Hard,
        Hardness::VeryHard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Hardness::Soft => "Soft (< 30 HRC)",
            Hardness::Medium => "Medium (30-50 HRC)",
            Hardness::Hard => "Hard (50-65 HRC)",
            Hardness::VeryHard => "Very Hard (> 65 HRC)",
            Hardness::Unspecified => "",
        }
    }

    /// Material library category (`soft`, `medium`, `hard`, `very-hard`)
    pub fn category(&self) -> Option<&'static str> {
        match self {
            Hardness::Soft => Some("soft"),
            Hardness::Medium => Some("medium"),
            Hardness::Hard => Some("hard"),
            Hardness::VeryHard => Some("very-hard"),
            Hardness::Unspecified => None,
        }
    }

    /// True for both `Hard` and `VeryHard`
    pub fn is_hard(&self) -> bool {
        matches!(self, Hardness::Hard | Hardness::VeryHard)
    }

    pub fn is_very_hard(&self) -> bool {
        matches!(self, Hardness::VeryHard)
    }

    pub fn is_soft(&self) -> bool {
        matches!(self, Hardness::Soft)
    }
}

impl From<&str> for Hardness {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.contains("very hard") {
            Hardness::VeryHard
        } else if l.contains("hard") {
            Hardness::Hard
        } else if l.contains("soft") {
            Hardness::Soft
        } else if l.contains("medium") {
            Hardness::Medium
        } else {
            Hardness::Unspecified
        }
    }
}

label_conversions!(Hardness);

/// Sample size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SampleSize {
    Small,
    Medium,
    Large,
    VeryLarge,
    #[default]
    Unspecified,
}

impl SampleSize {
    pub const ALL: &'static [SampleSize] = &[
        SampleSize::Small,
        SampleSize::Medium,
        SampleSize::Large,
        SampleSize::VeryLarge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SampleSize::Small => "Small (< 25mm)",
            SampleSize::Medium => "Medium (25-50mm)",
            SampleSize::Large => "Large (50-100mm)",
            SampleSize::VeryLarge => "Very Large (> 100mm)",
            SampleSize::Unspecified => "",
        }
    }

    /// Lowercase phrase used inside justification text ("large (50-100mm)")
    pub fn phrase(&self) -> String {
        match self {
            SampleSize::Unspecified => "typical".to_string(),
            other => other.label().to_lowercase(),
        }
    }

    /// True for both `Large` and `VeryLarge`
    pub fn is_large(&self) -> bool {
        matches!(self, SampleSize::Large | SampleSize::VeryLarge)
    }

    pub fn is_very_large(&self) -> bool {
        matches!(self, SampleSize::VeryLarge)
    }

    pub fn is_small(&self) -> bool {
        matches!(self, SampleSize::Small)
    }
}

impl From<&str> for SampleSize {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.contains("very large") {
            SampleSize::VeryLarge
        } else if l.contains("large") {
            SampleSize::Large
        } else if l.contains("small") {
            SampleSize::Small
        } else if l.contains("medium") {
            SampleSize::Medium
        } else {
            SampleSize::Unspecified
        }
    }
}

label_conversions!(SampleSize);

/// Sample geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SampleShape {
    Regular,
    Irregular,
    Thin,
    Small,
    #[default]
    Unspecified,
}

impl SampleShape {
    pub const ALL: &'static [SampleShape] = &[
        SampleShape::Regular,
        SampleShape::Irregular,
        SampleShape::Thin,
        SampleShape::Small,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SampleShape::Regular => "Regular",
            SampleShape::Irregular => "Irregular",
            SampleShape::Thin => "Thin",
            SampleShape::Small => "Small",
            SampleShape::Unspecified => "",
        }
    }

    /// Thin sections and small/delicate parts
    pub fn is_delicate(&self) -> bool {
        matches!(self, SampleShape::Thin | SampleShape::Small)
    }
}

impl From<&str> for SampleShape {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.starts_with("thin") {
            SampleShape::Thin
        } else if l.starts_with("small") || l.starts_with("delicate") {
            SampleShape::Small
        } else if l.starts_with("irregular") || l.starts_with("complex") {
            SampleShape::Irregular
        } else if l.starts_with("regular") || l.starts_with("standard") {
            SampleShape::Regular
        } else {
            SampleShape::Unspecified
        }
    }
}

label_conversions!(SampleShape);

/// Samples per day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Throughput {
    Low,
    Medium,
    High,
    VeryHigh,
    #[default]
    Unspecified,
}

impl Throughput {
    pub const ALL: &'static [Throughput] = &[
        Throughput::Low,
        Throughput::Medium,
        Throughput::High,
        Throughput::VeryHigh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Throughput::Low => "Low (1-10 samples/day)",
            Throughput::Medium => "Medium (10-50 samples/day)",
            Throughput::High => "High (50-200 samples/day)",
            Throughput::VeryHigh => "Very High (> 200 samples/day)",
            Throughput::Unspecified => "",
        }
    }

    /// True for both `High` and `VeryHigh`
    pub fn is_high(&self) -> bool {
        matches!(self, Throughput::High | Throughput::VeryHigh)
    }

    pub fn is_very_high(&self) -> bool {
        matches!(self, Throughput::VeryHigh)
    }

    /// Medium volume and up benefits from a sectioning table feed
    pub fn needs_table_feed(&self) -> bool {
        matches!(
            self,
            Throughput::Medium | Throughput::High | Throughput::VeryHigh
        )
    }
}

impl From<&str> for Throughput {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.contains("very high") {
            Throughput::VeryHigh
        } else if l.contains("high") {
            Throughput::High
        } else if l.contains("medium") {
            Throughput::Medium
        } else if l.contains("low") {
            Throughput::Low
        } else {
            Throughput::Unspecified
        }
    }
}

label_conversions!(Throughput);

/// Degree of automation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Automation {
    Manual,
    SemiAutomated,
    Automated,
    #[default]
    Unspecified,
}

impl Automation {
    pub const ALL: &'static [Automation] = &[
        Automation::Manual,
        Automation::SemiAutomated,
        Automation::Automated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Automation::Manual => "Fully Manual",
            Automation::SemiAutomated => "Semi-Automated",
            Automation::Automated => "Fully Automated",
            Automation::Unspecified => "",
        }
    }

    /// Fully automated only
    pub fn is_automated(&self) -> bool {
        matches!(self, Automation::Automated)
    }

    pub fn is_semi_automated(&self) -> bool {
        matches!(self, Automation::SemiAutomated)
    }
}

impl From<&str> for Automation {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.contains("semi") {
            Automation::SemiAutomated
        } else if l.contains("automat") {
            Automation::Automated
        } else if l.contains("manual") {
            Automation::Manual
        } else {
            Automation::Unspecified
        }
    }
}

label_conversions!(Automation);

/// Equipment tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Budget {
    Essential,
    Standard,
    Advanced,
    Comprehensive,
    #[default]
    Unspecified,
}

impl Budget {
    pub const ALL: &'static [Budget] = &[
        Budget::Essential,
        Budget::Standard,
        Budget::Advanced,
        Budget::Comprehensive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Budget::Essential => "Essential",
            Budget::Standard => "Standard",
            Budget::Advanced => "Advanced",
            Budget::Comprehensive => "Comprehensive",
            Budget::Unspecified => "",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Budget::Essential => "Core equipment for basic sample preparation",
            Budget::Standard => "Balanced setup for routine metallography work",
            Budget::Advanced => "Enhanced capabilities for demanding applications",
            Budget::Comprehensive => "Complete system with full automation and features",
            Budget::Unspecified => "",
        }
    }
}

impl From<&str> for Budget {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.starts_with("essential") {
            Budget::Essential
        } else if l.starts_with("standard") {
            Budget::Standard
        } else if l.starts_with("advanced") {
            Budget::Advanced
        } else if l.starts_with("comprehensive") {
            Budget::Comprehensive
        } else {
            Budget::Unspecified
        }
    }
}

label_conversions!(Budget);

/// Required surface finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SurfaceFinish {
    #[default]
    Standard,
    HighQuality,
    ExtremelyFlat,
    Ebsd,
}

impl SurfaceFinish {
    pub const ALL: &'static [SurfaceFinish] = &[
        SurfaceFinish::Standard,
        SurfaceFinish::HighQuality,
        SurfaceFinish::ExtremelyFlat,
        SurfaceFinish::Ebsd,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SurfaceFinish::Standard => "Standard",
            SurfaceFinish::HighQuality => "High Quality",
            SurfaceFinish::ExtremelyFlat => "Extremely Flat",
            SurfaceFinish::Ebsd => "EBSD",
        }
    }

    /// Finishes that only an EBSD-grade preparation achieves
    pub fn is_ebsd_grade(&self) -> bool {
        matches!(self, SurfaceFinish::ExtremelyFlat | SurfaceFinish::Ebsd)
    }
}

impl From<&str> for SurfaceFinish {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.starts_with("extremely flat") {
            SurfaceFinish::ExtremelyFlat
        } else if l.contains("ebsd") {
            SurfaceFinish::Ebsd
        } else if l.contains("high quality") {
            SurfaceFinish::HighQuality
        } else {
            SurfaceFinish::Standard
        }
    }
}

label_conversions!(SurfaceFinish);

/// Target application tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Application {
    QualityControl,
    ResearchDevelopment,
    FailureAnalysis,
    MaterialCharacterization,
    ProductionTesting,
    Ebsd,
    Other(String),
}

impl Application {
    pub const KNOWN: &'static [Application] = &[
        Application::QualityControl,
        Application::ResearchDevelopment,
        Application::FailureAnalysis,
        Application::MaterialCharacterization,
        Application::ProductionTesting,
        Application::Ebsd,
    ];

    pub fn label(&self) -> &str {
        match self {
            Application::QualityControl => "Quality Control",
            Application::ResearchDevelopment => "Research & Development",
            Application::FailureAnalysis => "Failure Analysis",
            Application::MaterialCharacterization => "Material Characterization",
            Application::ProductionTesting => "Production Testing",
            Application::Ebsd => "EBSD",
            Application::Other(label) => label,
        }
    }
}

impl From<&str> for Application {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        match l.as_str() {
            "quality control" | "qc" => Application::QualityControl,
            "research & development" | "research and development" | "r&d" | "research" => {
                Application::ResearchDevelopment
            }
            "failure analysis" => Application::FailureAnalysis,
            "material characterization" | "characterization" => {
                Application::MaterialCharacterization
            }
            "production testing" | "production" => Application::ProductionTesting,
            "ebsd" => Application::Ebsd,
            _ => Application::Other(label.trim().to_string()),
        }
    }
}

impl From<String> for Application {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<Application> for String {
    fn from(app: Application) -> Self {
        app.label().to_string()
    }
}

impl std::fmt::Display for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
