//! Workflow input - the builder form payload for one evaluation

use serde::{Deserialize, Serialize};

use crate::core::library::{LookupError, MaterialLookup};
use crate::entities::material::Material;
use crate::entities::recommendation::Stage;
use crate::entities::tiers::{
    label_conversions, normalize, Application, Automation, Budget, Hardness, SampleShape,
    SampleSize, SurfaceFinish, Throughput,
};

/// A process stage the user can select
///
/// Unrecognised identifiers are kept verbatim and produce no
/// recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProcessStage {
    Sectioning,
    Mounting,
    Grinding,
    Polishing,
    Etching,
    Microscopy,
    Cleaning,
    Hardness,
    Unrecognized(String),
}

impl ProcessStage {
    pub const ALL: &'static [ProcessStage] = &[
        ProcessStage::Sectioning,
        ProcessStage::Mounting,
        ProcessStage::Grinding,
        ProcessStage::Polishing,
        ProcessStage::Etching,
        ProcessStage::Microscopy,
        ProcessStage::Cleaning,
        ProcessStage::Hardness,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ProcessStage::Sectioning => "sectioning",
            ProcessStage::Mounting => "mounting",
            ProcessStage::Grinding => "grinding",
            ProcessStage::Polishing => "polishing",
            ProcessStage::Etching => "etching",
            ProcessStage::Microscopy => "microscopy",
            ProcessStage::Cleaning => "cleaning",
            ProcessStage::Hardness => "hardness",
            ProcessStage::Unrecognized(s) => s,
        }
    }

    /// Output stages evaluated when this stage is selected
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            ProcessStage::Sectioning => &[Stage::Sectioning],
            ProcessStage::Mounting => &[Stage::Mounting],
            ProcessStage::Grinding => &[Stage::Grinding],
            ProcessStage::Polishing => &[Stage::Polishing, Stage::FinalPolishing],
            ProcessStage::Etching => &[Stage::Etching],
            ProcessStage::Microscopy => &[Stage::Microscopy],
            ProcessStage::Cleaning => &[Stage::Cleaning],
            ProcessStage::Hardness => &[Stage::Hardness],
            ProcessStage::Unrecognized(_) => &[],
        }
    }
}

impl From<&str> for ProcessStage {
    fn from(s: &str) -> Self {
        match normalize(s).as_str() {
            "sectioning" => ProcessStage::Sectioning,
            "mounting" => ProcessStage::Mounting,
            "grinding" => ProcessStage::Grinding,
            "polishing" => ProcessStage::Polishing,
            "etching" => ProcessStage::Etching,
            "microscopy" => ProcessStage::Microscopy,
            "cleaning" => ProcessStage::Cleaning,
            "hardness" | "hardness testing" => ProcessStage::Hardness,
            _ => ProcessStage::Unrecognized(s.to_string()),
        }
    }
}

impl From<String> for ProcessStage {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<ProcessStage> for String {
    fn from(stage: ProcessStage) -> Self {
        stage.as_str().to_string()
    }
}

impl std::fmt::Display for ProcessStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which part of the sample the section must expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionType {
    #[default]
    CrossSection,
    Surface,
    SpecificFeature,
    Variable,
}

impl SectionType {
    pub const ALL: &'static [SectionType] = &[
        SectionType::CrossSection,
        SectionType::Surface,
        SectionType::SpecificFeature,
        SectionType::Variable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SectionType::CrossSection => "Cross-section",
            SectionType::Surface => "Surface",
            SectionType::SpecificFeature => "Specific feature",
            SectionType::Variable => "Variable",
        }
    }

    /// Sections targeting a surface or a specific feature
    pub fn is_targeted(&self) -> bool {
        matches!(self, SectionType::Surface | SectionType::SpecificFeature)
    }
}

impl From<&str> for SectionType {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.starts_with("surface") {
            SectionType::Surface
        } else if l.starts_with("specific") {
            SectionType::SpecificFeature
        } else if l.starts_with("variable") {
            SectionType::Variable
        } else {
            SectionType::CrossSection
        }
    }
}

label_conversions!(SectionType);

/// How much cutting damage is acceptable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DamageCriticality {
    #[default]
    Standard,
    High,
    VeryHigh,
}

impl DamageCriticality {
    pub const ALL: &'static [DamageCriticality] = &[
        DamageCriticality::Standard,
        DamageCriticality::High,
        DamageCriticality::VeryHigh,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DamageCriticality::Standard => "Standard",
            DamageCriticality::High => "High",
            DamageCriticality::VeryHigh => "Very High",
        }
    }

    /// True for `High` and `VeryHigh`
    pub fn is_elevated(&self) -> bool {
        matches!(self, DamageCriticality::High | DamageCriticality::VeryHigh)
    }
}

impl From<&str> for DamageCriticality {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.starts_with("very high") {
            DamageCriticality::VeryHigh
        } else if l.starts_with("high") {
            DamageCriticality::High
        } else {
            DamageCriticality::Standard
        }
    }
}

label_conversions!(DamageCriticality);

/// Preferred mounting technique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MountingPreference {
    #[default]
    Compression,
    Castable,
    Both,
    Variable,
}

impl MountingPreference {
    pub const ALL: &'static [MountingPreference] = &[
        MountingPreference::Compression,
        MountingPreference::Castable,
        MountingPreference::Both,
        MountingPreference::Variable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MountingPreference::Compression => "Compression",
            MountingPreference::Castable => "Castable",
            MountingPreference::Both => "Both",
            MountingPreference::Variable => "Variable",
        }
    }
}

impl From<&str> for MountingPreference {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.starts_with("castable") || l.starts_with("cold") {
            MountingPreference::Castable
        } else if l.starts_with("both") {
            MountingPreference::Both
        } else if l.starts_with("variable") {
            MountingPreference::Variable
        } else {
            MountingPreference::Compression
        }
    }
}

label_conversions!(MountingPreference);

/// Surface requirement after grinding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GrindingSurface {
    #[default]
    StandardFlat,
    PreserveFeatures,
    MinimalDeformation,
}

impl GrindingSurface {
    pub const ALL: &'static [GrindingSurface] = &[
        GrindingSurface::StandardFlat,
        GrindingSurface::PreserveFeatures,
        GrindingSurface::MinimalDeformation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GrindingSurface::StandardFlat => "Standard flat",
            GrindingSurface::PreserveFeatures => "Preserve features",
            GrindingSurface::MinimalDeformation => "Minimal deformation",
        }
    }
}

impl From<&str> for GrindingSurface {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.starts_with("preserve") {
            GrindingSurface::PreserveFeatures
        } else if l.starts_with("minimal") {
            GrindingSurface::MinimalDeformation
        } else {
            GrindingSurface::StandardFlat
        }
    }
}

label_conversions!(GrindingSurface);

/// Required quality of the finished polish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FinalSurfaceQuality {
    #[default]
    StandardMirror,
    EbsdReady,
    ResearchGrade,
}

impl FinalSurfaceQuality {
    pub const ALL: &'static [FinalSurfaceQuality] = &[
        FinalSurfaceQuality::StandardMirror,
        FinalSurfaceQuality::EbsdReady,
        FinalSurfaceQuality::ResearchGrade,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FinalSurfaceQuality::StandardMirror => "Standard mirror",
            FinalSurfaceQuality::EbsdReady => "EBSD-ready",
            FinalSurfaceQuality::ResearchGrade => "Research-grade",
        }
    }

    /// Anything beyond a standard mirror finish
    pub fn is_deformation_free(&self) -> bool {
        !matches!(self, FinalSurfaceQuality::StandardMirror)
    }
}

impl From<&str> for FinalSurfaceQuality {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.starts_with("ebsd") {
            FinalSurfaceQuality::EbsdReady
        } else if l.starts_with("research") {
            FinalSurfaceQuality::ResearchGrade
        } else {
            FinalSurfaceQuality::StandardMirror
        }
    }
}

label_conversions!(FinalSurfaceQuality);

/// Image documentation needs at the microscope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Documentation {
    #[default]
    Basic,
    HighResolution,
    AutomatedCapture,
    Variable,
}

impl Documentation {
    pub const ALL: &'static [Documentation] = &[
        Documentation::Basic,
        Documentation::HighResolution,
        Documentation::AutomatedCapture,
        Documentation::Variable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Documentation::Basic => "Basic",
            Documentation::HighResolution => "High-resolution",
            Documentation::AutomatedCapture => "Automated capture",
            Documentation::Variable => "Variable",
        }
    }

    /// Requirements that call for a digital imaging system
    pub fn needs_imaging(&self) -> bool {
        matches!(
            self,
            Documentation::HighResolution | Documentation::AutomatedCapture
        )
    }
}

impl From<&str> for Documentation {
    fn from(label: &str) -> Self {
        let l = normalize(label);
        if l.starts_with("high") {
            Documentation::HighResolution
        } else if l.starts_with("automated") {
            Documentation::AutomatedCapture
        } else if l.starts_with("variable") {
            Documentation::Variable
        } else {
            Documentation::Basic
        }
    }
}

label_conversions!(Documentation);

/// Everything the builder collects for one recommendation run
///
/// Keys are camelCase so the builder form payload deserializes directly.
/// Every field is optional in the payload and falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkflowInput {
    /// Stages to recommend for; order is irrelevant
    pub process_stages: Vec<ProcessStage>,

    /// Free-form material category (e.g., "Hard Metals (Carbides)")
    pub material_type: String,

    pub material_hardness: Hardness,

    pub sample_size: SampleSize,

    pub sample_shape: SampleShape,

    pub applications: Vec<Application>,

    /// Library key (slug or name) resolved into `selected_material`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    /// Specific material whose sequences override heuristic synthesis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_material: Option<Material>,

    pub throughput: Throughput,

    pub automation: Automation,

    pub budget: Budget,

    pub surface_finish: SurfaceFinish,

    // Stage-specific refinements
    pub section_type: SectionType,

    pub damage_criticality: DamageCriticality,

    pub mounting_type_preference: MountingPreference,

    pub grinding_surface_requirements: GrindingSurface,

    pub final_surface_quality: FinalSurfaceQuality,

    pub documentation_requirements: Documentation,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hardness_test_types: Vec<String>,
}

impl WorkflowInput {
    /// Create an input selecting the given stages, everything else default
    pub fn new<I, S>(stages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ProcessStage>,
    {
        Self {
            process_stages: stages.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_material_type(mut self, material_type: impl Into<String>) -> Self {
        self.material_type = material_type.into();
        self
    }

    pub fn with_hardness(mut self, hardness: impl Into<Hardness>) -> Self {
        self.material_hardness = hardness.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<SampleSize>) -> Self {
        self.sample_size = size.into();
        self
    }

    pub fn with_shape(mut self, shape: impl Into<SampleShape>) -> Self {
        self.sample_shape = shape.into();
        self
    }

    pub fn with_applications<I, A>(mut self, applications: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Application>,
    {
        self.applications = applications.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_throughput(mut self, throughput: impl Into<Throughput>) -> Self {
        self.throughput = throughput.into();
        self
    }

    pub fn with_automation(mut self, automation: impl Into<Automation>) -> Self {
        self.automation = automation.into();
        self
    }

    pub fn with_budget(mut self, budget: impl Into<Budget>) -> Self {
        self.budget = budget.into();
        self
    }

    pub fn with_surface_finish(mut self, finish: impl Into<SurfaceFinish>) -> Self {
        self.surface_finish = finish.into();
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.selected_material = Some(material);
        self
    }

    pub fn has_application(&self, application: &Application) -> bool {
        self.applications.contains(application)
    }

    /// Fill `selected_material` from `lookup` using the `material` key
    ///
    /// An already selected material is left untouched.
    pub fn resolve_material<L: MaterialLookup + ?Sized>(
        &mut self,
        lookup: &L,
    ) -> Result<(), LookupError> {
        if self.selected_material.is_some() {
            return Ok(());
        }
        let Some(key) = self.material.as_deref().map(str::trim).filter(|k| !k.is_empty()) else {
            return Ok(());
        };

        let material = lookup
            .find(key)
            .cloned()
            .ok_or_else(|| LookupError::UnknownMaterial(key.to_string()))?;
        if self.material_type.is_empty() {
            self.material_type = material.name.clone();
        }
        self.selected_material = Some(material);
        Ok(())
    }
}
