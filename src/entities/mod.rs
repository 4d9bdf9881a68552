//! Entity type definitions
//!
//! Prepflow works with three kinds of records:
//!
//! - [`WorkflowInput`] - the builder form payload (stages, sample, targets)
//! - [`Material`] - library record with material-specific sequences
//! - [`Recommendation`] - one equipment or consumable suggestion per rule firing
//!
//! The categorical inputs (hardness, size, throughput, ...) live in [`tiers`].

pub mod material;
pub mod recommendation;
pub mod tiers;
pub mod workflow;

pub use material::Material;
pub use recommendation::{Category, Recommendation, Stage};
pub use tiers::{
    Application, Automation, Budget, Hardness, SampleShape, SampleSize, SurfaceFinish, Throughput,
};
pub use workflow::{
    DamageCriticality, Documentation, FinalSurfaceQuality, GrindingSurface, MountingPreference,
    ProcessStage, SectionType, WorkflowInput,
};
