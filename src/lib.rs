//! Prepflow: metallographic sample preparation planner
//!
//! Given a workflow description (selected process stages, material, sample
//! geometry, throughput, budget and finish targets), the engine produces an
//! ordered list of equipment and consumable recommendations, each with a
//! justification.
//!
//! ```
//! use prepflow::engine::generate_recommendations;
//! use prepflow::entities::WorkflowInput;
//!
//! let input = WorkflowInput::new(["grinding", "polishing"]).with_hardness("Hard");
//! let recommendations = generate_recommendations(&input);
//! assert!(!recommendations.is_empty());
//! ```

pub mod cli;
pub mod core;
pub mod engine;
pub mod entities;
pub mod schema;
pub mod yaml;
