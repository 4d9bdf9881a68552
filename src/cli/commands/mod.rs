//! CLI command implementations

pub mod completions;
pub mod config;
pub mod material;
pub mod options;
pub mod recommend;
pub mod validate;
pub mod wizard;
