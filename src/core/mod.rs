//! Core module - configuration, collaborators and input loading

pub mod config;
pub mod library;
pub mod links;
pub mod loader;

pub use config::Config;
pub use library::{LookupError, MaterialLibrary, MaterialLookup};
pub use loader::{load_workflow, InputFormat, LoadError};
