//! Source diagnostics for YAML and JSON input

pub mod diagnostics;

pub use diagnostics::YamlSyntaxError;
