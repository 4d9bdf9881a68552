//! Schema system - validation and report templates

pub mod registry;
pub mod template;
pub mod validator;

pub use registry::{SchemaKind, SchemaRegistry};
pub use template::{ReportGenerator, TemplateError};
pub use validator::{ValidateFileError, ValidationError, Validator};
