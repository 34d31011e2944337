// Soku Style - stylesheet to JS module transform
// Layout mirrors the bundler: core domain, infrastructure collaborators, utils

pub mod config;
pub mod core;
pub mod infrastructure;
pub mod utils;

pub use crate::config::{ComponentStyle, ConfigLoader, StyleConfig};
pub use crate::core::{
    transform_css_to_esm, transform_css_to_esm_sync, CssToEsmService, Diagnostic,
    DiagnosticLevel, Encapsulation, ImportBinding, ModuleFormat, TransformInput, TransformResult,
};
pub use crate::utils::{Logger, Result, StyleError};
