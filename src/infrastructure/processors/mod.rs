// Processors module
pub mod codegen;
pub mod common;
pub mod css_processor;
pub mod import_scanner;
pub mod scope_css;

pub use codegen::*;
pub use common::*;
pub use css_processor::*;
pub use import_scanner::*;
pub use scope_css::*;
