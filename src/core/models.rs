use crate::utils::{StyleError, DEFAULT_STYLE_MODE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// How a component's styles are isolated from the rest of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encapsulation {
    #[default]
    None,
    Scoped,
    Shadow,
}

impl Encapsulation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encapsulation::None => "none",
            Encapsulation::Scoped => "scoped",
            Encapsulation::Shadow => "shadow",
        }
    }
}

impl fmt::Display for Encapsulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Module encoding of the generated program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    #[default]
    Esm,
    Cjs,
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleFormat::Esm => f.write_str("esm"),
            ModuleFormat::Cjs => f.write_str("cjs"),
        }
    }
}

/// Everything the transform needs to know about one stylesheet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformInput {
    pub file: PathBuf,
    pub input: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub encapsulation: Encapsulation,
    #[serde(default)]
    pub comment_original_selector: bool,
    #[serde(default)]
    pub module: ModuleFormat,
    #[serde(default)]
    pub source_map: bool,
    #[serde(default = "default_true")]
    pub autoprefixer: bool,
}

fn default_true() -> bool {
    true
}

impl TransformInput {
    pub fn new(file: impl Into<PathBuf>, input: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            input: input.into(),
            tag: None,
            mode: None,
            encapsulation: Encapsulation::None,
            comment_original_selector: false,
            module: ModuleFormat::Esm,
            source_map: false,
            autoprefixer: true,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    pub fn with_encapsulation(mut self, encapsulation: Encapsulation) -> Self {
        self.encapsulation = encapsulation;
        self
    }

    pub fn with_comment_original_selector(mut self, enabled: bool) -> Self {
        self.comment_original_selector = enabled;
        self
    }

    pub fn with_module(mut self, module: ModuleFormat) -> Self {
        self.module = module;
        self
    }

    pub fn with_source_map(mut self, enabled: bool) -> Self {
        self.source_map = enabled;
        self
    }

    pub fn with_autoprefixer(mut self, enabled: bool) -> Self {
        self.autoprefixer = enabled;
        self
    }

    /// Mode name, with the default mode folded into `None`
    pub fn style_mode(&self) -> Option<&str> {
        self.mode.as_deref().filter(|m| !m.is_empty() && *m != DEFAULT_STYLE_MODE)
    }

    /// Selector scoping runs for scoped components, and for shadow components
    /// only when original selectors are kept as comments.
    pub fn needs_scoping(&self) -> bool {
        self.tag.is_some()
            && (self.encapsulation == Encapsulation::Scoped
                || (self.encapsulation == Encapsulation::Shadow && self.comment_original_selector))
    }
}

/// One resolved local `@import`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBinding {
    /// Exact statement text, used to strip it from the emitted CSS
    pub src_import_text: String,
    pub file_path: PathBuf,
    pub import_path: String,
    pub var_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warn,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    /// Producer category: "build" for caught failures, "css" for optimizer output
    #[serde(rename = "type")]
    pub kind: String,
    pub header: String,
    pub message_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abs_file_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_number: Option<u32>,
}

impl Diagnostic {
    pub fn error(kind: &str, header: &str, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            kind: kind.to_string(),
            header: header.to_string(),
            message_text: message.into(),
            abs_file_path: None,
            line_number: None,
            column_number: None,
        }
    }

    pub fn warn(kind: &str, header: &str, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warn,
            ..Self::error(kind, header, message)
        }
    }

    /// Generic build error for a failure caught inside the transform
    pub fn from_error(err: &StyleError) -> Self {
        Self {
            abs_file_path: err.file_path().cloned(),
            ..Self::error("build", "Build Error", err.to_string())
        }
    }

    pub fn with_file(mut self, path: PathBuf) -> Self {
        self.abs_file_path = Some(path);
        self
    }

    pub fn with_location(mut self, line: u32, column: u32) -> Self {
        self.line_number = Some(line);
        self.column_number = Some(column);
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

pub fn has_error(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

/// What the transform hands back to the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    pub diagnostics: Vec<Diagnostic>,
    pub style_text: String,
    /// Generated program text; empty when code generation did not run
    pub output: String,
    pub map: Option<String>,
    pub default_var_name: String,
    pub imports: Vec<ImportBinding>,
}

impl TransformResult {
    pub fn has_error(&self) -> bool {
        has_error(&self.diagnostics)
    }
}

/// Per-run state threaded through each stage: the result being built and
/// the binding names handed out so far.
#[derive(Debug)]
pub struct TransformContext {
    pub result: TransformResult,
    pub var_names: HashSet<String>,
}

impl TransformContext {
    pub fn new(style_text: String, default_var_name: String) -> Self {
        let mut var_names = HashSet::new();
        var_names.insert(default_var_name.clone());

        Self {
            result: TransformResult {
                style_text,
                default_var_name,
                ..TransformResult::default()
            },
            var_names,
        }
    }

    pub fn push_error(&mut self, err: &StyleError) {
        self.result.diagnostics.push(Diagnostic::from_error(err));
    }

    pub fn into_result(self) -> TransformResult {
        self.result
    }
}

/// Request handed to the optimizer stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeRequest {
    pub text: String,
    pub file_path: PathBuf,
    pub minify: bool,
    pub autoprefixer: bool,
    pub source_map: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptimizeResult {
    /// Rewritten stylesheet, `None` when the optimizer produced nothing
    pub text: Option<String>,
    pub map: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Data the specifier resolver needs to reference an imported stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPathData<'a> {
    pub importee_path: &'a std::path::Path,
    pub importer_path: &'a std::path::Path,
    pub tag: Option<&'a str>,
    pub encapsulation: Encapsulation,
    pub mode: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_defaults_from_json() {
        let input: TransformInput =
            serde_json::from_str(r#"{"file": "/d/main.css", "input": ".a{}"}"#).unwrap();
        assert_eq!(input.module, ModuleFormat::Esm);
        assert_eq!(input.encapsulation, Encapsulation::None);
        assert!(input.autoprefixer);
        assert!(!input.source_map);
        assert!(input.tag.is_none());
    }

    #[test]
    fn test_input_camel_case_keys() {
        let input: TransformInput = serde_json::from_str(
            r#"{"file": "a.css", "input": "", "tag": "my-cmp", "encapsulation": "shadow",
                "commentOriginalSelector": true, "module": "cjs", "mode": "ios"}"#,
        )
        .unwrap();
        assert_eq!(input.module, ModuleFormat::Cjs);
        assert!(input.comment_original_selector);
        assert!(input.needs_scoping());
        assert_eq!(input.style_mode(), Some("ios"));
    }

    #[test]
    fn test_needs_scoping() {
        let base = TransformInput::new("/d/a.css", "").with_tag("my-cmp");
        assert!(!base.clone().needs_scoping());
        assert!(base.clone().with_encapsulation(Encapsulation::Scoped).needs_scoping());
        assert!(!base.clone().with_encapsulation(Encapsulation::Shadow).needs_scoping());
        assert!(base
            .with_encapsulation(Encapsulation::Shadow)
            .with_comment_original_selector(true)
            .needs_scoping());

        let no_tag = TransformInput::new("/d/a.css", "").with_encapsulation(Encapsulation::Scoped);
        assert!(!no_tag.needs_scoping());
    }

    #[test]
    fn test_default_mode_is_folded() {
        let input = TransformInput::new("a.css", "").with_mode("$");
        assert_eq!(input.style_mode(), None);
    }

    #[test]
    fn test_context_seeds_default_name() {
        let ctx = TransformContext::new(".a{}".to_string(), "mainCss".to_string());
        assert!(ctx.var_names.contains("mainCss"));
        assert_eq!(ctx.var_names.len(), 1);
        assert_eq!(ctx.result.output, "");
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = TransformResult {
            default_var_name: "mainCss".to_string(),
            ..TransformResult::default()
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"defaultVarName\":\"mainCss\""));
        assert!(json.contains("\"styleText\""));
    }

    #[test]
    fn test_has_error() {
        let warn = Diagnostic::warn("css", "Optimize CSS", "careful");
        assert!(!has_error(&[warn.clone()]));
        let err = Diagnostic::error("css", "Optimize CSS", "broken");
        assert!(has_error(&[warn, err]));
    }
}
