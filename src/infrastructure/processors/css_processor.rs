use crate::core::interfaces::CssOptimizer;
use crate::core::models::{Diagnostic, OptimizeRequest, OptimizeResult};
use crate::utils::{Logger, Timer};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use std::path::Path;

const HEADER: &str = "Optimize CSS";

/// Optimizer backed by lightningcss. Prefixing targets a fixed evergreen
/// browser baseline.
pub struct LightningCssOptimizer {
    browsers: Browsers,
}

impl LightningCssOptimizer {
    pub fn new() -> Self {
        Self {
            browsers: default_browsers(),
        }
    }

    pub fn with_browsers(browsers: Browsers) -> Self {
        Self { browsers }
    }

    fn targets(&self, autoprefixer: bool) -> Targets {
        if autoprefixer {
            Targets::from(self.browsers)
        } else {
            Targets::default()
        }
    }

    /// Blocking optimization; the async trait method runs this off the runtime.
    pub fn optimize_blocking(&self, request: &OptimizeRequest) -> OptimizeResult {
        let _timer = Timer::start(&format!(
            "Optimizing CSS {}",
            request
                .file_path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown")
        ));

        if request.text.trim().is_empty() {
            return OptimizeResult {
                text: Some(request.text.clone()),
                ..OptimizeResult::default()
            };
        }

        match self.run(request) {
            Ok(code) => OptimizeResult {
                text: Some(code),
                map: None,
                diagnostics: Vec::new(),
            },
            Err(diagnostic) => OptimizeResult {
                text: None,
                map: None,
                diagnostics: vec![diagnostic],
            },
        }
    }

    fn run(&self, request: &OptimizeRequest) -> std::result::Result<String, Diagnostic> {
        let file_path = &request.file_path;
        let options = ParserOptions {
            filename: file_path.to_string_lossy().into_owned(),
            ..ParserOptions::default()
        };

        let mut stylesheet = StyleSheet::parse(&request.text, options)
            .map_err(|e| optimize_error(file_path, e.to_string(), e.loc.map(|l| (l.line, l.column))))?;

        stylesheet
            .minify(MinifyOptions {
                targets: self.targets(request.autoprefixer),
                ..MinifyOptions::default()
            })
            .map_err(|e| optimize_error(file_path, e.to_string(), e.loc.map(|l| (l.line, l.column))))?;

        let printed = stylesheet
            .to_css(PrinterOptions {
                minify: request.minify,
                targets: self.targets(request.autoprefixer),
                ..PrinterOptions::default()
            })
            .map_err(|e| optimize_error(file_path, e.to_string(), e.loc.map(|l| (l.line, l.column))))?;

        Ok(printed.code)
    }
}

impl Default for LightningCssOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CssOptimizer for LightningCssOptimizer {
    async fn optimize(&self, request: OptimizeRequest) -> OptimizeResult {
        Logger::optimizing_css(&request.file_path.to_string_lossy());

        let optimizer = LightningCssOptimizer::with_browsers(self.browsers);
        let file_path = request.file_path.clone();

        // no runtime to hand off to, optimize on the caller's thread
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return optimizer.optimize_blocking(&request);
        };

        // lightningcss is CPU-bound, keep it off the async workers
        match handle.spawn_blocking(move || optimizer.optimize_blocking(&request)).await {
            Ok(result) => result,
            Err(e) => OptimizeResult {
                text: None,
                map: None,
                diagnostics: vec![optimize_error(
                    &file_path,
                    format!("Optimization task failed: {}", e),
                    None,
                )],
            },
        }
    }
}

fn optimize_error(file_path: &Path, message: String, loc: Option<(u32, u32)>) -> Diagnostic {
    let diagnostic = Diagnostic::error("css", HEADER, message).with_file(file_path.to_path_buf());
    match loc {
        // lightningcss lines are 0-based
        Some((line, column)) => diagnostic.with_location(line + 1, column),
        None => diagnostic,
    }
}

fn default_browsers() -> Browsers {
    Browsers {
        chrome: Some(80 << 16),
        edge: Some(80 << 16),
        firefox: Some(78 << 16),
        safari: Some(13 << 16),
        ios_saf: Some(13 << 16),
        samsung: Some(12 << 16),
        ..Browsers::default()
    }
}
