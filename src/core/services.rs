use crate::core::{interfaces::*, models::*};
use crate::infrastructure::{
    generate_module, ImportScanner, LightningCssOptimizer, QuerySpecifierResolver,
    SelectorScopeRewriter,
};
use crate::utils::{create_css_var_name, get_scope_id, JsVarNameSanitizer, Logger, Result, Timer};
use std::sync::Arc;

/// Stylesheet-to-module pipeline: scope rewrite, import scan, optional
/// optimize, generate.
pub struct CssToEsmService {
    scope_rewriter: Arc<dyn ScopeRewriter>,
    optimizer: Arc<dyn CssOptimizer>,
    resolver: Arc<dyn SpecifierResolver>,
    sanitizer: Arc<dyn IdentifierSanitizer>,
}

impl CssToEsmService {
    pub fn new(
        scope_rewriter: Arc<dyn ScopeRewriter>,
        optimizer: Arc<dyn CssOptimizer>,
        resolver: Arc<dyn SpecifierResolver>,
        sanitizer: Arc<dyn IdentifierSanitizer>,
    ) -> Self {
        Self {
            scope_rewriter,
            optimizer,
            resolver,
            sanitizer,
        }
    }

    pub fn with_scope_rewriter(mut self, scope_rewriter: Arc<dyn ScopeRewriter>) -> Self {
        self.scope_rewriter = scope_rewriter;
        self
    }

    pub fn with_optimizer(mut self, optimizer: Arc<dyn CssOptimizer>) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn SpecifierResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn IdentifierSanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Full transform, including the optimizer. Optimizer errors stop the
    /// run before any code is generated.
    pub async fn transform_css_to_esm(&self, input: &TransformInput) -> TransformResult {
        let _timer = Timer::start(&format!("css-to-{} {}", input.module, input.file.display()));
        let mut ctx = self.transform_module(input);
        if ctx.result.default_var_name.is_empty() {
            return ctx.into_result();
        }

        if !self.optimize(input, &mut ctx).await {
            return ctx.into_result();
        }

        generate_module(input, ctx.into_result())
    }

    /// Scope, scan and generate. Never suspends and never optimizes.
    pub fn transform_css_to_esm_sync(&self, input: &TransformInput) -> TransformResult {
        let _timer = Timer::start(&format!("css-to-{} {}", input.module, input.file.display()));
        let ctx = self.transform_module(input);
        if ctx.result.default_var_name.is_empty() {
            return ctx.into_result();
        }
        generate_module(input, ctx.into_result())
    }

    /// Shared front half. Failures are recorded as diagnostics and leave the
    /// stylesheet text as far as it got. An empty default binding means no
    /// module can be generated.
    fn transform_module(&self, input: &TransformInput) -> TransformContext {
        Logger::transform_start(&input.file.display().to_string(), &input.module.to_string());

        let default_var_name =
            match create_css_var_name(&input.file, input.style_mode(), self.sanitizer.as_ref()) {
                Ok(name) => name,
                Err(e) => {
                    Logger::warn(&e.to_string());
                    let mut ctx = TransformContext::new(input.input.clone(), String::new());
                    ctx.push_error(&e);
                    return ctx;
                }
            };

        let mut ctx = TransformContext::new(input.input.clone(), default_var_name);

        if let Err(e) = self.scope_and_scan(input, &mut ctx) {
            Logger::warn(&format!("{} ({})", e, input.file.display()));
            ctx.push_error(&e);
        }

        ctx
    }

    fn scope_and_scan(&self, input: &TransformInput, ctx: &mut TransformContext) -> Result<()> {
        if let Some(tag) = input.tag.as_deref().filter(|_| input.needs_scoping()) {
            let scope_id = get_scope_id(tag, input.style_mode());
            Logger::scoping_css(&input.file.display().to_string(), &scope_id);
            ctx.result.style_text = self.scope_rewriter.rewrite(
                &ctx.result.style_text,
                &scope_id,
                input.comment_original_selector,
            )?;
        }

        let scanner = ImportScanner::new(self.sanitizer.as_ref());
        let scanned = scanner.scan(
            &ctx.result.style_text,
            &input.file,
            input.style_mode(),
            &mut ctx.var_names,
        )?;
        ctx.result.style_text = scanned.style_text;

        for css_import in scanned.imports {
            let import_path = self.resolver.resolve_specifier(&ImportPathData {
                importee_path: &css_import.file_path,
                importer_path: &input.file,
                tag: input.tag.as_deref(),
                encapsulation: input.encapsulation,
                mode: input.mode.as_deref(),
            });

            ctx.result.imports.push(ImportBinding {
                src_import_text: css_import.src_import_text,
                file_path: css_import.file_path,
                import_path,
                var_name: css_import.var_name,
            });
        }

        Ok(())
    }

    /// Returns false when the optimizer reported an error.
    async fn optimize(&self, input: &TransformInput, ctx: &mut TransformContext) -> bool {
        let optimized = self
            .optimizer
            .optimize(OptimizeRequest {
                text: ctx.result.style_text.clone(),
                file_path: input.file.clone(),
                minify: true,
                autoprefixer: input.autoprefixer,
                source_map: input.source_map,
            })
            .await;

        let errors = optimized.diagnostics.iter().filter(|d| d.is_error()).count();
        ctx.result.diagnostics.extend(optimized.diagnostics);

        if let Some(text) = optimized.text {
            ctx.result.style_text = text;
        }

        if errors > 0 {
            Logger::optimize_failed(&input.file.display().to_string(), errors);
            return false;
        }

        ctx.result.map = optimized.map;
        true
    }
}

impl Default for CssToEsmService {
    fn default() -> Self {
        Self::new(
            Arc::new(SelectorScopeRewriter),
            Arc::new(LightningCssOptimizer::new()),
            Arc::new(QuerySpecifierResolver),
            Arc::new(JsVarNameSanitizer),
        )
    }
}

/// Async transform with the default collaborators
pub async fn transform_css_to_esm(input: &TransformInput) -> TransformResult {
    CssToEsmService::default().transform_css_to_esm(input).await
}

/// Sync transform with the default collaborators
pub fn transform_css_to_esm_sync(input: &TransformInput) -> TransformResult {
    CssToEsmService::default().transform_css_to_esm_sync(input)
}
