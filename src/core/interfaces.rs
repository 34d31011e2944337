use crate::core::models::*;
use crate::utils::Result;
use async_trait::async_trait;

/// Rewrites selectors so they only match inside one component
pub trait ScopeRewriter: Send + Sync {
    fn rewrite(&self, css: &str, scope_id: &str, comment_original_selector: bool) -> Result<String>;
}

/// Minifies/prefixes a stylesheet. Failures come back as error diagnostics
/// on the result, never as a rejected future.
#[async_trait]
pub trait CssOptimizer: Send + Sync {
    async fn optimize(&self, request: OptimizeRequest) -> OptimizeResult;
}

/// Produces the specifier string used in generated import/require statements
pub trait SpecifierResolver: Send + Sync {
    fn resolve_specifier(&self, data: &ImportPathData<'_>) -> String;
}

/// Turns an arbitrary string into a valid JS binding name
pub trait IdentifierSanitizer: Send + Sync {
    fn sanitize(&self, name: &str) -> String;
}
