use soku_style::core::interfaces::CssOptimizer;
use soku_style::core::models::{Diagnostic, OptimizeRequest, OptimizeResult};
use soku_style::{
    transform_css_to_esm_sync, CssToEsmService, Encapsulation, ModuleFormat, TransformInput,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct RejectingOptimizer {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl CssOptimizer for RejectingOptimizer {
    async fn optimize(&self, request: OptimizeRequest) -> OptimizeResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        OptimizeResult {
            text: None,
            map: None,
            diagnostics: vec![
                Diagnostic::warn("css", "Optimize CSS", "vendor prefix dropped"),
                Diagnostic::error("css", "Optimize CSS", "Unexpected token")
                    .with_file(request.file_path),
            ],
        }
    }
}

#[test]
fn test_no_imports_keeps_text() {
    let css = ".host { display: block; }\n/* @import nothing */";
    let result = transform_css_to_esm_sync(&TransformInput::new("/d/main.css", css));

    assert!(result.imports.is_empty());
    assert_eq!(result.style_text, css);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.default_var_name, "mainCss");
}

#[test]
fn test_absolute_and_relative_imports() {
    let css = "@import \"/a/b.css\";\n@import './x.css';\n.x{}";
    let result = transform_css_to_esm_sync(&TransformInput::new("/d/main.css", css));

    let paths: Vec<PathBuf> = result.imports.iter().map(|i| i.file_path.clone()).collect();
    assert_eq!(paths, vec![PathBuf::from("/a/b.css"), PathBuf::from("/d/x.css")]);
    assert_eq!(result.imports[0].import_path, "../a/b.css");
    assert_eq!(result.imports[1].import_path, "./x.css");
    assert_eq!(result.style_text, "\n\n.x{}");
}

#[test]
fn test_external_and_node_imports_are_left_alone() {
    let css = "@import url(http://cdn/a.css);\n@import url(//cdn/b.css);\n@import \"~pkg/a.css\";\n.x{}";
    let result = transform_css_to_esm_sync(&TransformInput::new("/d/main.css", css));

    assert!(result.imports.is_empty());
    assert_eq!(result.style_text, css);
    assert!(result.output.contains("@import url(http://cdn/a.css);"));
    assert!(result.output.contains("@import \\\"~pkg/a.css\\\";"));
}

#[test]
fn test_colliding_names_use_allocated_count() {
    let css = "@import './one/vars.css';\n@import './two/vars.css';";
    let result = transform_css_to_esm_sync(&TransformInput::new("/d/main.css", css));

    let names: Vec<&str> = result.imports.iter().map(|i| i.var_name.as_str()).collect();
    // {mainCss, varsCss} allocated when the second vars.css arrives
    assert_eq!(names, vec!["varsCss", "varsCss2"]);
}

#[test]
fn test_esm_concatenation_order() {
    let css = "@import './a.css';@import './b.css';.x{color:red}";
    let result = transform_css_to_esm_sync(&TransformInput::new("/d/main.css", css));

    assert_eq!(result.style_text, ".x{color:red}");
    assert_eq!(
        result.output,
        "import aCss from './a.css';\n\
         import bCss from './b.css';\n\
         const mainCss = aCss + bCss + \".x{color:red}\";\n\
         export default mainCss;"
    );
}

#[test]
fn test_cjs_output() {
    let input = TransformInput::new("/d/main.css", "@import './a.css';\n.x{}")
        .with_module(ModuleFormat::Cjs);
    let result = transform_css_to_esm_sync(&input);

    assert_eq!(
        result.output,
        "const aCss = require('./a.css');\n\
         const mainCss = aCss + \"\\n.x{}\";\n\
         module.exports = mainCss;"
    );
}

#[test]
fn test_scoped_component_pipeline() {
    let input = TransformInput::new("/d/my-cmp.css", "@import './theme.css';\n.a{color:red}")
        .with_tag("my-cmp")
        .with_mode("ios")
        .with_encapsulation(Encapsulation::Scoped);
    let result = transform_css_to_esm_sync(&input);

    assert!(result.diagnostics.is_empty());
    assert_eq!(result.default_var_name, "iosMyCmpCss");
    assert_eq!(result.style_text, "\n.a.sc-my-cmp-ios{color:red}");
    assert_eq!(result.imports.len(), 1);
    assert_eq!(result.imports[0].var_name, "iosThemeCss");
    assert_eq!(
        result.imports[0].import_path,
        "./theme.css?tag=my-cmp&encapsulation=scoped&mode=ios"
    );
}

#[test]
fn test_shadow_without_comments_is_not_scoped() {
    let input = TransformInput::new("/d/my-cmp.css", ".a{}")
        .with_tag("my-cmp")
        .with_encapsulation(Encapsulation::Shadow);
    let result = transform_css_to_esm_sync(&input);
    assert_eq!(result.style_text, ".a{}");

    let commented = input.with_comment_original_selector(true);
    let result = transform_css_to_esm_sync(&commented);
    assert_eq!(result.style_text, "/*!@.a*/.a.sc-my-cmp{}");
}

#[tokio::test]
async fn test_optimizer_error_stops_codegen() {
    let optimizer = Arc::new(RejectingOptimizer {
        calls: AtomicUsize::new(0),
    });
    let service = CssToEsmService::default().with_optimizer(optimizer.clone());
    let input = TransformInput::new("/d/main.css", "@import './a.css';\n@import './b.css';\n.x{}");

    let result = service.transform_css_to_esm(&input).await;

    assert_eq!(optimizer.calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.output, "");
    assert!(result.has_error());
    assert_eq!(result.diagnostics.len(), 2);
    // bindings were found but never emitted
    assert_eq!(result.imports.len(), 2);
    // optimizer produced nothing, so the stripped text stays
    assert_eq!(result.style_text, "\n\n.x{}");
}

#[test]
fn test_sync_never_optimizes() {
    let optimizer = Arc::new(RejectingOptimizer {
        calls: AtomicUsize::new(0),
    });
    let service = CssToEsmService::default().with_optimizer(optimizer.clone());
    let input = TransformInput::new("/d/main.css", ".x {  color: red;  }");

    let result = service.transform_css_to_esm_sync(&input);

    assert_eq!(optimizer.calls.load(Ordering::SeqCst), 0);
    assert!(result.diagnostics.is_empty());
    assert!(result.output.contains("\".x {  color: red;  }\""));
}

#[test]
fn test_result_json_shape() {
    let result = transform_css_to_esm_sync(&TransformInput::new("/d/main.css", "@import './a.css';"));
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["defaultVarName"], "mainCss");
    assert_eq!(json["imports"][0]["varName"], "aCss");
    assert_eq!(json["imports"][0]["srcImportText"], "@import './a.css';");
    assert_eq!(json["imports"][0]["importPath"], "./a.css");
}
