use soku_style::{transform_css_to_esm, DiagnosticLevel, ModuleFormat, TransformInput};

#[tokio::test]
async fn test_async_minifies_before_codegen() {
    let input = TransformInput::new(
        "/d/main.css",
        "@import './a.css';\n.x {\n  color: #ff0000;\n}\n",
    )
    .with_autoprefixer(false);

    let result = transform_css_to_esm(&input).await;

    assert!(result.diagnostics.is_empty());
    assert_eq!(result.style_text, ".x{color:red}");
    assert_eq!(
        result.output,
        "import aCss from './a.css';\n\
         const mainCss = aCss + \".x{color:red}\";\n\
         export default mainCss;"
    );
}

#[tokio::test]
async fn test_async_cjs_without_imports() {
    let input = TransformInput::new("/d/button.css", "button { margin: 0px; }")
        .with_module(ModuleFormat::Cjs);

    let result = transform_css_to_esm(&input).await;

    assert!(result.output.starts_with("const buttonCss = \"button{margin:0"));
    assert!(result.output.ends_with("module.exports = buttonCss;"));
}

#[tokio::test]
async fn test_async_parse_error_is_reported_not_thrown() {
    let input = TransformInput::new("/d/broken.css", "@import './a.css';\n.a..b { color: red; }");

    let result = transform_css_to_esm(&input).await;

    assert!(result.output.is_empty());
    assert!(result
        .diagnostics
        .iter()
        .any(|d| d.level == DiagnosticLevel::Error && d.header == "Optimize CSS"));
    // the scan still happened
    assert_eq!(result.imports.len(), 1);
    assert_eq!(result.style_text, "\n.a..b { color: red; }");
}

#[tokio::test]
async fn test_async_empty_stylesheet() {
    let result = transform_css_to_esm(&TransformInput::new("/d/empty.css", "")).await;

    assert!(result.diagnostics.is_empty());
    assert_eq!(result.output, "const emptyCss = \"\";\nexport default emptyCss;");
}

#[test]
fn test_async_outside_tokio_runtime() {
    let input = TransformInput::new("/d/main.css", ".x {\n  color: #ff0000;\n}\n");

    let result = futures::executor::block_on(transform_css_to_esm(&input));

    assert!(result.diagnostics.is_empty());
    assert_eq!(result.style_text, ".x{color:red}");
    assert!(result.output.ends_with("export default mainCss;"));
}
