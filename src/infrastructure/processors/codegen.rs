use crate::core::models::{ModuleFormat, TransformInput, TransformResult};

/// Emit the program whose default export is every imported stylesheet's
/// value, in import order, followed by this file's own CSS.
pub fn generate_module(input: &TransformInput, mut results: TransformResult) -> TransformResult {
    let mut code = String::new();

    for css_import in &results.imports {
        match input.module {
            ModuleFormat::Cjs => code.push_str(&format!(
                "const {} = require('{}');\n",
                css_import.var_name, css_import.import_path
            )),
            ModuleFormat::Esm => code.push_str(&format!(
                "import {} from '{}';\n",
                css_import.var_name, css_import.import_path
            )),
        }
    }

    code.push_str(&format!("const {} = ", results.default_var_name));
    for css_import in &results.imports {
        code.push_str(&format!("{} + ", css_import.var_name));
    }
    code.push_str(&format!("{};\n", json_string(&results.style_text)));

    match input.module {
        ModuleFormat::Cjs => {
            code.push_str(&format!("module.exports = {};", results.default_var_name))
        }
        ModuleFormat::Esm => code.push_str(&format!("export default {};", results.default_var_name)),
    }

    results.output = code;
    results
}

fn json_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}
