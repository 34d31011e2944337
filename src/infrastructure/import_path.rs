use crate::core::interfaces::SpecifierResolver;
use crate::core::models::{Encapsulation, ImportPathData};
use crate::utils::{parent_dir, relative_path, to_slash, DEFAULT_STYLE_MODE};

/// Relative specifier to the imported stylesheet, carrying the component
/// metadata as query parameters so the importee is transformed the same way:
/// `./theme.css?tag=my-cmp&encapsulation=scoped&mode=ios`
#[derive(Debug, Default, Clone, Copy)]
pub struct QuerySpecifierResolver;

impl SpecifierResolver for QuerySpecifierResolver {
    fn resolve_specifier(&self, data: &ImportPathData<'_>) -> String {
        let relative = relative_path(&parent_dir(data.importer_path), data.importee_path);
        let mut specifier = to_slash(&relative);
        if !specifier.starts_with('.') {
            specifier = format!("./{}", specifier);
        }

        let Some(tag) = data.tag else {
            return specifier;
        };

        let mut params = vec![format!("tag={}", tag)];
        if data.encapsulation != Encapsulation::None {
            params.push(format!("encapsulation={}", data.encapsulation));
        }
        if let Some(mode) = data.mode.filter(|m| !m.is_empty() && *m != DEFAULT_STYLE_MODE) {
            params.push(format!("mode={}", mode));
        }

        format!("{}?{}", specifier, params.join("&"))
    }
}
