use crate::core::interfaces::IdentifierSanitizer;
use crate::infrastructure::processors::common::strip_css_comments;
use crate::utils::{
    create_css_var_name, dedupe, is_absolute_url, normalize_path, parent_dir, resolve_path,
    Logger, Result, StyleError,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// keyword, optional `url(`, lazy body, trailing clause up to `;`
static CSS_IMPORT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(@import)\s+(url\()?\s?(.*?)\s?\)?([^;]*);?").unwrap());

/// A local `@import` found by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssImport {
    pub src_import_text: String,
    pub url: String,
    pub file_path: PathBuf,
    pub var_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutput {
    /// Local imports in the order they appear
    pub imports: Vec<CssImport>,
    /// Stylesheet text with every accepted import statement removed
    pub style_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `url(http...)` or `url(//...)`
    External,
    /// `~pkg/...`, left for node-style resolution
    NodeModule,
    Local,
}

/// Finds `@import` statements with a single regex rather than a CSS parser.
/// Statements the pattern can't match are ignored.
pub struct ImportScanner<'a> {
    sanitizer: &'a dyn IdentifierSanitizer,
}

impl<'a> ImportScanner<'a> {
    pub fn new(sanitizer: &'a dyn IdentifierSanitizer) -> Self {
        Self { sanitizer }
    }

    /// Scan `css_text` for imports of `file_path`. Binding names are
    /// allocated against `var_names`, which must already hold the
    /// stylesheet's own binding.
    pub fn scan(
        &self,
        css_text: &str,
        file_path: &Path,
        mode: Option<&str>,
        var_names: &mut HashSet<String>,
    ) -> Result<ScanOutput> {
        let mut output = ScanOutput {
            imports: Vec::new(),
            style_text: css_text.to_string(),
        };

        if !css_text.contains("@import") {
            return Ok(output);
        }

        let stripped = strip_css_comments(css_text);
        let dir = parent_dir(file_path);

        for caps in CSS_IMPORT_REGEX.captures_iter(&stripped) {
            let src_import_text = caps.get(0).map_or("", |m| m.as_str());
            let url: String = caps
                .get(4)
                .map_or("", |m| m.as_str())
                .chars()
                .filter(|c| !matches!(*c, '"' | '\'' | ')'))
                .collect();

            let resolved = match classify_import(src_import_text, &url) {
                ImportKind::External => {
                    Logger::skipped_import(&url, "external url");
                    continue;
                }
                ImportKind::NodeModule => {
                    Logger::skipped_import(&url, "node module");
                    continue;
                }
                ImportKind::Local if is_absolute_url(&url) => normalize_path(&url),
                ImportKind::Local => resolve_path(&dir, &url).map_err(|e| {
                    StyleError::scan(
                        format!("Cannot resolve @import \"{}\": {}", url, e),
                        file_path.to_path_buf(),
                    )
                })?,
            };

            let candidate = create_css_var_name(&resolved, mode, self.sanitizer)
                .map_err(|e| StyleError::scan(e.to_string(), file_path.to_path_buf()))?;
            let var_name = dedupe(candidate, var_names);
            var_names.insert(var_name.clone());

            Logger::resolved_import(&url, &var_name);

            // first occurrence only, in the text as written
            output.style_text = output.style_text.replacen(src_import_text, "", 1);

            output.imports.push(CssImport {
                src_import_text: src_import_text.to_string(),
                url,
                file_path: resolved,
                var_name,
            });
        }

        Ok(output)
    }
}

pub fn classify_import(src_import_text: &str, url: &str) -> ImportKind {
    if !is_local_css_import(src_import_text) {
        ImportKind::External
    } else if url.starts_with('~') {
        ImportKind::NodeModule
    } else {
        ImportKind::Local
    }
}

fn is_local_css_import(src_import_text: &str) -> bool {
    let lowered = src_import_text.to_lowercase();
    if !lowered.contains("url(") {
        return true;
    }

    let compact: String = lowered
        .chars()
        .filter(|c| !matches!(*c, '"' | '\'') && !c.is_whitespace())
        .collect();

    !(compact.contains("url(http") || compact.contains("url(//"))
}
