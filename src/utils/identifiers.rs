// Binding-name derivation for stylesheet modules

use crate::core::interfaces::IdentifierSanitizer;
use crate::utils::{Result, StyleError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

/// Mode name meaning "no particular mode"
pub const DEFAULT_STYLE_MODE: &str = "$";

static UPPER_OR_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z0-9])").unwrap());
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[|;$%@"<>()+,.{}_!/\\]"#).unwrap());
static NON_IDENT_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_$]").unwrap());

const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Camel-cases a file name into a JS identifier: `my-cmp.ios.css` becomes
/// `myCmpIosCss`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsVarNameSanitizer;

impl IdentifierSanitizer for JsVarNameSanitizer {
    fn sanitize(&self, name: &str) -> String {
        let name = ['?', '#', '&', '='].iter().fold(name, |acc, sep| {
            acc.split(*sep).next().unwrap_or_default()
        });

        let dashed = to_dash_case(name);
        let dashed = PUNCTUATION.replace_all(&dashed, "-");
        let pascal = dash_to_pascal_case(&dashed);
        let cleaned = NON_IDENT_CHARS.replace_all(&pascal, "");

        let mut chars = cleaned.chars();
        let mut var_name = match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
            None => String::new(),
        };

        let starts_with_digit = var_name.chars().next().is_some_and(|c| c.is_ascii_digit());
        if starts_with_digit || RESERVED_WORDS.contains(&var_name.as_str()) {
            var_name.insert(0, '_');
        }

        var_name
    }
}

fn to_dash_case(s: &str) -> String {
    UPPER_OR_DIGIT
        .replace_all(s, " ${1}")
        .trim()
        .replace(' ', "-")
        .to_lowercase()
}

fn dash_to_pascal_case(s: &str) -> String {
    s.to_lowercase()
        .split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Binding name for a stylesheet: its base name, prefixed with a non-default
/// mode that the name doesn't already mention, then sanitized.
pub fn create_css_var_name(
    file_path: &Path,
    mode: Option<&str>,
    sanitizer: &dyn IdentifierSanitizer,
) -> Result<String> {
    let mut base = file_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(mode) = mode.filter(|m| !m.is_empty() && *m != DEFAULT_STYLE_MODE) {
        if !base.contains(mode) {
            base = format!("{}-{}", mode, base);
        }
    }

    let var_name = sanitizer.sanitize(&base);
    if var_name.is_empty() {
        return Err(StyleError::Other(format!(
            "Unable to derive a binding name for {}",
            file_path.display()
        )));
    }

    Ok(var_name)
}

/// Disambiguate against names already handed out by appending the number of
/// names allocated so far. Not a per-name counter. If that suffixed name was
/// itself allocated earlier, the suffix keeps counting up until it is free.
pub fn dedupe(candidate: String, allocated: &HashSet<String>) -> String {
    if !allocated.contains(&candidate) {
        return candidate;
    }

    let mut suffix = allocated.len();
    loop {
        let name = format!("{}{}", candidate, suffix);
        if !allocated.contains(&name) {
            return name;
        }
        suffix += 1;
    }
}

/// Scope id used for selector rewriting: `sc-<tag>` plus `-<mode>` for a
/// non-default mode.
pub fn get_scope_id(tag: &str, mode: Option<&str>) -> String {
    match mode.filter(|m| !m.is_empty() && *m != DEFAULT_STYLE_MODE) {
        Some(mode) => format!("sc-{}-{}", tag, mode),
        None => format!("sc-{}", tag),
    }
}
