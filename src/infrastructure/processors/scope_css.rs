// Class-based selector scoping for scoped components
//
// Works on the raw text: rule preludes get the scope class appended to their
// last compound selector, conditional group rules are descended into, and
// every other block (keyframes, font-face, ...) is copied through untouched.

use crate::core::interfaces::ScopeRewriter;
use crate::utils::{Result, StyleError};

/// At-rules whose blocks hold ordinary style rules
const GROUPING_AT_RULES: &[&str] = &["media", "supports", "container", "layer", "document"];

#[derive(Debug, Default, Clone, Copy)]
pub struct SelectorScopeRewriter;

impl ScopeRewriter for SelectorScopeRewriter {
    fn rewrite(&self, css: &str, scope_id: &str, comment_original_selector: bool) -> Result<String> {
        scope_rules(css, scope_id, comment_original_selector)
    }
}

fn scope_rules(css: &str, scope_id: &str, comment: bool) -> Result<String> {
    let mut out = String::with_capacity(css.len() + css.len() / 4);
    let mut rest = css;

    while let Some((idx, delim)) = next_delimiter(rest) {
        match delim {
            Delimiter::Comment => {
                let end = rest[idx + 2..]
                    .find("*/")
                    .map_or(rest.len(), |e| idx + 2 + e + 2);
                out.push_str(&rest[..end]);
                rest = &rest[end..];
            }
            Delimiter::Semicolon | Delimiter::CloseBrace => {
                out.push_str(&rest[..=idx]);
                rest = &rest[idx + 1..];
            }
            Delimiter::OpenBrace => {
                let close = matching_brace(rest, idx).ok_or_else(|| {
                    StyleError::scope(format!("Unclosed block after \"{}\"", rest[..idx].trim()))
                })?;
                let prelude = &rest[..idx];
                let body = &rest[idx + 1..close];
                let selector = prelude.trim();

                if let Some(at_rule) = selector.strip_prefix('@') {
                    let name: String = at_rule
                        .chars()
                        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
                        .collect::<String>()
                        .to_ascii_lowercase();

                    if GROUPING_AT_RULES.contains(&name.as_str()) {
                        out.push_str(prelude);
                        out.push('{');
                        out.push_str(&scope_rules(body, scope_id, comment)?);
                        out.push('}');
                    } else {
                        out.push_str(&rest[..=close]);
                    }
                } else {
                    let leading = prelude.len() - prelude.trim_start().len();
                    let trailing = &prelude[leading + selector.len()..];

                    out.push_str(&prelude[..leading]);
                    if comment {
                        out.push_str(&format!("/*!@{}*/", selector));
                    }
                    out.push_str(&scope_selector_list(selector, scope_id));
                    out.push_str(trailing);
                    out.push('{');
                    out.push_str(body);
                    out.push('}');
                }

                rest = &rest[close + 1..];
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    OpenBrace,
    CloseBrace,
    Semicolon,
    Comment,
}

/// Next structural character outside strings and parentheses
fn next_delimiter(text: &str) -> Option<(usize, Delimiter)> {
    let bytes = text.as_bytes();
    let mut quote: Option<u8> = None;
    let mut parens = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
        } else {
            match b {
                b'"' | b'\'' => quote = Some(b),
                b'(' => parens += 1,
                b')' => parens = parens.saturating_sub(1),
                b'/' if bytes.get(i + 1) == Some(&b'*') => return Some((i, Delimiter::Comment)),
                b'{' if parens == 0 => return Some((i, Delimiter::OpenBrace)),
                b'}' if parens == 0 => return Some((i, Delimiter::CloseBrace)),
                b';' if parens == 0 => return Some((i, Delimiter::Semicolon)),
                _ => {}
            }
        }
        i += 1;
    }

    None
}

/// Index of the `}` closing the `{` at `open`
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = open;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i = text[i + 2..].find("*/").map_or(bytes.len(), |e| i + 2 + e + 2);
            continue;
        } else {
            match b {
                b'"' | b'\'' => quote = Some(b),
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }

    None
}

fn scope_selector_list(selectors: &str, scope_id: &str) -> String {
    split_top_level(selectors, |b| b == b',')
        .into_iter()
        .map(|s| scope_selector(s.trim(), scope_id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn scope_selector(selector: &str, scope_id: &str) -> String {
    let host_class = format!(".{}-h", scope_id);
    let scope_class = format!(".{}", scope_id);

    if selector.contains("::slotted(") {
        return rewrite_functional(selector, "::slotted(", |inner| {
            format!(".{}-s > {}", scope_id, inner)
        });
    }

    let (selector, had_host) = if selector.contains(":host") {
        (rewrite_host(selector, &host_class), true)
    } else {
        (selector.to_string(), false)
    };

    let start = last_compound_start(&selector);
    let compound = &selector[start..];
    if had_host && compound.contains(&host_class) {
        return selector;
    }

    let insert_at = start + pseudo_start(compound).unwrap_or(compound.len());
    let mut scoped = selector;
    scoped.insert_str(insert_at, &scope_class);
    scoped
}

/// `:host` becomes the host class, `:host(x)` becomes `x` plus the host class.
/// `:host-context(...)` is left alone.
fn rewrite_host(selector: &str, host_class: &str) -> String {
    let mut out = String::with_capacity(selector.len() + host_class.len());
    let mut rest = selector;

    while let Some(pos) = rest.find(":host") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + ":host".len()..];

        if after.starts_with('-') {
            out.push_str(":host");
            rest = after;
        } else if after.starts_with('(') {
            match matching_paren(after, 0) {
                Some(close) => {
                    out.push_str(after[1..close].trim());
                    out.push_str(host_class);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push_str(host_class);
                    rest = after;
                }
            }
        } else {
            out.push_str(host_class);
            rest = after;
        }
    }

    out.push_str(rest);
    out
}

fn rewrite_functional(selector: &str, prefix: &str, f: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(selector.len());
    let mut rest = selector;

    while let Some(pos) = rest.find(prefix) {
        out.push_str(&rest[..pos]);
        let open = pos + prefix.len() - 1;
        match matching_paren(rest, open) {
            Some(close) => {
                out.push_str(&f(rest[open + 1..close].trim()));
                rest = &rest[close + 1..];
            }
            None => {
                out.push_str(&rest[pos..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte offset where the last compound selector begins
fn last_compound_start(selector: &str) -> usize {
    let mut depth = 0usize;
    let mut start = 0;

    for (i, b) in selector.bytes().enumerate() {
        match b {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b' ' | b'\t' | b'\n' | b'>' | b'+' | b'~' if depth == 0 => start = i + 1,
            _ => {}
        }
    }

    start
}

/// Offset of the first top-level `:` inside a compound selector
fn pseudo_start(compound: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in compound.bytes().enumerate() {
        match b {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_top_level(text: &str, is_separator: impl Fn(u8) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, b) in text.bytes().enumerate() {
        match b {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            _ if depth == 0 && is_separator(b) => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    parts.push(&text[start..]);
    parts
}
