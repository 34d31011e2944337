/// Shared helpers for the stylesheet processors

/// Remove `/* ... */` comments that sit outside string literals. A quote
/// preceded by a backslash does not open or close a string. An unterminated
/// comment swallows the rest of the input.
pub fn strip_css_comments(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());
    let mut inside_string: Option<char> = None;
    let mut i = 0;

    while i < chars.len() {
        let current = chars[i];
        let escaped = i > 0 && chars[i - 1] == '\\';

        if !escaped && (current == '"' || current == '\'') {
            match inside_string {
                Some(quote) if quote == current => inside_string = None,
                None => inside_string = Some(current),
                _ => {}
            }
        }

        if inside_string.is_none() && current == '/' && chars.get(i + 1) == Some(&'*') {
            let mut j = i + 2;
            while j < chars.len() && !(chars[j] == '*' && chars.get(j + 1) == Some(&'/')) {
                j += 1;
            }
            i = j + 2;
            continue;
        }

        output.push(current);
        i += 1;
    }

    output
}
