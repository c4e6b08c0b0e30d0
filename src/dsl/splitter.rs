//! Splitter for directive lines.

/// Split a line into trimmed directives on commas outside parentheses.
///
/// Commas inside `(...)` belong to the directive, so `1++(10,20),5-6` yields
/// `1++(10,20)` and `5-6`. Parentheses are counted but not checked for
/// balance; an unbalanced directive fails classification later. Empty
/// fragments are kept so the classifier can report them. Only a line that
/// ends exactly on a comma has no trailing fragment.
pub fn split_directives(line: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;

    for (pos, ch) in line.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                items.push(line[start..pos].trim());
                start = pos + ch.len_utf8();
            }
            _ => {}
        }
    }

    if start < line.len() {
        items.push(line[start..].trim());
    }
    items
}
