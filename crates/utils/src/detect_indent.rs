/// Leading whitespace of a line.
#[must_use]
pub fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Detects the indentation used for the body of a block.
///
/// Scans `body` for the first non-blank line indented deeper than `outer` and returns its
/// leading whitespace. Falls back to `outer` plus one unit (a tab when `outer` is tab-indented,
/// four spaces otherwise).
#[must_use]
pub fn detect_indent<'a>(outer: &str, body: impl IntoIterator<Item = &'a str>) -> String {
    for line in body {
        if line.trim().is_empty() {
            continue;
        }
        let indent = leading_whitespace(line);
        if indent.len() > outer.len() && indent.starts_with(outer) {
            return indent.to_string();
        }
    }
    if outer.ends_with('\t') {
        format!("{outer}\t")
    } else {
        format!("{outer}    ")
    }
}
