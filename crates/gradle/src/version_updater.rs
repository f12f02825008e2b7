use std::{cmp::Ordering, sync::LazyLock};

use gradlepatch_core::{PatchError, Result, SourceText};
use regex::Regex;

use crate::lexer::Lexer;

static KOTLIN_VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(ext\.kotlin_version\s*=\s*)(['"])([^'"]*)['"]"#)
        .expect("hardcoded regex must compile")
});

/// Parse a dotted numeric version such as `1.7.22` into its components
///
/// # Errors
/// Returns `PatchError::Malformed` if any component is not an unsigned integer.
pub fn parse_version(version: &str) -> Result<Vec<u64>> {
    version
        .trim()
        .split('.')
        .map(|part| {
            part.parse::<u64>()
                .map_err(|_| PatchError::malformed(format!("unparseable version `{version}`")))
        })
        .collect()
}

/// Compare dotted versions component by component; a strict prefix orders first
/// (`1.7` < `1.7.0`).
///
/// # Errors
/// Returns `PatchError::Malformed` if either version cannot be parsed.
pub fn compare_versions(left: &str, right: &str) -> Result<Ordering> {
    Ok(parse_version(left)?.cmp(&parse_version(right)?))
}

/// Raise every live `ext.kotlin_version` assignment below `min_version` to exactly
/// `min_version`, keeping the quote style. Assignments inside comments are ignored.
/// Returns the previous versions of the rewritten assignments, empty when nothing changed.
///
/// # Errors
/// `PatchError::NotFound` when there is no literal `ext.kotlin_version` assignment in code,
/// `PatchError::Malformed` when a version cannot be parsed.
pub fn update_kotlin_version(text: &mut SourceText, min_version: &str) -> Result<Vec<String>> {
    let mut lexer = Lexer::new();
    let mut found = false;
    let mut updates = Vec::new();
    for (index, line) in text.lines().iter().enumerate() {
        let scan = lexer.scan_line(line);
        let Some(caps) = KOTLIN_VERSION_PATTERN
            .captures_iter(line)
            .find(|caps| caps.get(0).is_some_and(|m| scan.is_code(m.start())))
        else {
            continue;
        };
        let current = &caps[3];
        if current.contains('$') {
            continue;
        }
        found = true;
        if compare_versions(current, min_version)? != Ordering::Less {
            continue;
        }
        let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));
        let quote = &caps[2];
        let updated = format!(
            "{}{}{quote}{min_version}{quote}{}",
            &line[..start],
            &caps[1],
            &line[end..]
        );
        updates.push((index, current.to_string(), updated));
    }
    if !found {
        return Err(PatchError::not_found("literal `ext.kotlin_version`"));
    }

    Ok(updates
        .into_iter()
        .map(|(index, previous, updated)| {
            text.replace_line(index, updated);
            previous
        })
        .collect())
}
