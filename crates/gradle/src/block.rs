//! Brace-scoped block editing.
//!
//! Blocks are found by walking lines with [`Lexer`] and counting structural braces, so braces in
//! strings and comments do not shift spans. A block start is a line of the form
//! `<indent><name> <optional spaces>{` that begins in code at the depth being searched.

use std::borrow::Cow;

use gradlepatch_core::{PatchError, Result, SourceText, Span};
use regex::Regex;

use crate::lexer::{Brace, LexState, Lexer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Searching,
    InBlock { start: usize },
    Done(Span),
}

fn block_start_pattern(name: &str) -> Result<Regex> {
    Regex::new(&format!(r"^\s*{}\s*\{{", regex::escape(name)))
        .map_err(|err| PatchError::malformed(format!("invalid block name `{name}`: {err}")))
}

fn block_anchor(name: &str) -> String {
    format!("block `{name}`")
}

/// Scan `first..=last` for the first block named `name` opening at `target_depth`, where depth
/// is counted from zero at `first`.
///
/// With `require_balance` every brace up to `last` must match; otherwise scanning stops as soon
/// as the block closes.
fn scan_for_block(
    text: &SourceText,
    first: usize,
    last: usize,
    name: &str,
    target_depth: usize,
    require_balance: bool,
) -> Result<Span> {
    let start_pattern = block_start_pattern(name)?;
    let mut lexer = Lexer::new();
    let mut depth = 0usize;
    let mut state = ScanState::Searching;

    for (index, line) in text.lines().iter().enumerate().take(last + 1).skip(first) {
        let scan = lexer.scan_line(line);
        let is_start =
            scan.starts_in_code && depth == target_depth && start_pattern.is_match(line);

        match state {
            ScanState::Searching if is_start => state = ScanState::InBlock { start: index },
            ScanState::Done(span) if is_start => {
                tracing::warn!(
                    "Ignoring second `{name}` block on line {} (using {span})",
                    index + 1
                );
            }
            _ => {}
        }

        for brace in scan.braces {
            match brace {
                Brace::Open => depth += 1,
                Brace::Close => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        PatchError::malformed(format!("unmatched `}}` on line {}", index + 1))
                    })?;
                    if let ScanState::InBlock { start } = state {
                        if depth == target_depth {
                            state = ScanState::Done(Span::new(start, index));
                        }
                    }
                }
            }
        }

        if let (ScanState::Done(span), false) = (state, require_balance) {
            return Ok(span);
        }
    }

    match state {
        ScanState::Searching => Err(PatchError::not_found(block_anchor(name))),
        ScanState::InBlock { start } => Err(PatchError::malformed(format!(
            "block `{name}` opened on line {} is never closed",
            start + 1
        ))),
        ScanState::Done(_) if require_balance && depth != 0 => Err(PatchError::malformed(
            format!("{depth} unclosed `{{` at end of file"),
        )),
        ScanState::Done(span) => Ok(span),
    }
}

/// Verify that every structural brace in `text` is matched and no comment or multi-line string
/// is left open.
///
/// # Errors
/// Returns `PatchError::Malformed` naming the first unmatched `}`, the number of unclosed `{`,
/// or the unterminated comment or string.
pub fn check_balance(text: &SourceText) -> Result<()> {
    let mut lexer = Lexer::new();
    let mut depth = 0usize;
    for (index, line) in text.lines().iter().enumerate() {
        for brace in lexer.scan_line(line).braces {
            match brace {
                Brace::Open => depth += 1,
                Brace::Close => {
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        PatchError::malformed(format!("unmatched `}}` on line {}", index + 1))
                    })?;
                }
            }
        }
    }
    match lexer.state() {
        LexState::BlockComment => Err(PatchError::malformed(
            "unterminated block comment at end of file",
        )),
        LexState::TripleString(quote) => Err(PatchError::malformed(format!(
            "unterminated {quote}{quote}{quote} string at end of file"
        ))),
        LexState::Code if depth != 0 => Err(PatchError::malformed(format!(
            "{depth} unclosed `{{` at end of file"
        ))),
        LexState::Code => Ok(()),
    }
}

/// Find the first top-level block named `name`.
///
/// The whole text is scanned, so unbalanced braces anywhere are reported. Later top-level
/// blocks with the same name are ignored.
///
/// # Errors
/// `PatchError::NotFound` when no such block exists, `PatchError::Malformed` when braces are
/// unbalanced or the block never closes.
pub fn locate_block(text: &SourceText, name: &str) -> Result<Span> {
    if text.lines().is_empty() {
        return Err(PatchError::not_found(block_anchor(name)));
    }
    scan_for_block(text, 0, text.len() - 1, name, 0, true)
}

/// Find the first direct child block named `name` inside `parent`.
///
/// # Errors
/// `PatchError::NotFound` when `parent` has no such child, `PatchError::Malformed` when the
/// child never closes inside `parent`.
pub fn locate_subblock(text: &SourceText, parent: Span, name: &str) -> Result<Span> {
    if parent.end >= text.len() {
        return Err(PatchError::malformed(format!(
            "{parent} is outside the {} line text",
            text.len()
        )));
    }
    scan_for_block(text, parent.start, parent.end, name, 1, false)
}

/// Insert `payload` directly after the opening line of `span`.
///
/// # Errors
/// `PatchError::Malformed` when the block opens and closes on the same line.
pub fn insert_into_block(text: &mut SourceText, span: Span, payload: &[String]) -> Result<()> {
    if span.is_single_line() {
        return Err(PatchError::malformed(format!(
            "block on line {} opens and closes on the same line",
            span.start + 1
        )));
    }
    text.insert_lines(span.start + 1, payload.iter().cloned());
    Ok(())
}

/// Insert `payload` right after the closing line of the child block `sub_block` of `span`.
/// Returns the child's span as it was before the insertion. The text is left untouched on error.
///
/// # Errors
/// `PatchError::NotFound` when the child is absent, `PatchError::Malformed` when the child
/// closes on the parent's closing line.
pub fn insert_after_subblock(
    text: &mut SourceText,
    span: Span,
    sub_block: &str,
    payload: &[String],
) -> Result<Span> {
    let sub_span = locate_subblock(text, span, sub_block)?;
    if sub_span.end >= span.end {
        return Err(PatchError::malformed(format!(
            "block `{sub_block}` closes on the same line as its parent (line {})",
            span.end + 1
        )));
    }
    text.insert_lines(sub_span.end + 1, payload.iter().cloned());
    Ok(sub_span)
}

/// Apply `pattern` → `replacement` (with `$1` style expansion) to the lines of `span` only.
/// Returns how many lines changed.
pub fn substitute_in_span(
    text: &mut SourceText,
    span: Span,
    pattern: &Regex,
    replacement: &str,
) -> usize {
    let mut changed = 0;
    for index in span.start..=span.end {
        let Some(line) = text.line(index) else {
            break;
        };
        let replaced = match pattern.replace_all(line, replacement) {
            Cow::Borrowed(_) => continue,
            Cow::Owned(replaced) if replaced == line => continue,
            Cow::Owned(replaced) => replaced,
        };
        text.replace_line(index, replaced);
        changed += 1;
    }
    changed
}
