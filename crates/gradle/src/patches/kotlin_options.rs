use gradlepatch_core::{Patch, PatchContext, PatchKind, PatchResult, Result, SourceText};
use gradlepatch_utils::{detect_indent, leading_whitespace};

use crate::{
    block::{insert_after_subblock, locate_block, locate_subblock},
    patches::{ANDROID_BLOCK, applies_kotlin_android},
};

const COMPILE_OPTIONS_BLOCK: &str = "compileOptions";

/// Adds `kotlinOptions { jvmTarget = '<n>' }` right after `android.compileOptions`, indented
/// like its sibling.
#[derive(Debug, Default)]
pub struct KotlinOptionsPatch;

impl Patch for KotlinOptionsPatch {
    fn kind(&self) -> PatchKind {
        PatchKind::KotlinOptions
    }

    fn applies_to(&self, text: &SourceText) -> bool {
        applies_kotlin_android(text)
    }

    fn apply(&self, text: &mut SourceText, ctx: &PatchContext<'_>) -> Result<PatchResult> {
        if text.contains("kotlinOptions") {
            return Ok(PatchResult::AlreadyApplied);
        }
        let android = locate_block(text, ANDROID_BLOCK)?;
        let compile_options = locate_subblock(text, android, COMPILE_OPTIONS_BLOCK)?;

        let indent = leading_whitespace(text.line(compile_options.start).unwrap_or_default());
        let inner = detect_indent(
            indent,
            text.lines()[compile_options.start + 1..=compile_options.end]
                .iter()
                .map(String::as_str),
        );
        let jvm_target = &ctx.config.jvm_target;
        let payload = [
            String::new(),
            format!("{indent}kotlinOptions {{"),
            format!("{inner}jvmTarget = '{jvm_target}'"),
            format!("{indent}}}"),
        ];

        insert_after_subblock(text, android, COMPILE_OPTIONS_BLOCK, &payload)?;
        Ok(PatchResult::Applied(format!(
            "added kotlinOptions {{ jvmTarget = '{jvm_target}' }}"
        )))
    }
}
