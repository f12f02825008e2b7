use gradlepatch_core::{Patch, PatchContext, PatchError, PatchKind, PatchResult, Result, SourceText};
use gradlepatch_utils::{detect_indent, leading_whitespace};

use crate::{
    block::{insert_into_block, locate_block},
    patches::{ANDROID_BLOCK, applies_android_library},
};

/// Declares `namespace '<package>'` at the top of `android { }`, taking the package from the
/// module's `AndroidManifest.xml`.
#[derive(Debug, Default)]
pub struct NamespacePatch;

impl Patch for NamespacePatch {
    fn kind(&self) -> PatchKind {
        PatchKind::Namespace
    }

    fn applies_to(&self, text: &SourceText) -> bool {
        applies_android_library(text)
    }

    fn needs_manifest(&self) -> bool {
        true
    }

    fn apply(&self, text: &mut SourceText, ctx: &PatchContext<'_>) -> Result<PatchResult> {
        if text.contains("namespace") {
            return Ok(PatchResult::AlreadyApplied);
        }
        let package = ctx
            .manifest_package
            .ok_or_else(|| PatchError::not_found("manifest package"))?;

        let span = locate_block(text, ANDROID_BLOCK)?;
        let outer = leading_whitespace(text.line(span.start).unwrap_or_default());
        let indent = detect_indent(
            outer,
            text.lines()[span.start + 1..=span.end]
                .iter()
                .map(String::as_str),
        );
        insert_into_block(text, span, &[format!("{indent}namespace '{package}'")])?;
        Ok(PatchResult::Applied(format!("added namespace '{package}'")))
    }
}
