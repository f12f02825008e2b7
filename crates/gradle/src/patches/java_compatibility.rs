use std::sync::LazyLock;

use gradlepatch_core::{Patch, PatchContext, PatchKind, PatchResult, Result, SourceText};
use regex::Regex;

use crate::{
    block::{locate_block, substitute_in_span},
    patches::ANDROID_BLOCK,
};

static SOURCE_COMPATIBILITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sourceCompatibility\s*=?\s*)project\.sourceCompatibility")
        .expect("hardcoded regex must compile")
});

static TARGET_COMPATIBILITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(targetCompatibility\s*=?\s*)project\.targetCompatibility")
        .expect("hardcoded regex must compile")
});

/// Pins `sourceCompatibility project.sourceCompatibility` (and the target counterpart) inside
/// `android { }` to `JavaVersion.VERSION_<n>`.
#[derive(Debug, Default)]
pub struct JavaCompatibilityPatch;

impl Patch for JavaCompatibilityPatch {
    fn kind(&self) -> PatchKind {
        PatchKind::JavaCompatibility
    }

    fn applies_to(&self, text: &SourceText) -> bool {
        text.contains("project.sourceCompatibility") || text.contains("project.targetCompatibility")
    }

    fn apply(&self, text: &mut SourceText, ctx: &PatchContext<'_>) -> Result<PatchResult> {
        let span = locate_block(text, ANDROID_BLOCK)?;
        let java_version = ctx.config.java_version_constant();
        let replacement = format!("${{1}}{java_version}");

        let changed = substitute_in_span(text, span, &SOURCE_COMPATIBILITY_PATTERN, &replacement)
            + substitute_in_span(text, span, &TARGET_COMPATIBILITY_PATTERN, &replacement);
        if changed == 0 {
            return Ok(PatchResult::AlreadyApplied);
        }
        Ok(PatchResult::Applied(format!(
            "pinned Java compatibility to {java_version} ({changed} lines)"
        )))
    }
}
