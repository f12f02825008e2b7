use std::sync::LazyLock;

use gradlepatch_core::{
    Patch, PatchContext, PatchError, PatchKind, PatchResult, Result, SourceText,
};
use gradlepatch_utils::{detect_indent, leading_whitespace};
use regex::Regex;

use crate::block::check_balance;

const MARKER: &str = "// Pinned by gradlepatch: agpJavaVersion lookup removed for AGP 8";

static DYNAMIC_COMPILE_OPTIONS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)def\s+androidPlugin\s*=\s*project\.extensions\.findByName\(\s*['"]android['"]\s*\).*?compileOptions\s*\{[^}]+\}"#,
    )
    .expect("hardcoded regex must compile")
});

/// Replaces compile options derived at configuration time from the Android plugin
/// (`agpJavaVersion`) with a fixed `compileOptions` block.
#[derive(Debug, Default)]
pub struct AgpJavaVersionPatch;

impl Patch for AgpJavaVersionPatch {
    fn kind(&self) -> PatchKind {
        PatchKind::AgpJavaVersion
    }

    fn applies_to(&self, text: &SourceText) -> bool {
        text.contains("agpJavaVersion")
    }

    fn apply(&self, text: &mut SourceText, ctx: &PatchContext<'_>) -> Result<PatchResult> {
        let rendered = text.render();
        let Some(found) = DYNAMIC_COMPILE_OPTIONS_PATTERN.find(&rendered) else {
            if text.contains(MARKER) {
                return Ok(PatchResult::AlreadyApplied);
            }
            return Err(PatchError::not_found("dynamic `agpJavaVersion` compileOptions"));
        };

        let line_start = rendered[..found.start()]
            .rfind('\n')
            .map_or(0, |pos| pos + 1);
        let indent = leading_whitespace(&rendered[line_start..found.start()]);
        let inner = detect_indent(indent, std::iter::empty());
        let java_version = ctx.config.java_version_constant();
        let replacement = [
            MARKER.to_string(),
            format!("{indent}compileOptions {{"),
            format!("{inner}sourceCompatibility {java_version}"),
            format!("{inner}targetCompatibility {java_version}"),
            format!("{indent}}}"),
        ]
        .join(text.ending().as_str());

        let mut staged = text.clone();
        staged.replace_all(&format!(
            "{}{replacement}{}",
            &rendered[..found.start()],
            &rendered[found.end()..]
        ));
        check_balance(&staged).map_err(|err| {
            PatchError::malformed(format!(
                "replacing the agpJavaVersion block would break braces: {err}"
            ))
        })?;
        *text = staged;
        Ok(PatchResult::Applied(format!(
            "replaced agpJavaVersion compileOptions with {java_version}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradlepatch_core::Config;

    const DYNAMIC: &str = "android {
    compileSdkVersion 33

    def androidPlugin = project.extensions.findByName(\"android\")
    def agpJavaVersion = androidPlugin.compileOptions.sourceCompatibility
    compileOptions {
        sourceCompatibility agpJavaVersion
        targetCompatibility agpJavaVersion
    }

    defaultConfig {
        minSdkVersion 16
    }
}
";

    const FIXED: &str = "android {
    compileSdkVersion 33

    // Pinned by gradlepatch: agpJavaVersion lookup removed for AGP 8
    compileOptions {
        sourceCompatibility JavaVersion.VERSION_11
        targetCompatibility JavaVersion.VERSION_11
    }

    defaultConfig {
        minSdkVersion 16
    }
}
";

    fn apply(text: &mut SourceText) -> Result<PatchResult> {
        let config = Config::default();
        AgpJavaVersionPatch.apply(text, &PatchContext::new(&config, None))
    }

    #[test]
    fn test_agp_java_version_replaced() {
        let mut text = SourceText::parse(DYNAMIC);
        assert!(AgpJavaVersionPatch.applies_to(&text));
        let result = apply(&mut text).unwrap();
        assert!(matches!(result, PatchResult::Applied(_)));
        assert_eq!(text.render(), FIXED);
    }

    #[test]
    fn test_agp_java_version_is_idempotent() {
        let mut text = SourceText::parse(DYNAMIC);
        apply(&mut text).unwrap();
        assert_eq!(apply(&mut text).unwrap(), PatchResult::AlreadyApplied);
        assert_eq!(text.render(), FIXED);
    }

    #[test]
    fn test_agp_java_version_keeps_crlf() {
        let mut text = SourceText::parse(&DYNAMIC.replace('\n', "\r\n"));
        apply(&mut text).unwrap();
        assert_eq!(text.render(), FIXED.replace('\n', "\r\n"));
    }

    #[test]
    fn test_agp_java_version_refuses_to_unbalance_braces() {
        let content = "android {
    def androidPlugin = project.extensions.findByName('android')
    if (androidPlugin.hasProperty('agpJavaVersion')) {
        compileOptions {
            sourceCompatibility agpJavaVersion
        }
    }
}
";
        let mut text = SourceText::parse(content);
        let err = apply(&mut text).unwrap_err();
        assert!(matches!(err, PatchError::Malformed { .. }));
        assert_eq!(text.render(), content);
    }

    #[test]
    fn test_agp_java_version_unrecognized_usage() {
        let mut text = SourceText::parse("android {\n    println agpJavaVersion\n}\n");
        assert!(apply(&mut text).unwrap_err().is_not_found());
    }
}
