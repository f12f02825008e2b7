use gradlepatch_core::{Patch, PatchContext, PatchKind, PatchResult, Result, SourceText};

use crate::{patches::applies_kotlin_android, version_updater::update_kotlin_version};

/// Raises `ext.kotlin_version` to `Config::min_kotlin_version`.
#[derive(Debug, Default)]
pub struct KotlinVersionPatch;

impl Patch for KotlinVersionPatch {
    fn kind(&self) -> PatchKind {
        PatchKind::KotlinVersion
    }

    fn applies_to(&self, text: &SourceText) -> bool {
        applies_kotlin_android(text)
    }

    fn apply(&self, text: &mut SourceText, ctx: &PatchContext<'_>) -> Result<PatchResult> {
        let min_version = &ctx.config.min_kotlin_version;
        let previous = update_kotlin_version(text, min_version)?;
        if previous.is_empty() {
            return Ok(PatchResult::AlreadyApplied);
        }
        Ok(PatchResult::Applied(format!(
            "updated Kotlin {} -> {min_version}",
            previous.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradlepatch_core::Config;

    const KOTLIN_PLUGIN: &str = "buildscript {
    ext.kotlin_version = '1.3.50'
}

apply plugin: 'com.android.library'
apply plugin: 'kotlin-android'
";

    #[test]
    fn test_kotlin_version_uses_configured_minimum() {
        let config = Config {
            min_kotlin_version: "1.8.22".to_string(),
            ..Config::default()
        };
        let mut text = SourceText::parse(KOTLIN_PLUGIN);
        assert!(KotlinVersionPatch.applies_to(&text));

        let result = KotlinVersionPatch
            .apply(&mut text, &PatchContext::new(&config, None))
            .unwrap();
        assert_eq!(
            result,
            PatchResult::Applied("updated Kotlin 1.3.50 -> 1.8.22".to_string())
        );
        assert_eq!(text.line(1), Some("    ext.kotlin_version = '1.8.22'"));

        let again = KotlinVersionPatch
            .apply(&mut text, &PatchContext::new(&config, None))
            .unwrap();
        assert_eq!(again, PatchResult::AlreadyApplied);
    }

    #[test]
    fn test_kotlin_version_leaves_commented_pin_alone() {
        let config = Config::default();
        let mut text = SourceText::parse(
            "buildscript {\n    // ext.kotlin_version = '1.9.0'\n    ext.kotlin_version = '1.5.31'\n}\napply plugin: 'kotlin-android'\n",
        );
        let result = KotlinVersionPatch
            .apply(&mut text, &PatchContext::new(&config, None))
            .unwrap();
        assert_eq!(
            result,
            PatchResult::Applied("updated Kotlin 1.5.31 -> 1.7.22".to_string())
        );
        assert_eq!(text.line(1), Some("    // ext.kotlin_version = '1.9.0'"));
        assert_eq!(text.line(2), Some("    ext.kotlin_version = '1.7.22'"));
    }

    #[test]
    fn test_kotlin_version_skips_java_plugins() {
        let text = SourceText::parse("apply plugin: 'com.android.library'\n");
        assert!(!KotlinVersionPatch.applies_to(&text));
    }
}
