mod agp_java_version;
mod java_compatibility;
mod kotlin_options;
mod kotlin_version;
mod namespace;

use std::sync::LazyLock;

use gradlepatch_core::SourceText;
use regex::Regex;

pub use agp_java_version::AgpJavaVersionPatch;
pub use java_compatibility::JavaCompatibilityPatch;
pub use kotlin_options::KotlinOptionsPatch;
pub use kotlin_version::KotlinVersionPatch;
pub use namespace::NamespacePatch;

/// Block every patch edits
pub(crate) const ANDROID_BLOCK: &str = "android";

static ANDROID_LIBRARY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"]com\.android\.library['"]"#).expect("hardcoded regex must compile")
});

static KOTLIN_ANDROID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"['"](kotlin-android|org\.jetbrains\.kotlin\.android)['"]"#)
        .expect("hardcoded regex must compile")
});

/// `apply plugin: 'com.android.library'` or `id 'com.android.library'`
pub(crate) fn applies_android_library(text: &SourceText) -> bool {
    text.lines()
        .iter()
        .any(|line| ANDROID_LIBRARY_PATTERN.is_match(line))
}

/// `apply plugin: 'kotlin-android'` or `id 'org.jetbrains.kotlin.android'`
pub(crate) fn applies_kotlin_android(text: &SourceText) -> bool {
    text.lines()
        .iter()
        .any(|line| KOTLIN_ANDROID_PATTERN.is_match(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("apply plugin: 'com.android.library'", true)]
    #[case("    id \"com.android.library\"", true)]
    #[case("apply plugin: 'com.android.application'", false)]
    #[case("// com.android.library", false)]
    fn test_applies_android_library(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(applies_android_library(&SourceText::parse(line)), expected);
    }

    #[rstest]
    #[case("apply plugin: 'kotlin-android'", true)]
    #[case("    id 'org.jetbrains.kotlin.android'", true)]
    #[case("apply plugin: 'kotlin-android-extensions'", false)]
    #[case("apply plugin: 'com.android.library'", false)]
    fn test_applies_kotlin_android(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(applies_kotlin_android(&SourceText::parse(line)), expected);
    }
}
