use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use gradlepatch_core::{PatchError, Result};
use quick_xml::{Reader, events::Event};
use regex::Regex;

static PACKAGE_ATTRIBUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"package\s*=\s*"([^"]+)""#).expect("hardcoded regex must compile")
});

/// `src/main/AndroidManifest.xml` next to a module's build file
#[must_use]
pub fn manifest_path(module_dir: &Path) -> PathBuf {
    module_dir.join("src").join("main").join("AndroidManifest.xml")
}

/// `package` attribute of the root `<manifest>` element.
///
/// Manifests that quick-xml rejects fall back to a plain attribute search.
#[must_use]
pub fn manifest_package(content: &str) -> Option<String> {
    let mut reader = Reader::from_str(content);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element) | Event::Empty(element)) => {
                if element.local_name().as_ref() != b"manifest" {
                    return None;
                }
                return element
                    .attributes()
                    .flatten()
                    .find(|attribute| attribute.key.as_ref() == b"package")
                    .and_then(|attribute| String::from_utf8(attribute.value.into_owned()).ok())
                    .filter(|package| !package.trim().is_empty());
            }
            Ok(Event::Eof) => return None,
            Ok(_) => {}
            Err(err) => {
                tracing::debug!("AndroidManifest.xml is not well-formed ({err}), searching text");
                return PACKAGE_ATTRIBUTE_PATTERN
                    .captures(content)
                    .map(|caps| caps[1].to_string());
            }
        }
    }
}

/// Read the manifest package for the module containing a build file.
/// A missing manifest yields `None`.
///
/// # Errors
/// Returns `PatchError::Io` if the manifest exists but cannot be read.
pub async fn find_manifest_package(module_dir: &Path) -> Result<Option<String>> {
    let path = manifest_path(module_dir);
    if !path.is_file() {
        return Ok(None);
    }
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|err| PatchError::io(&path, err))?;
    Ok(manifest_package(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[rstest]
    #[case(
        r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"
  package="io.flutter.plugins.pathprovider">
</manifest>"#,
        Some("io.flutter.plugins.pathprovider")
    )]
    #[case(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!-- plugin manifest -->
<manifest package="dev.fluttercommunity.plus.share"/>"#,
        Some("dev.fluttercommunity.plus.share")
    )]
    #[case(
        r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"></manifest>"#,
        None
    )]
    #[case(r#"<application package="not.the.root"/>"#, None)]
    #[case(r#"<manifest package="">"#, None)]
    #[case("", None)]
    fn test_manifest_package(#[case] content: &str, #[case] expected: Option<&str>) {
        assert_eq!(manifest_package(content).as_deref(), expected);
    }

    #[test]
    fn test_manifest_package_malformed_falls_back_to_text() {
        let content = r#"<manifest package="com.example.broken" <<<>"#;
        assert_eq!(
            manifest_package(content).as_deref(),
            Some("com.example.broken")
        );
    }

    #[tokio::test]
    async fn test_find_manifest_package() {
        let temp_dir = TempDir::new().unwrap();
        let module_dir = temp_dir.path().join("android");
        let manifest = manifest_path(&module_dir);
        fs::create_dir_all(manifest.parent().unwrap()).unwrap();
        fs::write(&manifest, r#"<manifest package="com.example.plugin"></manifest>"#).unwrap();

        let package = find_manifest_package(&module_dir).await.unwrap();
        assert_eq!(package.as_deref(), Some("com.example.plugin"));
        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_find_manifest_package_missing_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let package = find_manifest_package(temp_dir.path()).await.unwrap();
        assert_eq!(package, None);
        temp_dir.close().unwrap();
    }
}
