use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use gradlepatch_core::Config;
use ignore::WalkBuilder;

const BUILD_FILE_NAME: &str = "build.gradle";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Walk the package cache and collect Groovy build files whose cache-relative path matches
/// `config.build_file_pattern` and none of `config.ignore`. Sorted by path.
///
/// # Errors
/// Returns error if a configured glob pattern is invalid.
pub fn find_build_files(cache_dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(&config.build_file_pattern).context(format!(
        "Invalid build file pattern - {}",
        config.build_file_pattern
    ))?;
    let ignore = config
        .ignore
        .iter()
        .map(|glob| Pattern::new(glob).context(format!("Invalid ignore pattern - {glob}")))
        .collect::<Result<Vec<_>>>()?;

    let mut build_files = Vec::new();
    for entry in WalkBuilder::new(cache_dir)
        .standard_filters(false)
        .follow_links(true)
        .build()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("Skipping unreadable cache entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|file_type| file_type.is_file()) {
            continue;
        }
        let path = entry.path();
        if path.file_name() != Some(OsStr::new(BUILD_FILE_NAME)) {
            continue;
        }
        let relative_path = path.strip_prefix(cache_dir).unwrap_or(path);
        if !pattern.matches_path_with(relative_path, MATCH_OPTIONS) {
            continue;
        }
        if ignore
            .iter()
            .any(|glob| glob.matches_path_with(relative_path, MATCH_OPTIONS))
        {
            tracing::debug!("Ignoring {}", relative_path.display());
            continue;
        }
        build_files.push(path.to_path_buf());
    }
    build_files.sort();
    Ok(build_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "android {\n}\n").unwrap();
    }

    fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
        files
            .iter()
            .map(|file| {
                file.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_find_build_files_default_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "path_provider_android-2.0.0/android/build.gradle");
        touch(root, "camera-0.10.0/android/build.gradle");
        touch(root, "camera-0.10.0/example/android/app/build.gradle");
        touch(root, "url_launcher-6.0.0/android/build.gradle.kts");
        touch(root, "plain-1.0.0/build.gradle");

        let files = find_build_files(root, &Config::default()).unwrap();
        assert_eq!(
            relative(root, files),
            vec![
                "camera-0.10.0/android/build.gradle",
                "path_provider_android-2.0.0/android/build.gradle",
            ]
        );
        temp_dir.close().unwrap();
    }

    #[test]
    fn test_find_build_files_respects_ignore() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "camera-0.10.0/android/build.gradle");
        touch(root, "camera_android-0.10.8/android/build.gradle");

        let config = Config {
            ignore: vec!["camera_android-*/**".to_string()],
            ..Config::default()
        };
        let files = find_build_files(root, &config).unwrap();
        assert_eq!(
            relative(root, files),
            vec!["camera-0.10.0/android/build.gradle"]
        );
        temp_dir.close().unwrap();
    }

    #[test]
    fn test_find_build_files_includes_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, ".hidden-1.0.0/android/build.gradle");

        let files = find_build_files(root, &Config::default()).unwrap();
        assert_eq!(files.len(), 1);
        temp_dir.close().unwrap();
    }

    #[test]
    fn test_find_build_files_invalid_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            build_file_pattern: "[".to_string(),
            ..Config::default()
        };
        assert!(find_build_files(temp_dir.path(), &config).is_err());
        temp_dir.close().unwrap();
    }
}
