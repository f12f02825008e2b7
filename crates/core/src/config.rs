use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Loaded from `.gradlepatch/config.json`, controls where build files are searched and which
/// toolchain versions the patches pin.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Package cache to scan. Falls back to `$PUB_CACHE/hosted/pub.dev`, then
    /// `~/.pub-cache/hosted/pub.dev`
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Glob (relative to the cache dir) a build file path must match
    #[serde(default = "default_build_file_pattern")]
    pub build_file_pattern: String,

    /// Glob patterns for build files to leave alone (e.g. "camera_android-*/**")
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Lowest accepted `ext.kotlin_version`
    #[serde(default = "default_min_kotlin_version")]
    pub min_kotlin_version: String,

    /// Value written to `kotlinOptions.jvmTarget`
    #[serde(default = "default_jvm_target")]
    pub jvm_target: String,

    /// Java version used for `JavaVersion.VERSION_<n>` compatibility pins
    #[serde(default = "default_java_version")]
    pub java_version: String,

    /// Number of build files processed concurrently
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

fn default_build_file_pattern() -> String {
    "**/android/build.gradle".to_string()
}

fn default_min_kotlin_version() -> String {
    "1.7.22".to_string()
}

fn default_jvm_target() -> String {
    "11".to_string()
}

fn default_java_version() -> String {
    "11".to_string()
}

const fn default_jobs() -> usize {
    8
}

impl Config {
    /// `JavaVersion.VERSION_11` style constant for `java_version` ("1.8" becomes `VERSION_1_8`)
    #[must_use]
    pub fn java_version_constant(&self) -> String {
        format!("JavaVersion.VERSION_{}", self.java_version.replace('.', "_"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_dir: None,
            build_file_pattern: default_build_file_pattern(),
            ignore: Vec::new(),
            min_kotlin_version: default_min_kotlin_version(),
            jvm_target: default_jvm_target(),
            java_version: default_java_version(),
            jobs: default_jobs(),
        }
    }
}
