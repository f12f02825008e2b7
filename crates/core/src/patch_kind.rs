use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Compatibility fixes gradlepatch knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchKind {
    /// `namespace '<package>'` inside `android { }`, required by AGP 8
    Namespace,
    /// `ext.kotlin_version` raised to the configured minimum
    KotlinVersion,
    /// `project.sourceCompatibility` / `project.targetCompatibility` pinned to a Java version
    JavaCompatibility,
    /// dynamic `agpJavaVersion` compile options replaced by a fixed block
    AgpJavaVersion,
    /// `kotlinOptions { jvmTarget }` added after `compileOptions`
    KotlinOptions,
}

impl PatchKind {
    /// Stable identifier used in JSON output
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Namespace => "namespace",
            Self::KotlinVersion => "kotlin-version",
            Self::JavaCompatibility => "java-compatibility",
            Self::AgpJavaVersion => "agp-java-version",
            Self::KotlinOptions => "kotlin-options",
        }
    }
}

impl Display for PatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Namespace => self.key().cyan().bold(),
                Self::KotlinVersion => self.key().magenta().bold(),
                Self::JavaCompatibility => self.key().yellow().bold(),
                Self::AgpJavaVersion => self.key().blue().bold(),
                Self::KotlinOptions => self.key().green().bold(),
            }
        )
    }
}
