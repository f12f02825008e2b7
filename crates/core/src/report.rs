use std::{fmt::Display, path::PathBuf};

use colored::Colorize;
use serde::Serialize;

use crate::PatchKind;

/// Result of one patch on one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PatchStatus {
    Applied { description: String },
    AlreadyApplied,
    /// The file is not a candidate for this patch
    NotApplicable,
    AnchorMissing { anchor: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub kind: PatchKind,
    #[serde(flatten)]
    pub status: PatchStatus,
}

impl PatchReport {
    #[must_use]
    pub const fn new(kind: PatchKind, status: PatchStatus) -> Self {
        Self { kind, status }
    }
}

/// What happened to a build file as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum FileOutcome {
    /// At least one patch changed the file (and it was written unless running dry)
    Patched,
    /// Every patch found its target state already in place or did not apply
    Unchanged,
    /// Edits were possible but the file was left alone
    Skipped { reason: String },
    /// The file could not be read, scanned or written
    Failed { reason: String },
}

impl Display for FileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patched => write!(f, "{}", "patched".green().bold()),
            Self::Unchanged => write!(f, "{}", "unchanged".dimmed()),
            Self::Skipped { reason } => write!(f, "{} ({reason})", "skipped".yellow().bold()),
            Self::Failed { reason } => write!(f, "{} ({reason})", "failed".red().bold()),
        }
    }
}

/// Per-file record handed to the reporting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
    pub patches: Vec<PatchReport>,
}

impl FileReport {
    #[must_use]
    pub const fn new(path: PathBuf, outcome: FileOutcome, patches: Vec<PatchReport>) -> Self {
        Self {
            path,
            outcome,
            patches,
        }
    }

    #[must_use]
    pub fn failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::new(
            path,
            FileOutcome::Failed {
                reason: reason.into(),
            },
            Vec::new(),
        )
    }

    /// Descriptions of the edits that were made, in patch order
    #[must_use]
    pub fn applied(&self) -> Vec<(PatchKind, &str)> {
        self.patches
            .iter()
            .filter_map(|report| match &report.status {
                PatchStatus::Applied { description } => Some((report.kind, description.as_str())),
                _ => None,
            })
            .collect()
    }
}

/// End-of-run counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub patched: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    #[must_use]
    pub fn from_reports(reports: &[FileReport]) -> Self {
        reports
            .iter()
            .fold(Self::default(), |mut summary, report| {
                match report.outcome {
                    FileOutcome::Patched => summary.patched += 1,
                    FileOutcome::Unchanged => summary.unchanged += 1,
                    FileOutcome::Skipped { .. } => summary.skipped += 1,
                    FileOutcome::Failed { .. } => summary.failed += 1,
                }
                summary
            })
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.patched + self.unchanged + self.skipped + self.failed
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Summary: {} patched, {} unchanged, {} skipped, {} failed",
            self.patched, self.unchanged, self.skipped, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn report(outcome: FileOutcome) -> FileReport {
        FileReport::new(PathBuf::from("a/android/build.gradle"), outcome, Vec::new())
    }

    #[test]
    fn test_run_summary_counts_each_outcome() {
        let reports = vec![
            report(FileOutcome::Patched),
            report(FileOutcome::Patched),
            report(FileOutcome::Unchanged),
            report(FileOutcome::Skipped {
                reason: "strict".to_string(),
            }),
            FileReport::failed(PathBuf::from("b"), "unreadable"),
        ];
        let summary = RunSummary::from_reports(&reports);
        assert_eq!(
            summary,
            RunSummary {
                patched: 2,
                unchanged: 1,
                skipped: 1,
                failed: 1,
            }
        );
        assert_eq!(summary.total(), 5);
        assert_eq!(
            summary.to_string(),
            "Summary: 2 patched, 1 unchanged, 1 skipped, 1 failed"
        );
    }

    #[test]
    fn test_file_report_serializes_flat() {
        let file = FileReport::new(
            PathBuf::from("x/android/build.gradle"),
            FileOutcome::Patched,
            vec![
                PatchReport::new(
                    PatchKind::Namespace,
                    PatchStatus::Applied {
                        description: "added namespace 'x.y'".to_string(),
                    },
                ),
                PatchReport::new(
                    PatchKind::KotlinOptions,
                    PatchStatus::AnchorMissing {
                        anchor: "block `compileOptions`".to_string(),
                    },
                ),
            ],
        );
        let value: Value = serde_json::to_value(&file).unwrap();
        assert_eq!(
            value,
            json!({
                "path": "x/android/build.gradle",
                "outcome": "patched",
                "patches": [
                    {"kind": "namespace", "status": "applied", "description": "added namespace 'x.y'"},
                    {"kind": "kotlin-options", "status": "anchorMissing", "anchor": "block `compileOptions`"}
                ]
            })
        );
        assert_eq!(
            file.applied(),
            vec![(PatchKind::Namespace, "added namespace 'x.y'")]
        );
    }

    #[test]
    fn test_file_outcome_display() {
        assert!(FileOutcome::Patched.to_string().contains("patched"));
        let failed = FileOutcome::Failed {
            reason: "boom".to_string(),
        };
        assert!(failed.to_string().contains("failed"));
        assert!(failed.to_string().contains("boom"));
    }
}
