use std::path::Path;

use anyhow::{Context, Result};
use gradlepatch_core::{
    Config, FileOutcome, FileReport, Patch, PatchContext, PatchError, PatchReport, PatchResult,
    PatchStatus, SourceText,
};
use gradlepatch_utils::write_atomic;

use crate::manifest::find_manifest_package;

/// How a run treats the files it patches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchOptions {
    /// Compute and report edits without writing
    pub dry_run: bool,
    /// Leave a file untouched when any patch is missing its anchor
    pub strict: bool,
}

/// Run `patches` in order over one staged copy of `original`.
///
/// A patch that fails with `NotFound` is recorded as `AnchorMissing` and the staged text stays as
/// the previous patch left it.
///
/// # Errors
/// Returns the first `Malformed` or `Io` error; nothing staged so far should be written then.
pub fn apply_patches(
    original: &SourceText,
    patches: &[Box<dyn Patch>],
    ctx: &PatchContext<'_>,
) -> std::result::Result<(SourceText, Vec<PatchReport>), PatchError> {
    let mut staged = original.clone();
    let mut reports = Vec::with_capacity(patches.len());

    for patch in patches {
        if !patch.applies_to(&staged) {
            reports.push(PatchReport::new(patch.kind(), PatchStatus::NotApplicable));
            continue;
        }
        let mut candidate = staged.clone();
        let status = match patch.apply(&mut candidate, ctx) {
            Ok(PatchResult::Applied(description)) => {
                staged = candidate;
                PatchStatus::Applied { description }
            }
            Ok(PatchResult::AlreadyApplied) => PatchStatus::AlreadyApplied,
            Err(PatchError::NotFound { anchor }) => PatchStatus::AnchorMissing { anchor },
            Err(err) => return Err(err),
        };
        tracing::debug!("{}: {status:?}", patch.kind().key());
        reports.push(PatchReport::new(patch.kind(), status));
    }
    Ok((staged, reports))
}

/// Patch one build file as a transaction: read, stage every patch, then write once.
///
/// Never fails; problems end up in the returned report so one bad file cannot stop a run.
pub async fn patch_build_file(
    path: &Path,
    patches: &[Box<dyn Patch>],
    config: &Config,
    options: PatchOptions,
) -> FileReport {
    match try_patch_build_file(path, patches, config, options).await {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!("Failed to patch {}: {err:#}", path.display());
            FileReport::failed(path.to_path_buf(), format!("{err:#}"))
        }
    }
}

async fn try_patch_build_file(
    path: &Path,
    patches: &[Box<dyn Patch>],
    config: &Config,
    options: PatchOptions,
) -> Result<FileReport> {
    tracing::debug!("Patching {}", path.display());
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| PatchError::io(path, err))?;
    let original = SourceText::parse(&content);
    if original.is_empty() {
        tracing::debug!("Skipping empty {}", path.display());
        return Ok(FileReport::new(path.to_path_buf(), FileOutcome::Unchanged, Vec::new()));
    }

    let manifest_package = if patches
        .iter()
        .any(|patch| patch.needs_manifest() && patch.applies_to(&original))
    {
        let module_dir = path
            .parent()
            .context(format!("Parent not found - {}", path.display()))?;
        find_manifest_package(module_dir).await?
    } else {
        None
    };

    let ctx = PatchContext::new(config, manifest_package.as_deref());
    let (staged, reports) = apply_patches(&original, patches, &ctx)?;

    let outcome = if staged == original {
        FileOutcome::Unchanged
    } else if let Some(anchors) = missing_anchors(&reports).filter(|_| options.strict) {
        FileOutcome::Skipped {
            reason: format!("strict mode, missing {anchors}"),
        }
    } else {
        if !options.dry_run {
            write_atomic(path, &staged.render()).await?;
        }
        FileOutcome::Patched
    };
    Ok(FileReport::new(path.to_path_buf(), outcome, reports))
}

fn missing_anchors(reports: &[PatchReport]) -> Option<String> {
    let anchors = reports
        .iter()
        .filter_map(|report| match &report.status {
            PatchStatus::AnchorMissing { anchor } => Some(anchor.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>();
    (!anchors.is_empty()).then(|| anchors.join(", "))
}
