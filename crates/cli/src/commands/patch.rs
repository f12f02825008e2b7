use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use futures::{StreamExt, stream};
use gradlepatch_core::{FileOutcome, FileReport, PatchStatus, RunSummary};
use gradlepatch_gradle::{PatchOptions, patch_build_file};
use gradlepatch_utils::{display_path, find_build_files, get_gradlepatch_config, resolve_cache_dir};
use serde::Serialize;

use crate::{
    options::FormatOptions,
    presets::{Preset, get_patches},
};

/// Flags shared by every patching subcommand.
#[derive(Args, Debug, Default)]
pub struct PatchArgs {
    /// Report what would change without writing any file
    #[arg(short, long)]
    pub dry_run: bool,

    /// Leave a file untouched when any patch cannot find its anchor
    #[arg(long)]
    pub strict: bool,

    #[arg(long, default_value = "stdout")]
    pub format: FormatOptions,

    /// Package cache to scan instead of the pub cache
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Build files processed concurrently, overrides `jobs` from the config
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Exit with an error when any build file failed to patch
    #[arg(long)]
    pub fail_on_error: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunOutput<'a> {
    preset: &'a [gradlepatch_core::PatchKind],
    cache_dir: &'a Path,
    dry_run: bool,
    files: &'a [FileReport],
    summary: RunSummary,
}

/// Apply a preset to every matching build file in the package cache
///
/// # Errors
/// Returns error if the config is invalid, the cache directory is missing, or (with
/// `--fail-on-error`) any build file failed.
pub async fn handle_patch(preset: Preset, args: &PatchArgs) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let config = get_gradlepatch_config(&current_dir).await?;
    let cache_dir = resolve_cache_dir(args.cache_dir.as_deref(), &config)?;
    let build_files = find_build_files(&cache_dir, &config)?;

    let options = PatchOptions {
        dry_run: args.dry_run || preset.forces_dry_run(),
        strict: args.strict,
    };
    let jobs = args.jobs.unwrap_or(config.jobs).max(1);
    tracing::debug!(
        "Running {preset:?} on {} build files with {jobs} jobs",
        build_files.len()
    );

    let patches = get_patches(preset);
    let mut reports = stream::iter(&build_files)
        .map(|path| patch_build_file(path, &patches, &config, options))
        .buffer_unordered(jobs)
        .collect::<Vec<_>>()
        .await;
    reports.sort_by(|a, b| a.path.cmp(&b.path));
    let summary = RunSummary::from_reports(&reports);

    match args.format {
        FormatOptions::Stdout => {
            println!(
                "Found {} build files in {}",
                build_files.len(),
                cache_dir.display()
            );
            for report in &reports {
                for line in render_file_report(&cache_dir, report) {
                    println!("{line}");
                }
            }
            if options.dry_run && summary.patched > 0 {
                println!(
                    "Dry run, {} of {} files would be patched, nothing was written",
                    summary.patched,
                    summary.total()
                );
            }
            println!("{summary}");
        }
        FormatOptions::Json => {
            let output = RunOutput {
                preset: preset.kinds(),
                cache_dir: &cache_dir,
                dry_run: options.dry_run,
                files: &reports,
                summary,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if args.fail_on_error && summary.failed > 0 {
        bail!("{} build file(s) failed to patch", summary.failed);
    }
    Ok(())
}

/// Human-readable lines for one file; unchanged files print nothing.
fn render_file_report(cache_dir: &Path, report: &FileReport) -> Vec<String> {
    if report.outcome == FileOutcome::Unchanged {
        return Vec::new();
    }
    let mut lines = vec![format!(
        "{}: {}",
        display_path(cache_dir, &report.path),
        report.outcome
    )];
    for (kind, description) in report.applied() {
        lines.push(format!("  {kind} {description}"));
    }
    for patch in &report.patches {
        if let PatchStatus::AnchorMissing { anchor } = &patch.status {
            lines.push(format!(
                "  {} {}",
                patch.kind,
                format!("{anchor} not found").yellow()
            ));
        }
    }
    lines
}
