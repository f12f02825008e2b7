use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tokio::{fs, io::AsyncWriteExt};

/// Hidden sibling named after the target and the current process, so concurrent runs never
/// share a temp file.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut file_name = OsString::from(".");
    file_name.push(path.file_name().unwrap_or_default());
    file_name.push(format!(".{}.gradlepatch.tmp", std::process::id()));
    path.with_file_name(file_name)
}

async fn write_synced(temp_path: &Path, content: &str, target: &Path) -> Result<()> {
    let mut file = fs::File::create(temp_path)
        .await
        .context(format!("Failed to create {}", temp_path.display()))?;
    file.write_all(content.as_bytes())
        .await
        .context(format!("Failed to write {}", temp_path.display()))?;
    file.sync_all()
        .await
        .context(format!("Failed to flush {}", temp_path.display()))?;

    if let Ok(metadata) = fs::metadata(target).await {
        fs::set_permissions(temp_path, metadata.permissions())
            .await
            .context(format!("Failed to copy permissions to {}", temp_path.display()))?;
    }
    Ok(())
}

/// Replace `path` with `content` by writing a sibling temp file, flushing it to disk and
/// renaming it over the target, so the target is always either the old or the new content.
/// Permissions of an existing target are carried over.
///
/// # Errors
/// Returns error if the temp file cannot be written, flushed or renamed.
pub async fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path);
    if let Err(err) = write_synced(&temp_path, content, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(err);
    }

    if let Err(err) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(err).context(format!("Failed to replace {}", path.display()));
    }
    Ok(())
}
