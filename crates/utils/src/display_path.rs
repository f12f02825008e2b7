use std::path::Path;

/// Path of `path` relative to `base` for display, or the full path when it lies outside.
#[must_use]
pub fn display_path(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
