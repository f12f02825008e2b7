use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use gradlepatch_core::Config;

/// Pick the package cache to scan: explicit path, then config, then `$PUB_CACHE`, then the
/// default pub cache in the home directory. The returned directory must exist.
///
/// # Errors
/// Returns error if no candidate can be determined or the directory does not exist.
pub fn resolve_cache_dir(explicit: Option<&Path>, config: &Config) -> Result<PathBuf> {
    resolve_cache_dir_with(
        explicit,
        config,
        std::env::var_os("PUB_CACHE"),
        dirs::home_dir(),
    )
}

fn resolve_cache_dir_with(
    explicit: Option<&Path>,
    config: &Config,
    pub_cache: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    let cache_dir = if let Some(path) = explicit {
        path.to_path_buf()
    } else if let Some(path) = &config.cache_dir {
        path.clone()
    } else if let Some(pub_cache) = pub_cache.filter(|value| !value.is_empty()) {
        PathBuf::from(pub_cache).join("hosted").join("pub.dev")
    } else if let Some(home) = home {
        home.join(".pub-cache").join("hosted").join("pub.dev")
    } else {
        bail!("Cannot determine the package cache directory, pass --cache-dir");
    };

    if !cache_dir.is_dir() {
        bail!("Package cache not found at {}", cache_dir.display());
    }
    Ok(cache_dir)
}
