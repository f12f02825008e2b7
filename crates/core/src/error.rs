use std::path::PathBuf;

/// Result type for patch operations
pub type Result<T> = std::result::Result<T, PatchError>;

/// Why a patch operation could not act on a build file.
///
/// `NotFound` is expected and only skips the patch that needed the anchor. `Malformed` and
/// `Io` abort the whole file.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("{anchor} not found")]
    NotFound { anchor: String },

    #[error("malformed input: {reason}")]
    Malformed { reason: String },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PatchError {
    pub fn not_found(anchor: impl Into<String>) -> Self {
        Self::NotFound {
            anchor: anchor.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
