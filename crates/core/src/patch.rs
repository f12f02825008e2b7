use crate::{Config, PatchKind, Result, SourceText};

/// Inputs a patch may need besides the build file itself.
#[derive(Debug, Clone, Copy)]
pub struct PatchContext<'a> {
    pub config: &'a Config,
    /// `package` attribute of the sibling `AndroidManifest.xml`, if any
    pub manifest_package: Option<&'a str>,
}

impl<'a> PatchContext<'a> {
    #[must_use]
    pub const fn new(config: &'a Config, manifest_package: Option<&'a str>) -> Self {
        Self {
            config,
            manifest_package,
        }
    }
}

/// Successful outcome of a single patch on a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchResult {
    /// The text was changed; the string describes the edit
    Applied(String),
    /// The target state already holds, nothing was changed
    AlreadyApplied,
}

/// One idempotent edit of a Gradle build file.
///
/// Implementations must leave `text` untouched when they return an error or
/// `PatchResult::AlreadyApplied`, and applying a patch to its own output must yield
/// `AlreadyApplied`.
pub trait Patch: std::fmt::Debug + Send + Sync {
    fn kind(&self) -> PatchKind;

    /// Whether the file is a candidate for this patch at all (e.g. it applies the Kotlin plugin).
    fn applies_to(&self, _text: &SourceText) -> bool {
        true
    }

    /// Whether `PatchContext::manifest_package` must be loaded before `apply`.
    fn needs_manifest(&self) -> bool {
        false
    }

    /// # Errors
    /// Returns `PatchError::NotFound` when the anchor the patch depends on is absent and
    /// `PatchError::Malformed` when the text cannot be scanned reliably.
    fn apply(&self, text: &mut SourceText, ctx: &PatchContext<'_>) -> Result<PatchResult>;
}
