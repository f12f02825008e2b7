use gradlepatch_core::{Patch, PatchKind};
use gradlepatch_gradle::{
    AgpJavaVersionPatch, JavaCompatibilityPatch, KotlinOptionsPatch, KotlinVersionPatch,
    NamespacePatch,
};

/// Named patch lists exposed as subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Namespace,
    KotlinJvm,
    Kotlin,
    All,
    /// `All` without writing anything
    Check,
}

impl Preset {
    /// Patch kinds in the order they are applied
    #[must_use]
    pub const fn kinds(self) -> &'static [PatchKind] {
        match self {
            Self::Namespace => &[PatchKind::Namespace],
            Self::KotlinJvm => &[PatchKind::KotlinVersion, PatchKind::KotlinOptions],
            Self::Kotlin => &[
                PatchKind::KotlinVersion,
                PatchKind::JavaCompatibility,
                PatchKind::AgpJavaVersion,
                PatchKind::KotlinOptions,
            ],
            Self::All | Self::Check => &[
                PatchKind::Namespace,
                PatchKind::KotlinVersion,
                PatchKind::JavaCompatibility,
                PatchKind::AgpJavaVersion,
                PatchKind::KotlinOptions,
            ],
        }
    }

    #[must_use]
    pub const fn forces_dry_run(self) -> bool {
        matches!(self, Self::Check)
    }
}

fn get_patch(kind: PatchKind) -> Box<dyn Patch> {
    match kind {
        PatchKind::Namespace => Box::new(NamespacePatch),
        PatchKind::KotlinVersion => Box::new(KotlinVersionPatch),
        PatchKind::JavaCompatibility => Box::new(JavaCompatibilityPatch),
        PatchKind::AgpJavaVersion => Box::new(AgpJavaVersionPatch),
        PatchKind::KotlinOptions => Box::new(KotlinOptionsPatch),
    }
}

/// Patches for `preset`, in the order they run against each file.
pub fn get_patches(preset: Preset) -> Vec<Box<dyn Patch>> {
    preset.kinds().iter().copied().map(get_patch).collect()
}
