//! # gradlepatch-gradle
//!
//! Edits Groovy `build.gradle` files of cached Android plugins.
//!
//! The [`block`] module locates brace-scoped blocks with a small lexer that ignores braces in
//! strings and comments, and inserts lines into them. [`patches`] holds one [`Patch`] per fix and
//! [`patch_build_file`] runs a list of them over one file as a single transaction.
//!
//! [`Patch`]: gradlepatch_core::Patch

pub mod block;
pub mod build_file;
pub mod lexer;
pub mod manifest;
pub mod patches;
pub mod version_updater;

pub use block::{
    check_balance, insert_after_subblock, insert_into_block, locate_block, locate_subblock,
    substitute_in_span,
};
pub use build_file::{PatchOptions, apply_patches, patch_build_file};
pub use manifest::{find_manifest_package, manifest_package, manifest_path};
pub use patches::{
    AgpJavaVersionPatch, JavaCompatibilityPatch, KotlinOptionsPatch, KotlinVersionPatch,
    NamespacePatch,
};
pub use version_updater::{compare_versions, parse_version, update_kotlin_version};
