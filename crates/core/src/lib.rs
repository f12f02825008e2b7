//! # gradlepatch-core
//!
//! Core types and traits for gradlepatch.
//!
//! Defines the in-memory model of a build file (`SourceText`, `Span`), the `Patch` trait every
//! compatibility fix implements, the error taxonomy, per-file reports and the configuration
//! loaded from `.gradlepatch/config.json`.

pub mod config;
pub mod error;
pub mod patch;
pub mod patch_kind;
pub mod report;
pub mod source_text;

pub use config::Config;
pub use error::{PatchError, Result};
pub use patch::{Patch, PatchContext, PatchResult};
pub use patch_kind::PatchKind;
pub use report::{FileOutcome, FileReport, PatchReport, PatchStatus, RunSummary};
pub use source_text::{LineEnding, SourceText, Span};
