use clap::ValueEnum;

/// How run results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FormatOptions {
    /// JSON document for CI pipelines
    #[value(name = "json")]
    Json,
    /// Colored per-file listing
    #[default]
    #[value(name = "stdout")]
    Stdout,
}
