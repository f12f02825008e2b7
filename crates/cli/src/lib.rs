use anyhow::Result;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::{
    commands::{ConfigArgs, PatchArgs, handle_config, handle_patch},
    presets::Preset,
};
pub mod commands;
pub mod options;
pub mod presets;

#[derive(Parser, Debug)]
#[command(
    name = "gradlepatch",
    author,
    version,
    about = "Patch Gradle build files of cached Flutter plugins for current Android tooling",
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add `namespace` from AndroidManifest.xml to library modules
    Namespace(PatchArgs),
    /// Raise the Kotlin version and add `kotlinOptions { jvmTarget }`
    KotlinJvm(PatchArgs),
    /// Kotlin fixes plus pinned Java compatibility
    Kotlin(PatchArgs),
    /// Every patch
    All(PatchArgs),
    /// Report what `all` would change without writing
    Check(PatchArgs),
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    if !verbose {
        return;
    }
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

pub async fn main(args: &[String]) -> Result<()> {
    let cli = Cli::parse_from(args);
    init_tracing(cli.verbose);
    match cli.command {
        Some(Commands::Namespace(args)) => handle_patch(Preset::Namespace, &args).await?,
        Some(Commands::KotlinJvm(args)) => handle_patch(Preset::KotlinJvm, &args).await?,
        Some(Commands::Kotlin(args)) => handle_patch(Preset::Kotlin, &args).await?,
        Some(Commands::All(args)) => handle_patch(Preset::All, &args).await?,
        Some(Commands::Check(args)) => handle_patch(Preset::Check, &args).await?,
        Some(Commands::Config(args)) => handle_config(&args).await?,
        None => handle_patch(Preset::Check, &PatchArgs::default()).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("namespace")]
    #[case("kotlin-jvm")]
    #[case("kotlin")]
    #[case("all")]
    #[case("check")]
    fn test_cli_parsing_patch_subcommands(#[case] name: &str) {
        let cli = Cli::parse_from(["gradlepatch", name, "--dry-run"]);
        let args = match cli.command {
            Some(
                Commands::Namespace(args)
                | Commands::KotlinJvm(args)
                | Commands::Kotlin(args)
                | Commands::All(args)
                | Commands::Check(args),
            ) => args,
            other => panic!("Expected a patch subcommand, got {other:?}"),
        };
        assert!(args.dry_run);
    }

    #[test]
    fn test_cli_parsing_config() {
        let cli = Cli::parse_from(["gradlepatch", "config"]);
        assert!(matches!(cli.command, Some(Commands::Config(_))));
    }

    #[test]
    fn test_cli_parsing_default() {
        let cli = Cli::parse_from(["gradlepatch"]);
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parsing_verbose_is_global() {
        let cli = Cli::parse_from(["gradlepatch", "all", "--verbose"]);
        assert!(cli.verbose);
        let cli = Cli::parse_from(["gradlepatch", "-v", "kotlin"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Kotlin(_))));
    }

    #[test]
    fn test_cli_parsing_kotlin_jvm_options() {
        let cli = Cli::parse_from([
            "gradlepatch",
            "kotlin-jvm",
            "--strict",
            "--format",
            "json",
            "-j",
            "4",
        ]);
        let Some(Commands::KotlinJvm(args)) = cli.command else {
            panic!("Expected kotlin-jvm");
        };
        assert!(args.strict);
        assert_eq!(args.jobs, Some(4));
    }
}
