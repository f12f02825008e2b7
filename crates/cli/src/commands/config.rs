use anyhow::Result;
use clap::Args;
use gradlepatch_utils::get_gradlepatch_config;

#[derive(Args, Debug)]
#[command(about = "Print the resolved gradlepatch configuration")]
pub struct ConfigArgs {}

/// Display gradlepatch configuration, defaults filled in
///
/// # Errors
/// Returns error if reading the configuration fails.
pub async fn handle_config(_args: &ConfigArgs) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let config = get_gradlepatch_config(&current_dir).await?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    #[test]
    fn test_config_args_parsing() {
        let cli = TestCli::parse_from(["test"]);
        assert!(format!("{:?}", cli.config).contains("ConfigArgs"));
    }
}
