use anyhow::Result;
use clap::Parser;
use resume_reviewer::app_log;
use resume_reviewer::cli::{handle_command, Cli};
use resume_reviewer::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.load_config()?;
    init_tracing(&config.environment.log_path)?;

    app_log!(
        info,
        "Environment: {}, log file: {}",
        config.environment.name,
        config.environment.log_path.display()
    );
    config.log_warnings();

    handle_command(cli, config).await
}
