#![warn(clippy::all, clippy::pedantic)]

use anyhow::Result;
use clap::Parser;
use gcp_permission_mappings::Config;
use gcp_permission_mappings::cli::{Cli, dispatch};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn log_level(cli: &Cli) -> Level {
    if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays pipeable.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&cli))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load(cli.config.as_deref())?;
    let result = dispatch(&cli, &config).await?;

    if result.success {
        println!("{}", result.text);
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("{}", result.text);
        Ok(ExitCode::FAILURE)
    }
}
