mod app;
mod charts;
mod cli;
mod config;
mod domain;
mod fetcher;
mod infrastructure;
mod pipeline;
mod presentation;
mod text;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use infrastructure::{directories, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();
    let mut config = config::load_config()?;
    cli.apply(&mut config)?;

    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let mut app = app::WordChartApp::initialize(&config, &paths, !cli.no_text)?;
    match cli.url.as_deref() {
        Some(url) => Ok(app.handle(url, &cli.chart).await?.exit_code()),
        None => {
            app.run_interactive(&mut cli::Prompt::stdin()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
