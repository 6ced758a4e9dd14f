//! Litmus - Main Entry Point
//!
//! Loads test cases and the seed environment from the config path, applies
//! command-line overrides and runs every selected case in order against
//! the network.

mod cli;
mod output;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use litmus_application::{RunOptions, TestRunner};
use litmus_infrastructure::{ClientConfig, ReqwestHttpClient, load_environment, load_test_cases};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Args;
use crate::output::ConsoleObserver;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting Litmus v{}", env!("CARGO_PKG_VERSION"));

    let mut env = load_environment(&args.config)
        .await
        .context("loading env file")?;
    env.merge(args.overrides);

    let cases = load_test_cases(&args.config)
        .await
        .with_context(|| format!("loading tests from {}", args.config.display()))?;

    let client =
        ReqwestHttpClient::with_config(&ClientConfig::default().with_timeout_ms(args.timeout_ms))
            .context("creating HTTP client")?;
    let runner =
        TestRunner::new(client).with_options(RunOptions::default().with_name_filter(args.name));

    let mut observer = ConsoleObserver::stdout();
    let report = runner.run_with_observer(cases, &mut env, &mut observer).await;
    observer.summary(&report);

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
