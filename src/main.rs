use anyhow::Context;
use tracing::info;

mod checker;
mod config;
mod error;
mod report;

pub use checker::Checker;
pub use config::CheckerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing. Diagnostics go to stderr; stdout carries the trace.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "endpoint_check=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CheckerConfig::from_env()?;
    let checker = Checker::new(&config)?;

    info!(
        endpoints = checker.endpoints().len(),
        timeout_ms = ?config.timeout_ms,
        "endpoint-check starting"
    );

    let stdout = std::io::stdout();
    let outcomes = checker
        .run(&mut stdout.lock())
        .await
        .context("writing report to stdout")?;

    // Request failures are reported, never fatal.
    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    info!(checked = outcomes.len(), failed, "endpoint-check finished");

    Ok(())
}
