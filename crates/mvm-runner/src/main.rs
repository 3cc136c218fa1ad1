//! # Mini-EVM Runner
//!
//! Deploys the demo contracts, runs the demo transactions and prints a JSON
//! report (results, committed storage, statistics) on stdout. Logs go to
//! stderr.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry
//! 2. Load runner configuration from the environment
//! 3. Deploy contracts and execute transactions
//! 4. Print the report

use anyhow::{Context, Result};
use mvm_engine::prelude::*;
use mvm_runner::{run_demo, RunnerConfig};
use mvm_telemetry::{init_telemetry, TelemetryConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry(&TelemetryConfig::from_env()).context("initializing telemetry")?;

    let config = RunnerConfig::from_env()?;
    info!(
        version = mvm_engine::VERSION,
        gas_limit_scale = config.gas_limit_scale,
        "Starting Mini-EVM demo"
    );

    let service = ExecutionService::default();
    let report = run_demo(&service, &config).await?;

    let json = if config.pretty_json {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    info!(
        executed = report.stats.transactions_executed,
        failed = report.stats.failed_executions,
        "Demo finished"
    );
    Ok(())
}
