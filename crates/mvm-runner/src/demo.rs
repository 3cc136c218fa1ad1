//! # Demo Scenario
//!
//! Two contracts: `A` adds its argument to a stored counter and returns the
//! new total; `B` calls `A` with 2 and stores ten times the result.

use anyhow::{Context, Result};
use mvm_engine::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::config::RunnerConfig;

/// Counter contract.
pub const CONTRACT_A: &str = "\
# counter += arg; return counter
LOAD counter
ADD
STORE counter
LOAD counter
RETURN
";

/// Caller contract.
pub const CONTRACT_B: &str = "\
# myvalue = A(2) * 10; return myvalue
PUSH 2
CALL A 200 1
PUSH 10
MUL
STORE myvalue
LOAD myvalue
RETURN
";

/// Demo transactions as `(target, gas_limit, args)`.
pub const TRANSACTIONS: [(&str, u64, &[Word]); 4] = [
    ("A", 500, &[7]),
    ("B", 800, &[]),
    ("A", 300, &[3]),
    ("B", 800, &[]),
];

/// Everything the demo prints.
#[derive(Debug, Serialize)]
pub struct DemoReport {
    /// One result per transaction, in submission order.
    pub transactions: Vec<TransactionResult>,
    /// Committed storage after the last transaction.
    pub storage: Storage,
    /// Service statistics.
    pub stats: ServiceStats,
}

/// Deploys the demo contracts.
///
/// # Errors
///
/// Fails if either contract is rejected.
pub async fn deploy_contracts(api: &impl ExecutionApi) -> Result<()> {
    api.deploy(Address::from("A"), CONTRACT_A)
        .await
        .context("deploying contract A")?;
    api.deploy(Address::from("B"), CONTRACT_B)
        .await
        .context("deploying contract B")?;
    Ok(())
}

/// Deploys the contracts, runs the transactions and collects the report.
///
/// # Errors
///
/// Fails if deployment fails. Reverted transactions are reported, not errors.
pub async fn run_demo(service: &ExecutionService, config: &RunnerConfig) -> Result<DemoReport> {
    deploy_contracts(service).await?;

    let mut transactions = Vec::with_capacity(TRANSACTIONS.len());
    for (to, gas_limit, args) in TRANSACTIONS {
        let request = TransactionRequest::new(to, gas_limit.saturating_mul(config.gas_limit_scale))
            .with_origin("demo")
            .with_args(args.to_vec());
        let result = service.execute_transaction(request).await;
        info!(
            to,
            success = result.success,
            return_value = result.return_value,
            gas_used = result.gas_used,
            "Demo transaction finished"
        );
        transactions.push(result);
    }

    Ok(DemoReport {
        transactions,
        storage: service.storage().await,
        stats: service.stats().await,
    })
}
