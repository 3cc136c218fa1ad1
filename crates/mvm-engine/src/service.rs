//! # Execution Service
//!
//! Async façade over a [`World`]. Transactions submitted from concurrent
//! tasks are serialized: the world lock is held for the whole transaction,
//! so each one observes the committed storage left by the previous one.
//!
//! The service also keeps execution statistics.

use crate::adapters::state_adapter::Storage;
use crate::domain::entities::{TransactionRequest, TransactionResult, VmConfig};
use crate::domain::value_objects::{Address, StorageKey, Word};
use crate::errors::VmError;
use crate::ports::inbound::ExecutionApi;
use crate::world::World;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

/// Execution Service configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// VM configuration.
    pub vm_config: VmConfig,
}

/// Statistics for the Execution Service.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStats {
    /// Total transactions executed.
    pub transactions_executed: u64,
    /// Committed transactions.
    pub successful_executions: u64,
    /// Reverted transactions (out of gas, stack underflow, etc.).
    pub failed_executions: u64,
    /// Simulations run by `estimate_gas` and `call`.
    pub simulations: u64,
    /// Total gas consumed by executed transactions, reverted ones included.
    /// Saturates at `u64::MAX`.
    pub total_gas_used: u64,
    /// Average execution time in microseconds.
    pub avg_execution_time_us: u64,
}

/// The main Execution Service.
///
/// This service:
/// 1. Deploys contracts from opcode text
/// 2. Executes transactions one at a time against the shared world
/// 3. Runs non-committing simulations for gas estimation and calls
/// 4. Maintains execution statistics
pub struct ExecutionService {
    /// Committed ledger.
    world: Arc<Mutex<World>>,
    /// Service statistics.
    stats: Arc<RwLock<ServiceStats>>,
}

impl ExecutionService {
    /// Create a new Execution Service over an empty world.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_world(World::with_config(config.vm_config))
    }

    /// Create a service over an existing world.
    #[must_use]
    pub fn with_world(world: World) -> Self {
        Self {
            world: Arc::new(Mutex::new(world)),
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Copy of the committed storage.
    pub async fn storage(&self) -> Storage {
        self.world.lock().await.storage().clone()
    }

    async fn simulate(&self, request: &TransactionRequest) -> TransactionResult {
        let result = self.world.lock().await.simulate(request);
        self.stats.write().await.simulations += 1;
        result
    }
}

impl Default for ExecutionService {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

#[async_trait]
impl ExecutionApi for ExecutionService {
    #[instrument(skip(self, address, source), fields(address = %address))]
    async fn deploy(&self, address: Address, source: &str) -> Result<(), VmError> {
        let result = self.world.lock().await.deploy_source(address, source);
        if let Err(err) = &result {
            warn!(error = %err, "Deployment rejected");
        }
        result
    }

    #[instrument(skip(self, request), fields(to = %request.to, gas_limit = request.gas_limit))]
    async fn execute_transaction(&self, request: TransactionRequest) -> TransactionResult {
        let start = Instant::now();
        let result = {
            let mut world = self.world.lock().await;
            world.execute(&request)
        };
        let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

        // Update statistics
        {
            let mut stats = self.stats.write().await;
            stats.transactions_executed += 1;
            stats.total_gas_used = stats.total_gas_used.saturating_add(result.gas_used);
            if result.success {
                stats.successful_executions += 1;
            } else {
                stats.failed_executions += 1;
            }
            stats.avg_execution_time_us = running_average(
                stats.avg_execution_time_us,
                elapsed_us,
                stats.transactions_executed,
            );
        }

        debug!(
            success = result.success,
            gas_used = result.gas_used,
            logs = result.logs.len(),
            calls = result.call_trace.len(),
            elapsed_us,
            "Transaction execution completed"
        );
        result
    }

    #[instrument(skip(self, request), fields(to = %request.to))]
    async fn estimate_gas(&self, request: TransactionRequest) -> Result<u64, VmError> {
        let result = self.simulate(&request).await;
        match result.error {
            None => {
                info!(gas_used = result.gas_used, "Gas estimated");
                Ok(result.gas_used)
            }
            Some(err) => Err(err),
        }
    }

    #[instrument(skip(self, request), fields(to = %request.to))]
    async fn call(&self, request: TransactionRequest) -> Result<Word, VmError> {
        let result = self.simulate(&request).await;
        match result.error {
            None => Ok(result.return_value),
            Some(err) => Err(err),
        }
    }

    async fn get_storage(&self, address: Address, key: StorageKey) -> Word {
        self.world.lock().await.get_storage(address, key)
    }
}

/// Folds `sample` into an average over `count` samples, `count` including it.
fn running_average(average: u64, sample: u64, count: u64) -> u64 {
    if count == 0 {
        return sample;
    }
    let total = u128::from(average) * u128::from(count - 1) + u128::from(sample);
    u64::try_from(total / u128::from(count)).unwrap_or(u64::MAX)
}

// =============================================================================
// TESTS
// =============================================================================
