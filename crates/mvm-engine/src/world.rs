//! # World
//!
//! The committed ledger: deployed contracts plus committed storage. Owns the
//! transaction lifecycle `Open → Running → {Committed | Reverted}`.
//!
//! Every transaction runs against an overlay of committed storage shared by
//! all of its frames. The overlay's writes are applied only if the root frame
//! finishes without error; otherwise they are dropped and committed storage
//! is left exactly as it was.

use crate::adapters::registry::ContractRegistry;
use crate::adapters::state_adapter::{Storage, StorageWrites};
use crate::domain::entities::{
    Contract, TransactionPhase, TransactionRequest, TransactionResult, VmConfig,
};
use crate::domain::value_objects::{Address, StorageKey, Word};
use crate::errors::VmError;
use crate::evm::interpreter::{Execution, Interpreter};
use crate::evm::opcodes::Instruction;
use crate::evm::program::parse_program;
use tracing::{debug, info, trace, warn};

/// Contract registry and committed storage.
#[derive(Clone, Debug, Default)]
pub struct World {
    config: VmConfig,
    contracts: ContractRegistry,
    storage: Storage,
}

impl World {
    /// Create an empty world with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty world with the given limits.
    #[must_use]
    pub fn with_config(config: VmConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Engine limits in force.
    #[must_use]
    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    // =========================================================================
    // DEPLOYMENT
    // =========================================================================

    /// Registers a program at `address`.
    ///
    /// # Errors
    ///
    /// - `ProgramTooLarge` if the program exceeds `max_program_len`
    /// - `DuplicateAddress` if `address` is already deployed
    pub fn deploy(
        &mut self,
        address: impl Into<Address>,
        code: Vec<Instruction>,
    ) -> Result<(), VmError> {
        let address = address.into();
        if code.len() > self.config.max_program_len {
            return Err(VmError::ProgramTooLarge {
                len: code.len(),
                max: self.config.max_program_len,
            });
        }

        let instructions = code.len();
        self.contracts.register(Contract::new(address.clone(), code))?;
        info!(%address, instructions, "Contract deployed");
        Ok(())
    }

    /// Parses `source` and deploys it at `address`.
    ///
    /// # Errors
    ///
    /// Returns `VmError::Program` for malformed source, otherwise as [`World::deploy`].
    pub fn deploy_source(
        &mut self,
        address: impl Into<Address>,
        source: &str,
    ) -> Result<(), VmError> {
        let code = parse_program(source)?;
        self.deploy(address, code)
    }

    // =========================================================================
    // TRANSACTIONS
    // =========================================================================

    /// Runs a transaction and commits its storage writes if it succeeds.
    pub fn execute(&mut self, request: &TransactionRequest) -> TransactionResult {
        let (result, writes) = self.run(request);

        match (writes, &result.error) {
            (Some(writes), _) => {
                let slots = writes.len();
                self.storage.apply(writes);
                info!(
                    to = %result.to,
                    gas_used = result.gas_used,
                    return_value = result.return_value,
                    slots,
                    "Transaction committed"
                );
            }
            (None, error) => {
                warn!(
                    to = %result.to,
                    gas_used = result.gas_used,
                    error = ?error,
                    "Transaction reverted"
                );
            }
        }
        result
    }

    /// Runs `address` with `gas_limit`, no arguments and the external origin.
    pub fn run_transaction(
        &mut self,
        address: impl Into<Address>,
        gas_limit: u64,
    ) -> TransactionResult {
        self.execute(&TransactionRequest::new(address, gas_limit))
    }

    /// Runs a transaction without committing anything.
    ///
    /// The result reports the phase the transaction would have reached.
    #[must_use]
    pub fn simulate(&self, request: &TransactionRequest) -> TransactionResult {
        let (result, _) = self.run(request);
        debug!(
            to = %result.to,
            success = result.success,
            gas_used = result.gas_used,
            "Transaction simulated"
        );
        result
    }

    fn run(&self, request: &TransactionRequest) -> (TransactionResult, Option<StorageWrites>) {
        debug!(
            to = %request.to,
            origin = %request.origin,
            gas_limit = request.gas_limit,
            args = request.args.len(),
            phase = ?TransactionPhase::Open,
            "Transaction opened"
        );

        let mut snapshot = self.storage.snapshot();
        trace!(to = %request.to, phase = ?TransactionPhase::Running, "Transaction running");
        let Execution {
            outcome,
            gas_used,
            trace,
            opcode_counts,
        } = Interpreter::new(&mut snapshot, &self.contracts, &self.config).run(
            &request.to,
            &request.origin,
            request.gas_limit,
            &request.args,
        );

        let (phase, return_value, error, writes) = match outcome {
            Ok(value) => (
                TransactionPhase::Committed,
                value,
                None,
                Some(snapshot.into_writes()),
            ),
            Err(err) => (TransactionPhase::Reverted, 0, Some(err), None),
        };

        let result = TransactionResult {
            phase,
            success: error.is_none(),
            return_value,
            to: request.to.clone(),
            origin: request.origin.clone(),
            gas_limit: request.gas_limit,
            gas_used,
            error,
            logs: trace.logs(),
            call_trace: trace.calls(),
            events: trace.into_events(),
            opcode_counts,
        };
        (result, writes)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Committed value of `key` in `address`'s storage, 0 if never written.
    #[must_use]
    pub fn get_storage(&self, address: impl Into<Address>, key: impl Into<StorageKey>) -> Word {
        self.storage.get(&address.into(), &key.into())
    }

    /// Committed storage of every contract.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Looks up a deployed contract.
    #[must_use]
    pub fn contract(&self, address: &Address) -> Option<&Contract> {
        self.contracts.get(address)
    }

    /// Iterates over deployed addresses in order.
    pub fn contracts(&self) -> impl Iterator<Item = &Address> {
        self.contracts.addresses()
    }
}

// =============================================================================
// TESTS
// =============================================================================
