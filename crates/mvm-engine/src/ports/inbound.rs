//! # Driving Ports (API - Inbound)
//!
//! The interface exposed to callers that deploy contracts and submit
//! transactions. Implemented by [`crate::service::ExecutionService`].

use crate::domain::entities::{TransactionRequest, TransactionResult};
use crate::domain::value_objects::{Address, StorageKey, Word};
use crate::errors::VmError;
use async_trait::async_trait;

// =============================================================================
// EXECUTION API (Primary Driving Port)
// =============================================================================

/// Primary API for contract deployment and execution.
///
/// ## Usage
///
/// ```ignore
/// api.deploy(Address::from("A"), "PUSH 1\nRETURN").await?;
/// let result = api.execute_transaction(TransactionRequest::new("A", 100)).await;
/// ```
#[async_trait]
pub trait ExecutionApi: Send + Sync {
    /// Parse and deploy a program.
    ///
    /// # Errors
    ///
    /// Returns `VmError::Program`, `ProgramTooLarge` or `DuplicateAddress`.
    async fn deploy(&self, address: Address, source: &str) -> Result<(), VmError>;

    /// Execute a transaction, committing its writes on success.
    ///
    /// Runtime failures are reported inside the result, never as `Err`.
    async fn execute_transaction(&self, request: TransactionRequest) -> TransactionResult;

    /// Estimate gas for a transaction.
    ///
    /// Runs the transaction and returns the gas used. Does NOT apply state changes.
    ///
    /// # Errors
    ///
    /// Returns the error that would revert the transaction.
    async fn estimate_gas(&self, request: TransactionRequest) -> Result<u64, VmError>;

    /// Execute a read-only call.
    ///
    /// Runs the transaction and returns its return value. Does NOT apply
    /// state changes.
    ///
    /// # Errors
    ///
    /// Returns the error that would revert the transaction.
    async fn call(&self, request: TransactionRequest) -> Result<Word, VmError>;

    /// Committed value of `key` in `address`'s storage, 0 if never written.
    async fn get_storage(&self, address: Address, key: StorageKey) -> Word;
}
