//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the interpreter depends on while running frames:
//! - Storage access (the transaction's working snapshot)
//! - Code lookup (the contract registry)
//!
//! Both are synchronous. A transaction never suspends mid-instruction.

use crate::domain::value_objects::{Address, StorageKey, Word};
use crate::evm::opcodes::Instruction;

// =============================================================================
// STATE ACCESS
// =============================================================================

/// Per-contract key/value storage as seen by executing frames.
///
/// ## Implementation Notes
///
/// Implementations see every write made earlier in the same transaction,
/// by any frame, and buffer those writes until the transaction commits.
pub trait StateAccess {
    /// Reads `key` from `address`'s storage. Keys never written read as 0.
    fn load(&self, address: &Address, key: &StorageKey) -> Word;

    /// Writes `value` under `key` in `address`'s storage.
    fn store(&mut self, address: &Address, key: &StorageKey, value: Word);
}

// =============================================================================
// CODE PROVIDER
// =============================================================================

/// Resolves contract addresses to deployed programs.
pub trait CodeProvider {
    /// Returns the program deployed at `address`, if any.
    fn code(&self, address: &Address) -> Option<&[Instruction]>;

    /// Returns true if a contract is deployed at `address`.
    fn contains(&self, address: &Address) -> bool {
        self.code(address).is_some()
    }
}

// =============================================================================
// TESTS
// =============================================================================
