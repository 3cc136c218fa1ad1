//! # Contract Registry
//!
//! In-memory address → program mapping. Contracts are never replaced or
//! removed once registered.

use crate::domain::entities::Contract;
use crate::domain::value_objects::Address;
use crate::errors::VmError;
use crate::evm::opcodes::Instruction;
use crate::ports::outbound::CodeProvider;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Deployed contracts, ordered by address.
#[derive(Clone, Debug, Default)]
pub struct ContractRegistry {
    contracts: BTreeMap<Address, Contract>,
}

impl ContractRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a contract.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAddress` if the address is already taken.
    pub fn register(&mut self, contract: Contract) -> Result<(), VmError> {
        match self.contracts.entry(contract.address.clone()) {
            Entry::Occupied(entry) => Err(VmError::DuplicateAddress(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(contract);
                Ok(())
            }
        }
    }

    /// Looks up a contract.
    #[must_use]
    pub fn get(&self, address: &Address) -> Option<&Contract> {
        self.contracts.get(address)
    }

    /// Iterates over deployed addresses in order.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.contracts.keys()
    }

    /// Number of deployed contracts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns true if nothing is deployed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl CodeProvider for ContractRegistry {
    fn code(&self, address: &Address) -> Option<&[Instruction]> {
        self.contracts.get(address).map(|contract| &*contract.code)
    }
}

// =============================================================================
// TESTS
// =============================================================================
