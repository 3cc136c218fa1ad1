//! # State Adapter
//!
//! Committed storage owned by the World, and the per-transaction overlay
//! that frames read and write through.

use crate::domain::value_objects::{Address, StorageKey, Word};
use crate::ports::outbound::StateAccess;
use serde::Serialize;
use std::collections::BTreeMap;

/// Storage of a single contract.
pub type ContractStorage = BTreeMap<StorageKey, Word>;

// =============================================================================
// COMMITTED STORAGE
// =============================================================================

/// Committed storage of every contract. Mutated only by [`Storage::apply`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Storage {
    contracts: BTreeMap<Address, ContractStorage>,
}

impl Storage {
    /// Create a new empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a committed value. Absent keys read as 0.
    #[must_use]
    pub fn get(&self, address: &Address, key: &StorageKey) -> Word {
        self.contracts
            .get(address)
            .and_then(|slots| slots.get(key))
            .copied()
            .unwrap_or_default()
    }

    /// Returns the slots written for `address`, if any.
    #[must_use]
    pub fn contract(&self, address: &Address) -> Option<&ContractStorage> {
        self.contracts.get(address)
    }

    /// Iterates over contracts that have at least one written slot.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &ContractStorage)> {
        self.contracts.iter()
    }

    /// Total number of written slots.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.contracts.values().map(BTreeMap::len).sum()
    }

    /// Opens a transaction overlay on top of this storage.
    #[must_use]
    pub fn snapshot(&self) -> StorageSnapshot<'_> {
        StorageSnapshot {
            base: self,
            writes: BTreeMap::new(),
        }
    }

    /// Applies the writes buffered by a committed snapshot.
    pub fn apply(&mut self, writes: StorageWrites) {
        for ((address, key), value) in writes.0 {
            self.contracts.entry(address).or_default().insert(key, value);
        }
    }
}

// =============================================================================
// TRANSACTION SNAPSHOT
// =============================================================================

/// Writes buffered by a [`StorageSnapshot`], detached from the base storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageWrites(BTreeMap<(Address, StorageKey), Word>);

impl StorageWrites {
    /// Number of buffered writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Working view of storage for one transaction.
///
/// Reads fall through to the committed base; writes stay in the overlay
/// until [`StorageSnapshot::into_writes`] hands them to [`Storage::apply`].
/// Dropping the snapshot discards them.
#[derive(Debug)]
pub struct StorageSnapshot<'a> {
    base: &'a Storage,
    writes: BTreeMap<(Address, StorageKey), Word>,
}

impl StorageSnapshot<'_> {
    /// Number of slots written so far.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Consumes the snapshot, returning its buffered writes.
    #[must_use]
    pub fn into_writes(self) -> StorageWrites {
        StorageWrites(self.writes)
    }
}

impl StateAccess for StorageSnapshot<'_> {
    fn load(&self, address: &Address, key: &StorageKey) -> Word {
        self.writes
            .get(&(address.clone(), key.clone()))
            .copied()
            .unwrap_or_else(|| self.base.get(address, key))
    }

    fn store(&mut self, address: &Address, key: &StorageKey, value: Word) {
        self.writes.insert((address.clone(), key.clone()), value);
    }
}

// =============================================================================
// TESTS
// =============================================================================
