//! # Value Objects
//!
//! Immutable domain primitives for contract execution.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The integer type held on the stack and in storage.
///
/// Arithmetic on words wraps on overflow (two's complement) and division
/// rounds toward negative infinity.
pub type Word = i64;

// =============================================================================
// ADDRESS
// =============================================================================

/// Opaque contract address (`"A1"`, `"token"`, ...).
///
/// Addresses are compared and ordered by their text, so every map keyed by
/// address iterates in a stable order.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Address recorded as the origin of transactions submitted without one.
    pub const EXTERNAL: &'static str = "external";

    /// Creates an address from any string-like value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The default transaction origin.
    #[must_use]
    pub fn external() -> Self {
        Self::new(Self::EXTERNAL)
    }

    /// Returns the address text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Address {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// =============================================================================
// STORAGE KEY
// =============================================================================

/// Key of a storage slot inside one contract's storage.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// Creates a storage key from any string-like value.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StorageKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for StorageKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// =============================================================================
// TESTS
// =============================================================================
