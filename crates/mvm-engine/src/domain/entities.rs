//! # Core Domain Entities
//!
//! Main business entities for contract execution: deployed contracts,
//! transaction requests and results, and the events recorded while a
//! transaction runs.

use crate::domain::value_objects::{Address, Word};
use crate::errors::VmError;
use crate::evm::opcodes::{Instruction, Opcode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

// =============================================================================
// CONTRACT
// =============================================================================

/// A deployed contract. Immutable once deployed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contract {
    /// Address the contract is registered under.
    pub address: Address,
    /// Decoded program.
    pub code: Arc<[Instruction]>,
}

impl Contract {
    /// Creates a contract from its address and instructions.
    #[must_use]
    pub fn new(address: Address, code: Vec<Instruction>) -> Self {
        Self {
            address,
            code: code.into(),
        }
    }

    /// Number of instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Returns true if the program has no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

// =============================================================================
// TRANSACTION REQUEST
// =============================================================================

/// A top-level invocation of a contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Contract to run.
    pub to: Address,
    /// Who submitted the transaction. Recorded, never authenticated.
    pub origin: Address,
    /// Gas available to the root frame.
    pub gas_limit: u64,
    /// Values placed on the root frame's stack, bottom first.
    #[serde(default)]
    pub args: Vec<Word>,
}

impl TransactionRequest {
    /// Creates a request with no arguments from the external origin.
    #[must_use]
    pub fn new(to: impl Into<Address>, gas_limit: u64) -> Self {
        Self {
            to: to.into(),
            origin: Address::external(),
            gas_limit,
            args: Vec::new(),
        }
    }

    /// Sets the origin address.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<Address>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets the root-frame arguments.
    #[must_use]
    pub fn with_args(mut self, args: impl Into<Vec<Word>>) -> Self {
        self.args = args.into();
        self
    }
}

// =============================================================================
// TRANSACTION LIFECYCLE
// =============================================================================

/// Lifecycle of a transaction: `Open → Running → {Committed | Reverted}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionPhase {
    /// Snapshot and trace recorder created, nothing executed yet.
    Open,
    /// Frames are executing.
    Running,
    /// Working storage replaced committed storage.
    Committed,
    /// Working storage discarded.
    Reverted,
}

impl TransactionPhase {
    /// Returns true for `Committed` and `Reverted`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Reverted)
    }
}

// =============================================================================
// TRACE EVENTS
// =============================================================================

/// A value emitted by `LOG`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Contract that executed `LOG`.
    pub address: Address,
    /// Popped value.
    pub value: Word,
    /// Position among the transaction's logs, starting at 0.
    pub sequence: usize,
}

/// Outcome of one `CALL`, recorded when the callee finishes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTraceEvent {
    /// Contract that executed `CALL`.
    pub caller: Address,
    /// Contract that was run.
    pub callee: Address,
    /// Depth of the callee frame (the root frame is depth 0).
    pub depth: usize,
    /// Allowance set aside by the caller.
    pub gas_allocated: u64,
    /// Gas the callee burned.
    pub gas_used: u64,
    /// Gas handed back to the caller (0 when the call failed).
    pub gas_refunded: u64,
    /// Whether the callee returned normally.
    pub success: bool,
    /// Callee's return value, when it succeeded.
    pub return_value: Option<Word>,
}

/// One entry of the transaction timeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TraceEvent {
    /// A `LOG` emission.
    Log(LogEntry),
    /// A callee frame was pushed.
    CallEnter {
        /// Contract that executed `CALL`.
        caller: Address,
        /// Contract being run.
        callee: Address,
        /// Depth of the new frame.
        depth: usize,
        /// Allowance handed to the callee.
        gas: u64,
    },
    /// A callee frame finished, successfully or not.
    CallExit(CallTraceEvent),
}

// =============================================================================
// TRANSACTION RESULT
// =============================================================================

/// Outcome of one transaction. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionResult {
    /// Final lifecycle phase (`Committed` or `Reverted`).
    pub phase: TransactionPhase,
    /// Whether the transaction committed.
    pub success: bool,
    /// Root frame's return value (0 when it ended without `RETURN` or failed).
    pub return_value: Word,
    /// Contract the transaction ran.
    pub to: Address,
    /// Submitting address.
    pub origin: Address,
    /// Gas the transaction was given.
    pub gas_limit: u64,
    /// Gas consumed, up to the failure point on revert.
    pub gas_used: u64,
    /// Why the transaction reverted.
    pub error: Option<VmError>,
    /// `LOG` emissions in order.
    pub logs: Vec<LogEntry>,
    /// Completed calls in depth-first completion order.
    pub call_trace: Vec<CallTraceEvent>,
    /// Full timeline (logs, call entries and exits) in order.
    pub events: Vec<TraceEvent>,
    /// Executed instructions per opcode, over every frame.
    pub opcode_counts: BTreeMap<Opcode, u64>,
}

impl TransactionResult {
    /// Returns true if the transaction reverted.
    #[must_use]
    pub fn is_reverted(&self) -> bool {
        self.phase == TransactionPhase::Reverted
    }

    /// Total number of executed instructions.
    #[must_use]
    pub fn instructions_executed(&self) -> u64 {
        self.opcode_counts.values().sum()
    }
}

// =============================================================================
// VM CONFIGURATION
// =============================================================================

/// Virtual Machine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmConfig {
    /// Maximum call depth; the root frame is depth 0 (default: 1024).
    pub max_call_depth: usize,
    /// Maximum entries per frame stack (default: 1024).
    pub max_stack_size: usize,
    /// Maximum instructions per deployed program (default: 24576).
    pub max_program_len: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            max_call_depth: 1024,
            max_stack_size: 1024,
            max_program_len: 24_576,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
