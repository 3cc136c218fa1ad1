//! # Mini-EVM Engine - Deterministic Contract Execution
//!
//! ## Purpose
//!
//! Executes stack-based programs ("contracts") that read and write
//! per-contract key/value storage, call one another synchronously and pay
//! for every instruction with gas. Each transaction is all-or-nothing: its
//! storage writes are committed only if every frame finishes cleanly.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Gas charged before every effect | `evm/interpreter.rs` - `Interpreter::step()` |
//! | Gas limit never exceeded | `domain/invariants.rs` - `check_gas_limit_invariant()` |
//! | Call gas conservation | `domain/invariants.rs` - `check_call_gas_invariant()` |
//! | Call depth limit | `evm/interpreter.rs` - `Interpreter::dispatch_call()` |
//! | No storage change on revert | `world.rs` - `World::execute()` |
//!
//! ### Execution Safety Limits
//!
//! | Limit | Default | Purpose |
//! |-------|---------|---------|
//! | `max_call_depth` | 1024 | Bound nested calls |
//! | `max_stack_size` | 1024 | Bound each frame's stack |
//! | `max_program_len` | 24576 | Bound deployed programs |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Interpreter | `evm/interpreter.rs` | Frame-stack execution engine |
//! | Lexer | `evm/program.rs` | Opcode text to instructions |
//! | Gas | `evm/gas.rs` | Cost table & metering |
//! | Stack | `evm/stack.rs` | 1024-item operand stack |
//! | Trace | `evm/trace.rs` | Logs and call events |
//! | Storage | `adapters/state_adapter.rs` | Committed storage & overlay |
//! | World | `world.rs` | Registry and transaction lifecycle |
//! | Service | `service.rs` | Async façade with statistics |
//!
//! ## Usage Example
//!
//! ```
//! use mvm_engine::prelude::*;
//!
//! let mut world = World::new();
//! world
//!     .deploy_source("A1", "PUSH 5\nPUSH 3\nADD\nSTORE x\nPUSH 1\nRETURN")
//!     .unwrap();
//!
//! let result = world.run_transaction("A1", 100);
//! assert!(result.success);
//! assert_eq!(result.gas_used, 27);
//! assert_eq!(world.get_storage("A1", "x"), 8);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod evm;
pub mod ports;
pub mod service;
pub mod world;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        CallTraceEvent, Contract, LogEntry, TraceEvent, TransactionPhase, TransactionRequest,
        TransactionResult, VmConfig,
    };

    // Value objects
    pub use crate::domain::value_objects::{Address, StorageKey, Word};

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::ExecutionApi;
    pub use crate::ports::outbound::{CodeProvider, StateAccess};

    // Errors
    pub use crate::errors::{ProgramError, VmError};

    // VM components
    pub use crate::evm::{
        gas, opcodes::Instruction, opcodes::Opcode, program::parse_program, Interpreter,
    };

    // Adapters
    pub use crate::adapters::{ContractRegistry, Storage};

    // World & service
    pub use crate::service::{ExecutionService, ServiceConfig, ServiceStats};
    pub use crate::world::World;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
