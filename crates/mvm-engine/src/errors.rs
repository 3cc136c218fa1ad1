//! # Error Types
//!
//! All error types for program loading and contract execution.

use crate::domain::value_objects::Address;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// VM ERRORS
// =============================================================================

/// Errors that abort a transaction or reject a deployment.
///
/// Every runtime variant is fatal: the frame that raised it stops, every
/// ancestor frame stops with it, and the transaction reverts.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum VmError {
    /// Pop from a stack holding fewer entries than the instruction needs.
    #[error("stack underflow")]
    StackUnderflow,

    /// Push onto a full stack.
    #[error("stack overflow: limit is {max} entries")]
    StackOverflow {
        /// Stack capacity.
        max: usize,
    },

    /// `DIV` with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// The frame could not pay for its next instruction.
    #[error("out of gas")]
    OutOfGas,

    /// `CALL` asked for more gas than the caller has left.
    #[error("insufficient gas for call: requested {requested}, available {available}")]
    InsufficientGas {
        /// Allowance named by the `CALL`.
        requested: u64,
        /// Gas the caller had left after paying for the `CALL`.
        available: u64,
    },

    /// `CALL` target (or transaction target) is not deployed.
    #[error("unknown contract: {0}")]
    UnknownContract(Address),

    /// `CALL` asked for more arguments than the caller's stack holds.
    #[error("argument count mismatch: call needs {expected} arguments, stack holds {available}")]
    ArgumentCountMismatch {
        /// Arguments the `CALL` asked for.
        expected: usize,
        /// Entries on the caller's stack.
        available: usize,
    },

    /// Nested call would exceed the configured depth.
    #[error("call depth exceeded: {depth} > {max}")]
    CallDepthExceeded {
        /// Depth the callee would have run at.
        depth: usize,
        /// Configured maximum depth.
        max: usize,
    },

    /// `deploy` on an address that is already registered.
    #[error("address already in use: {0}")]
    DuplicateAddress(Address),

    /// Program is longer than the configured maximum.
    #[error("program too large: {len} > {max} instructions")]
    ProgramTooLarge {
        /// Instructions in the program.
        len: usize,
        /// Configured maximum program length.
        max: usize,
    },

    /// Program text could not be lexed.
    #[error("invalid program: {0}")]
    Program(#[from] ProgramError),
}

impl VmError {
    /// Returns true for errors raised while a transaction was running,
    /// as opposed to deployment-time rejections.
    #[must_use]
    pub fn is_runtime(&self) -> bool {
        !matches!(
            self,
            Self::DuplicateAddress(_) | Self::ProgramTooLarge { .. } | Self::Program(_)
        )
    }
}

// =============================================================================
// PROGRAM ERRORS
// =============================================================================

/// Errors from turning opcode text into instructions.
///
/// Line numbers are 1-based.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
pub enum ProgramError {
    /// Mnemonic is not part of the instruction set.
    #[error("line {line}: unknown opcode `{opcode}`")]
    UnknownOpcode {
        /// Line of the instruction.
        line: usize,
        /// Mnemonic as written.
        opcode: String,
    },

    /// Instruction is missing a required operand.
    #[error("line {line}: `{opcode}` is missing operand `{operand}`")]
    MissingOperand {
        /// Line of the instruction.
        line: usize,
        /// Canonical mnemonic.
        opcode: &'static str,
        /// Name of the missing operand.
        operand: &'static str,
    },

    /// Operand could not be parsed.
    #[error("line {line}: invalid operand `{value}` for `{opcode}`")]
    InvalidOperand {
        /// Line of the instruction.
        line: usize,
        /// Canonical mnemonic.
        opcode: &'static str,
        /// Operand text as written.
        value: String,
    },

    /// Instruction carries more operands than it takes.
    #[error("line {line}: `{opcode}` takes {expected} operands, got {actual}")]
    TrailingOperands {
        /// Line of the instruction.
        line: usize,
        /// Canonical mnemonic.
        opcode: &'static str,
        /// Operands the instruction takes.
        expected: usize,
        /// Operands found on the line.
        actual: usize,
    },
}

// =============================================================================
// TESTS
// =============================================================================
