//! # Opcodes
//!
//! The closed instruction set of the VM.
//!
//! [`Opcode`] is the bare mnemonic (used for gas lookup and execution
//! statistics); [`Instruction`] is an opcode together with its literal
//! operands, resolved before execution begins.

use crate::domain::value_objects::{Address, StorageKey, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opcode enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Opcode {
    /// Push a literal.
    Push = 0x00,
    /// Discard the top entry.
    Pop = 0x01,
    /// Wrapping addition.
    Add = 0x02,
    /// Wrapping subtraction.
    Sub = 0x03,
    /// Wrapping multiplication.
    Mul = 0x04,
    /// Floor division.
    Div = 0x05,
    /// Storage read.
    Load = 0x06,
    /// Storage write.
    Store = 0x07,
    /// Nested contract call.
    Call = 0x08,
    /// Stop the frame with a value.
    Return = 0x09,
    /// Emit a log entry.
    Log = 0x0A,
}

impl Opcode {
    /// Number of opcodes in the instruction set.
    pub const COUNT: usize = 11;

    /// All opcodes in discriminant order.
    pub const ALL: [Opcode; Self::COUNT] = [
        Opcode::Push,
        Opcode::Pop,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Load,
        Opcode::Store,
        Opcode::Call,
        Opcode::Return,
        Opcode::Log,
    ];

    /// Returns the mnemonic.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Call => "CALL",
            Opcode::Return => "RETURN",
            Opcode::Log => "LOG",
        }
    }

    /// Looks up a mnemonic, case-insensitively.
    ///
    /// `SLOAD` and `SSTORE` are accepted as aliases of `LOAD` and `STORE`.
    #[must_use]
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        let op = match mnemonic.to_ascii_uppercase().as_str() {
            "PUSH" => Opcode::Push,
            "POP" => Opcode::Pop,
            "ADD" => Opcode::Add,
            "SUB" => Opcode::Sub,
            "MUL" => Opcode::Mul,
            "DIV" => Opcode::Div,
            "LOAD" | "SLOAD" => Opcode::Load,
            "STORE" | "SSTORE" => Opcode::Store,
            "CALL" => Opcode::Call,
            "RETURN" => Opcode::Return,
            "LOG" => Opcode::Log,
            _ => return None,
        };
        Some(op)
    }

    /// Number of literal operands the instruction carries.
    #[must_use]
    pub const fn operand_count(self) -> usize {
        match self {
            Opcode::Push | Opcode::Load | Opcode::Store => 1,
            Opcode::Call => 3,
            _ => 0,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// Push a literal.
    Push(Word),
    /// Discard the top of the stack.
    Pop,
    /// `left + right`.
    Add,
    /// `left - right`.
    Sub,
    /// `left * right`.
    Mul,
    /// `left / right`, rounding toward negative infinity.
    Div,
    /// Push the value stored under `key` for the executing contract.
    Load(StorageKey),
    /// Pop a value and store it under `key` for the executing contract.
    Store(StorageKey),
    /// Run `address` with a gas allowance and `args` arguments taken from the stack.
    Call {
        /// Callee.
        address: Address,
        /// Allowance taken from the caller.
        gas: u64,
        /// Number of stack entries passed to the callee.
        args: usize,
    },
    /// Pop the frame's return value and stop the frame.
    Return,
    /// Pop a value and emit it as a log entry.
    Log,
}

impl Instruction {
    /// Returns the opcode of this instruction.
    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        match self {
            Instruction::Push(_) => Opcode::Push,
            Instruction::Pop => Opcode::Pop,
            Instruction::Add => Opcode::Add,
            Instruction::Sub => Opcode::Sub,
            Instruction::Mul => Opcode::Mul,
            Instruction::Div => Opcode::Div,
            Instruction::Load(_) => Opcode::Load,
            Instruction::Store(_) => Opcode::Store,
            Instruction::Call { .. } => Opcode::Call,
            Instruction::Return => Opcode::Return,
            Instruction::Log => Opcode::Log,
        }
    }

    /// Convenience constructor for `CALL`.
    #[must_use]
    pub fn call(address: impl Into<Address>, gas: u64, args: usize) -> Self {
        Instruction::Call {
            address: address.into(),
            gas,
            args,
        }
    }

    /// Convenience constructor for `LOAD`.
    #[must_use]
    pub fn load(key: impl Into<StorageKey>) -> Self {
        Instruction::Load(key.into())
    }

    /// Convenience constructor for `STORE`.
    #[must_use]
    pub fn store(key: impl Into<StorageKey>) -> Self {
        Instruction::Store(key.into())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Push(value) => write!(f, "PUSH {value}"),
            Instruction::Load(key) => write!(f, "LOAD {key}"),
            Instruction::Store(key) => write!(f, "STORE {key}"),
            Instruction::Call { address, gas, args } => write!(f, "CALL {address} {gas} {args}"),
            other => f.write_str(other.opcode().name()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
