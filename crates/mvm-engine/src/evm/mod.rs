//! # Virtual Machine
//!
//! Stack-machine implementation for contract execution.
//!
//! ## Components
//!
//! - `opcodes.rs` - Instruction set
//! - `program.rs` - Opcode text lexer
//! - `gas.rs` - Gas costs and metering
//! - `stack.rs` - Operand stack
//! - `frame.rs` - Call frames
//! - `trace.rs` - Log and call trace recorder
//! - `interpreter.rs` - Frame-stack execution engine

pub mod frame;
pub mod gas;
pub mod interpreter;
pub mod opcodes;
pub mod program;
pub mod stack;
pub mod trace;

pub use frame::*;
pub use gas::*;
pub use interpreter::*;
pub use opcodes::*;
pub use program::*;
pub use stack::*;
pub use trace::*;
