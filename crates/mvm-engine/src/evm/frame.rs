//! # Call Frame
//!
//! Execution context of one contract invocation: its program, program
//! counter, operand stack and gas meter. Storage and the trace recorder are
//! shared and live outside the frame.

use crate::domain::value_objects::{Address, Word};
use crate::errors::VmError;
use crate::evm::gas::GasMeter;
use crate::evm::opcodes::Instruction;
use crate::evm::stack::Stack;

/// One entry of the interpreter's frame stack.
#[derive(Debug)]
pub struct CallFrame<'c> {
    /// Contract being executed.
    pub address: Address,
    /// Contract (or transaction origin, for the root frame) that started it.
    pub caller: Address,
    /// Nesting level; the root frame is 0.
    pub depth: usize,
    /// Operand stack.
    pub stack: Stack,
    /// Gas available to this frame.
    pub gas: GasMeter,
    code: &'c [Instruction],
    pc: usize,
}

impl<'c> CallFrame<'c> {
    /// Creates a frame positioned at the first instruction.
    #[must_use]
    pub fn new(
        address: Address,
        caller: Address,
        code: &'c [Instruction],
        gas: u64,
        depth: usize,
        stack_limit: usize,
    ) -> Self {
        Self {
            address,
            caller,
            depth,
            stack: Stack::with_limit(stack_limit),
            gas: GasMeter::new(gas),
            code,
            pc: 0,
        }
    }

    /// Pushes call arguments, first argument at the bottom.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the arguments do not fit.
    pub fn seed(&mut self, args: &[Word]) -> Result<(), VmError> {
        args.iter().try_for_each(|&arg| self.stack.push(arg))
    }

    /// Instruction at the program counter, or `None` past the end.
    #[must_use]
    pub fn current(&self) -> Option<&'c Instruction> {
        self.code.get(self.pc)
    }

    /// Moves to the next instruction.
    pub fn advance(&mut self) {
        self.pc += 1;
    }

    /// Program counter.
    #[must_use]
    pub fn pc(&self) -> usize {
        self.pc
    }
}
