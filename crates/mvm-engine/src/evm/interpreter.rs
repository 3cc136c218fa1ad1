//! # Interpreter
//!
//! Executes a transaction's frames to completion.
//!
//! Nested calls do not recurse on the native stack: the interpreter keeps an
//! explicit `Vec<CallFrame>` and always steps the topmost frame. `CALL` pushes
//! a child frame, `RETURN` pops it and hands its value and unspent gas back to
//! the caller. Any error stops every live frame at once.

use crate::domain::entities::{CallTraceEvent, VmConfig};
use crate::domain::value_objects::{Address, Word};
use crate::errors::VmError;
use crate::evm::frame::CallFrame;
use crate::evm::opcodes::{Instruction, Opcode};
use crate::evm::trace::TraceRecorder;
use crate::ports::outbound::{CodeProvider, StateAccess};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// What a finished run produced, before the World decides to commit.
#[derive(Debug)]
pub struct Execution {
    /// Root return value, or the error that stopped the transaction.
    pub outcome: Result<Word, VmError>,
    /// Gas consumed across all frames.
    pub gas_used: u64,
    /// Logs and call events in order.
    pub trace: TraceRecorder,
    /// Executed instructions per opcode.
    pub opcode_counts: BTreeMap<Opcode, u64>,
}

/// Result of stepping the top frame once.
enum Step<'c> {
    Continue,
    Call(CallFrame<'c>),
    Return(Word),
}

/// Frame-stack interpreter over a storage view and a code source.
pub struct Interpreter<'s, 'c, S, C>
where
    S: StateAccess,
    C: CodeProvider,
{
    state: &'s mut S,
    contracts: &'c C,
    config: &'c VmConfig,
    trace: TraceRecorder,
    opcode_counts: [u64; Opcode::COUNT],
}

impl<'s, 'c, S, C> Interpreter<'s, 'c, S, C>
where
    S: StateAccess,
    C: CodeProvider,
{
    /// Create a new interpreter.
    pub fn new(state: &'s mut S, contracts: &'c C, config: &'c VmConfig) -> Self {
        Self {
            state,
            contracts,
            config,
            trace: TraceRecorder::new(),
            opcode_counts: [0; Opcode::COUNT],
        }
    }

    /// Runs `target` as the root frame with `gas_limit` gas and `args` on its stack.
    #[must_use]
    pub fn run(
        mut self,
        target: &Address,
        origin: &Address,
        gas_limit: u64,
        args: &[Word],
    ) -> Execution {
        let Some(code) = self.contracts.code(target) else {
            return self.finish(Err(VmError::UnknownContract(target.clone())), 0);
        };

        let mut root = CallFrame::new(
            target.clone(),
            origin.clone(),
            code,
            gas_limit,
            0,
            self.config.max_stack_size,
        );
        if let Err(err) = root.seed(args) {
            return self.finish(Err(err), 0);
        }

        let mut frames = vec![root];
        let (outcome, gas_used) = match self.drive(&mut frames) {
            Ok((value, used)) => (Ok(value), used),
            Err(err) => {
                let remaining: u64 = frames.iter().map(|frame| frame.gas.remaining()).sum();
                self.unwind(&mut frames);
                (Err(err), gas_limit.saturating_sub(remaining))
            }
        };
        self.finish(outcome, gas_used)
    }

    /// Steps frames until the root returns. On error the failing frame and
    /// all its ancestors are left on `frames`.
    fn drive(&mut self, frames: &mut Vec<CallFrame<'c>>) -> Result<(Word, u64), VmError> {
        while let Some(frame) = frames.last_mut() {
            match self.step(frame)? {
                Step::Continue => {}
                Step::Call(child) => {
                    self.trace.call_enter(
                        child.caller.clone(),
                        child.address.clone(),
                        child.depth,
                        child.gas.limit(),
                    );
                    frames.push(child);
                }
                Step::Return(value) => {
                    let Some(done) = frames.pop() else { break };
                    let Some(parent) = frames.last_mut() else {
                        return Ok((value, done.gas.used()));
                    };

                    let refund = done.gas.remaining();
                    parent.gas.refund(refund);
                    debug!(
                        caller = %parent.address,
                        callee = %done.address,
                        depth = done.depth,
                        gas_used = done.gas.used(),
                        "call returned"
                    );
                    self.trace.call_exit(CallTraceEvent {
                        caller: parent.address.clone(),
                        callee: done.address,
                        depth: done.depth,
                        gas_allocated: done.gas.limit(),
                        gas_used: done.gas.used(),
                        gas_refunded: refund,
                        success: true,
                        return_value: Some(value),
                    });
                    parent.stack.push(value)?;
                }
            }
        }
        Ok((0, 0))
    }

    /// Records a failed call event for every callee frame, innermost first.
    fn unwind(&mut self, frames: &mut Vec<CallFrame<'c>>) {
        while let Some(done) = frames.pop() {
            let Some(parent) = frames.last() else { break };
            self.trace.call_exit(CallTraceEvent {
                caller: parent.address.clone(),
                callee: done.address,
                depth: done.depth,
                gas_allocated: done.gas.limit(),
                gas_used: done.gas.used(),
                gas_refunded: 0,
                success: false,
                return_value: None,
            });
        }
    }

    /// Executes the instruction at the frame's program counter.
    fn step(&mut self, frame: &mut CallFrame<'c>) -> Result<Step<'c>, VmError> {
        let Some(instruction) = frame.current() else {
            // Running off the end returns 0.
            return Ok(Step::Return(0));
        };

        let opcode = instruction.opcode();
        frame.gas.charge(opcode)?;
        self.opcode_counts[opcode as usize] += 1;
        trace!(
            address = %frame.address,
            pc = frame.pc(),
            depth = frame.depth,
            gas = frame.gas.remaining(),
            "{instruction}"
        );
        frame.advance();

        match instruction {
            Instruction::Push(value) => frame.stack.push(*value)?,
            Instruction::Pop => {
                frame.stack.pop()?;
            }
            Instruction::Add => binary(frame, Word::wrapping_add)?,
            Instruction::Sub => binary(frame, Word::wrapping_sub)?,
            Instruction::Mul => binary(frame, Word::wrapping_mul)?,
            Instruction::Div => {
                let (left, right) = frame.stack.pop_pair()?;
                if right == 0 {
                    return Err(VmError::DivisionByZero);
                }
                frame.stack.push(floor_div(left, right))?;
            }
            Instruction::Load(key) => {
                let value = self.state.load(&frame.address, key);
                frame.stack.push(value)?;
            }
            Instruction::Store(key) => {
                let value = frame.stack.pop()?;
                self.state.store(&frame.address, key, value);
            }
            Instruction::Log => {
                let value = frame.stack.pop()?;
                self.trace.log(frame.address.clone(), value);
            }
            Instruction::Return => return Ok(Step::Return(frame.stack.pop()?)),
            Instruction::Call { address, gas, args } => {
                return self.dispatch_call(frame, address, *gas, *args).map(Step::Call);
            }
        }
        Ok(Step::Continue)
    }

    /// Builds the callee frame for `CALL address gas nargs`.
    ///
    /// The `CALL` opcode cost has already been charged.
    fn dispatch_call(
        &self,
        frame: &mut CallFrame<'c>,
        address: &Address,
        gas: u64,
        nargs: usize,
    ) -> Result<CallFrame<'c>, VmError> {
        if gas > frame.gas.remaining() {
            return Err(VmError::InsufficientGas {
                requested: gas,
                available: frame.gas.remaining(),
            });
        }
        let args = frame.stack.take_top(nargs)?;
        frame.gas.reserve(gas)?;

        let depth = frame.depth + 1;
        if depth > self.config.max_call_depth {
            return Err(VmError::CallDepthExceeded {
                depth,
                max: self.config.max_call_depth,
            });
        }

        let code = self
            .contracts
            .code(address)
            .ok_or_else(|| VmError::UnknownContract(address.clone()))?;

        let mut child = CallFrame::new(
            address.clone(),
            frame.address.clone(),
            code,
            gas,
            depth,
            self.config.max_stack_size,
        );
        child.seed(&args)?;
        Ok(child)
    }

    fn finish(self, outcome: Result<Word, VmError>, gas_used: u64) -> Execution {
        let opcode_counts = Opcode::ALL
            .into_iter()
            .zip(self.opcode_counts)
            .filter(|&(_, count)| count > 0)
            .collect();

        Execution {
            outcome,
            gas_used,
            trace: self.trace,
            opcode_counts,
        }
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Pops `(left, right)` and pushes `op(left, right)`.
fn binary(frame: &mut CallFrame<'_>, op: fn(Word, Word) -> Word) -> Result<(), VmError> {
    let (left, right) = frame.stack.pop_pair()?;
    frame.stack.push(op(left, right))
}

/// Division rounding toward negative infinity. `right` must be non-zero.
fn floor_div(left: Word, right: Word) -> Word {
    let quotient = left.wrapping_div(right);
    if left.wrapping_rem(right) != 0 && ((left < 0) != (right < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

// =============================================================================
// TESTS
// =============================================================================
