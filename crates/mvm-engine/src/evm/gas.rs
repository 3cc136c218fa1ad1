//! # Gas Metering
//!
//! Static per-opcode cost table and the per-frame gas counter.
//!
//! Every instruction is charged its fixed cost before it has any effect.
//! `CALL` is cheap by itself; the bulk of a call's cost is the allowance the
//! caller sets aside for the callee out of its own budget.

use crate::errors::VmError;
use crate::evm::opcodes::Opcode;

// =============================================================================
// BASE GAS COSTS
// =============================================================================

/// Gas costs for the instruction set.
pub mod costs {
    /// Stack shuffling and emission (`PUSH`, `POP`, `LOG`, `RETURN`).
    pub const BASE: u64 = 1;
    /// Cheap arithmetic (`ADD`, `SUB`).
    pub const VERY_LOW: u64 = 3;
    /// Expensive arithmetic and storage reads (`MUL`, `DIV`, `LOAD`).
    pub const LOW: u64 = 5;
    /// Fixed overhead of `CALL` (the callee allowance is charged separately).
    pub const CALL: u64 = 10;
    /// Storage writes.
    pub const STORE: u64 = 20;
}

/// Cost of every opcode, indexed by discriminant.
pub const OPCODE_GAS: [u64; Opcode::COUNT] = {
    let mut table = [0u64; Opcode::COUNT];

    table[Opcode::Push as usize] = costs::BASE;
    table[Opcode::Pop as usize] = costs::BASE;
    table[Opcode::Add as usize] = costs::VERY_LOW;
    table[Opcode::Sub as usize] = costs::VERY_LOW;
    table[Opcode::Mul as usize] = costs::LOW;
    table[Opcode::Div as usize] = costs::LOW;
    table[Opcode::Load as usize] = costs::LOW;
    table[Opcode::Store as usize] = costs::STORE;
    table[Opcode::Call as usize] = costs::CALL;
    table[Opcode::Return as usize] = costs::BASE;
    table[Opcode::Log as usize] = costs::BASE;

    table
};

/// Returns the fixed cost of an opcode.
#[must_use]
pub const fn cost(opcode: Opcode) -> u64 {
    OPCODE_GAS[opcode as usize]
}

// =============================================================================
// GAS METER
// =============================================================================

/// Remaining-gas counter of one call frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasMeter {
    limit: u64,
    remaining: u64,
}

impl GasMeter {
    /// Creates a meter holding `limit` gas.
    #[must_use]
    pub const fn new(limit: u64) -> Self {
        Self {
            limit,
            remaining: limit,
        }
    }

    /// Gas this frame started with.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Gas still available.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Gas consumed so far (`limit - remaining`).
    ///
    /// Allowances reserved for in-flight callees count as consumed until
    /// they are refunded.
    #[must_use]
    pub const fn used(&self) -> u64 {
        self.limit - self.remaining
    }

    /// Charges the fixed cost of `opcode`.
    ///
    /// # Errors
    ///
    /// Returns `OutOfGas` and drains the meter if the cost exceeds what is left.
    pub fn charge(&mut self, opcode: Opcode) -> Result<(), VmError> {
        self.consume(cost(opcode))
    }

    /// Consumes `amount` gas.
    ///
    /// # Errors
    ///
    /// Returns `OutOfGas` and drains the meter if `amount` exceeds what is left.
    pub fn consume(&mut self, amount: u64) -> Result<(), VmError> {
        if amount > self.remaining {
            self.remaining = 0;
            return Err(VmError::OutOfGas);
        }
        self.remaining -= amount;
        Ok(())
    }

    /// Sets aside `amount` gas for a callee.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientGas` (leaving the meter untouched) if `amount`
    /// exceeds what is left.
    pub fn reserve(&mut self, amount: u64) -> Result<(), VmError> {
        if amount > self.remaining {
            return Err(VmError::InsufficientGas {
                requested: amount,
                available: self.remaining,
            });
        }
        self.remaining -= amount;
        Ok(())
    }

    /// Returns unspent callee gas to this frame.
    pub fn refund(&mut self, amount: u64) {
        self.remaining = self.remaining.saturating_add(amount).min(self.limit);
    }
}

// =============================================================================
// TESTS
// =============================================================================
