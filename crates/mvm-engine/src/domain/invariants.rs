//! # Domain Invariants
//!
//! Properties every finished transaction must satisfy. The engine upholds
//! them by construction; these checks let tests and callers verify a
//! [`TransactionResult`] after the fact.
//!
//! - Gas limit: a transaction never uses more gas than it was given
//! - Call gas conservation: `allocated == used + refunded` for every call
//! - Call depth: no recorded call is deeper than the configured maximum
//! - Log ordering: log sequence numbers are dense and ascending
//! - Outcome consistency: success, phase and error agree

use crate::domain::entities::{TraceEvent, TransactionPhase, TransactionResult, VmConfig};
use crate::errors::VmError;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Gas used never exceeds the transaction's gas limit.
#[must_use]
pub fn check_gas_limit_invariant(result: &TransactionResult) -> bool {
    result.gas_used <= result.gas_limit
}

/// Every successful call satisfies `gas_allocated == gas_used + gas_refunded`;
/// failed calls refund nothing.
#[must_use]
pub fn check_call_gas_invariant(result: &TransactionResult) -> bool {
    result.call_trace.iter().all(|call| {
        if call.success {
            call.gas_allocated == call.gas_used + call.gas_refunded
        } else {
            call.gas_refunded == 0 && call.gas_used <= call.gas_allocated
        }
    })
}

/// Every recorded callee is nested (depth ≥ 1) and within the configured maximum.
#[must_use]
pub fn check_call_depth_invariant(result: &TransactionResult, config: &VmConfig) -> bool {
    result
        .call_trace
        .iter()
        .all(|call| call.depth >= 1 && call.depth <= config.max_call_depth)
}

/// Log sequence numbers run `0, 1, 2, ...` in timeline order, and the
/// `logs`/`call_trace` views agree with the timeline.
#[must_use]
pub fn check_log_order_invariant(result: &TransactionResult) -> bool {
    let dense = result
        .logs
        .iter()
        .enumerate()
        .all(|(i, log)| log.sequence == i);

    let timeline_logs = result.events.iter().filter_map(|event| match event {
        TraceEvent::Log(entry) => Some(entry),
        _ => None,
    });
    let timeline_calls = result.events.iter().filter_map(|event| match event {
        TraceEvent::CallExit(call) => Some(call),
        _ => None,
    });

    dense && timeline_logs.eq(result.logs.iter()) && timeline_calls.eq(result.call_trace.iter())
}

/// Success, phase, error and return value tell the same story. A reverted
/// transaction carries a runtime error, never a deployment error.
#[must_use]
pub fn check_outcome_invariant(result: &TransactionResult) -> bool {
    if result.success {
        result.phase == TransactionPhase::Committed && result.error.is_none()
    } else {
        result.phase == TransactionPhase::Reverted
            && result.error.as_ref().is_some_and(VmError::is_runtime)
            && result.return_value == 0
    }
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(result: &TransactionResult, config: &VmConfig) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_gas_limit_invariant(result) {
        violations.push(InvariantViolation::GasLimitExceeded {
            used: result.gas_used,
            limit: result.gas_limit,
        });
    }

    if !check_call_gas_invariant(result) {
        violations.push(InvariantViolation::CallGasMismatch);
    }

    if !check_call_depth_invariant(result, config) {
        let depth = result
            .call_trace
            .iter()
            .map(|call| call.depth)
            .max()
            .unwrap_or_default();
        violations.push(InvariantViolation::CallDepthExceeded {
            depth,
            max: config.max_call_depth,
        });
    }

    if !check_log_order_invariant(result) {
        violations.push(InvariantViolation::TraceOutOfOrder);
    }

    if !check_outcome_invariant(result) {
        violations.push(InvariantViolation::InconsistentOutcome);
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Gas limit exceeded.
    GasLimitExceeded {
        /// Gas the transaction reported as used.
        used: u64,
        /// Gas the transaction was given.
        limit: u64,
    },
    /// A call event's gas figures do not add up.
    CallGasMismatch,
    /// Call depth exceeded.
    CallDepthExceeded {
        /// Deepest recorded call.
        depth: usize,
        /// Configured maximum depth.
        max: usize,
    },
    /// Logs or call events out of order.
    TraceOutOfOrder,
    /// Success flag, phase and error disagree.
    InconsistentOutcome,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GasLimitExceeded { used, limit } => {
                write!(f, "gas limit exceeded: used {used} > limit {limit}")
            }
            Self::CallGasMismatch => {
                write!(f, "call gas does not balance: allocated != used + refunded")
            }
            Self::CallDepthExceeded { depth, max } => {
                write!(f, "call depth exceeded: {depth} > {max}")
            }
            Self::TraceOutOfOrder => write!(f, "trace events out of order"),
            Self::InconsistentOutcome => write!(f, "inconsistent transaction outcome"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
