//! # Trace Recorder
//!
//! Append-only timeline of `LOG` emissions and call entries/exits for one
//! transaction. Shared by every frame of the transaction.

use crate::domain::entities::{CallTraceEvent, LogEntry, TraceEvent};
use crate::domain::value_objects::{Address, Word};

/// Ordered record of everything observable a transaction did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceRecorder {
    events: Vec<TraceEvent>,
    log_count: usize,
}

impl TraceRecorder {
    /// Create a new empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a log entry, assigning it the next sequence number.
    pub fn log(&mut self, address: Address, value: Word) {
        let sequence = self.log_count;
        self.log_count += 1;
        self.events.push(TraceEvent::Log(LogEntry {
            address,
            value,
            sequence,
        }));
    }

    /// Records that a callee frame was pushed.
    pub fn call_enter(&mut self, caller: Address, callee: Address, depth: usize, gas: u64) {
        self.events.push(TraceEvent::CallEnter {
            caller,
            callee,
            depth,
            gas,
        });
    }

    /// Records that a callee frame finished.
    pub fn call_exit(&mut self, event: CallTraceEvent) {
        self.events.push(TraceEvent::CallExit(event));
    }

    /// Full timeline.
    #[must_use]
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Log entries in emission order.
    #[must_use]
    pub fn logs(&self) -> Vec<LogEntry> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TraceEvent::Log(entry) => Some(entry.clone()),
                _ => None,
            })
            .collect()
    }

    /// Completed calls in completion order.
    #[must_use]
    pub fn calls(&self) -> Vec<CallTraceEvent> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TraceEvent::CallExit(call) => Some(call.clone()),
                _ => None,
            })
            .collect()
    }

    /// Consumes the recorder, returning the timeline.
    #[must_use]
    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }
}

// =============================================================================
// TESTS
// =============================================================================
