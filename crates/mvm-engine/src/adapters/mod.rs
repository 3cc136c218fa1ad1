//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the driven ports.
//!
//! - `state_adapter` - committed storage and the per-transaction overlay
//! - `registry` - deployed contracts

pub mod registry;
pub mod state_adapter;

pub use registry::*;
pub use state_adapter::*;
