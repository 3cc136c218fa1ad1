//! # Integration Tests
//!
//! End-to-end flows through the lexer, interpreter, world and service.
//!
//! - `scenarios` - reference transactions with exact gas and storage outcomes
//! - `properties` - invariants checked over sweeps of inputs
//! - `service` - async service and demo runner

pub mod properties;
pub mod scenarios;
pub mod service;
