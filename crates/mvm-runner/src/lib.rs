//! # Mini-EVM Runner Library
//!
//! This library exposes the runner's modules for testing.
//! The main entry point is the `main.rs` binary.
//!
//! - `config` - environment-driven runner configuration
//! - `demo` - sample contracts and transactions

#![warn(missing_docs)]

pub mod config;
pub mod demo;

pub use config::RunnerConfig;
pub use demo::{run_demo, DemoReport};
