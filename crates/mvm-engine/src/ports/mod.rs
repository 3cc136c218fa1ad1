//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the execution core and the outside world.
//!
//! - **Driving Ports (Inbound)**: `ExecutionApi`
//! - **Driven Ports (Outbound)**: `StateAccess`, `CodeProvider`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
