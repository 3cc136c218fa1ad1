//! # Domain Layer (Inner Hexagon)
//!
//! Pure business types for contract execution.
//! NO I/O, NO async.

pub mod entities;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use invariants::*;
pub use value_objects::*;
