//! valgraph: arena-based structural value-graph engine
//!
//! This library provides deep clone, deep freeze, and deep structural
//! equality over heterogeneous, possibly cyclic value graphs containing
//! primitives, plain objects, arrays, and the container types Date, RegExp,
//! Map, and Set.
//!
//! Values live in an append-only arena ([`values::ValueGraph`]) and
//! reference each other by index, so cyclic graphs are ordinary data and
//! the engines' visited-sets key on arena indices for reference identity.

pub mod analysis;
pub mod cli;
pub mod engine;
pub mod error;
pub mod interop;
pub mod snapshot;
pub mod values;

pub use engine::{deep_clone, deep_freeze, structural_eq};
pub use error::{Error as ValueGraphError, Result as ValueGraphResult};
pub use snapshot::Snapshot;

// Re-export commonly used types
pub use values::{DateValue, FreezeState, NodeId, RegExpValue, Value, ValueGraph, ValueKind};
