//! Value model
//!
//! The arena graph, node payloads, and the kind classifier used by every
//! traversal engine.

pub mod date;
pub mod graph;
pub mod kind;
pub mod regexp;

pub use date::DateValue;
pub use graph::{FreezeState, FunctionRef, Node, NodeId, SymbolRef, Value, ValueGraph};
pub use kind::ValueKind;
pub use regexp::RegExpValue;
