//! Traversal engines
//!
//! Deep clone, deep freeze, and structural equality share one hard problem:
//! traverse an arbitrary, possibly self-referential graph exactly once per
//! node, special-casing the container kinds, without overflowing the stack
//! or recursing forever. The shared answer is the visited-set tracker.
//!
//! All three are pure, synchronous functions: the visited state is
//! allocated fresh per call and discarded on return. Recursion depth is
//! bounded by the depth of the value graph, not its size; pathologically
//! deep non-cyclic inputs can still exhaust the call stack, which is an
//! accepted limitation.

pub mod clone;
pub mod equality;
pub mod freeze;
pub mod visited;

pub use clone::deep_clone;
pub use equality::structural_eq;
pub use freeze::deep_freeze;
