//! Value classification
//!
//! Every node is classified into exactly one kind at each traversal step.
//! All three engines dispatch on the kind to decide handling.

use serde::Serialize;
use std::fmt;

/// Kind of a value node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ValueKind {
    /// Atomic/opaque leaf: undefined, null, bool, number, string, symbol, function
    Primitive,
    /// Timestamp container
    Date,
    /// Pattern + flags container
    RegExp,
    /// Ordered, index-keyed container
    Array,
    /// Key-value container, keys are values themselves
    Map,
    /// Membership container
    Set,
    /// Own-enumerable string-keyed properties
    PlainObject,
}

impl ValueKind {
    /// Whether nodes of this kind carry child nodes
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ValueKind::Array | ValueKind::Map | ValueKind::Set | ValueKind::PlainObject
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Primitive => "primitive",
            ValueKind::Date => "date",
            ValueKind::RegExp => "regexp",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
            ValueKind::Set => "set",
            ValueKind::PlainObject => "object",
        };
        write!(f, "{}", name)
    }
}
