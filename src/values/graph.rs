//! Arena value graph
//!
//! Values live in an append-only arena and reference each other by index.
//! Cycles are expressed as ordinary child indices, so traversals never chase
//! pointers and the visited-set can key on the arena index directly.
//!
//! Freezing is an explicit per-node state enforced by the mutation API:
//! there is no runtime property interception, so every mutator checks the
//! target's [`FreezeState`] and fails with a typed error instead.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::values::date::DateValue;
use crate::values::kind::ValueKind;
use crate::values::regexp::RegExpValue;

/// Index of a node in a [`ValueGraph`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Position of the node in its arena
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// An opaque symbol identity with an optional description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolRef {
    id: u32,
    description: Option<String>,
}

impl SymbolRef {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// An opaque function identity with an optional name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRef {
    id: u32,
    name: Option<String>,
}

impl FunctionRef {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Payload of a value node
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Opaque symbol, compared by identity
    Symbol(SymbolRef),
    /// Opaque function reference, compared by identity
    FunctionRef(FunctionRef),
    /// Timestamp container
    Date(DateValue),
    /// Pattern + flags container
    RegExp(RegExpValue),
    /// Ordered elements
    Array(Vec<NodeId>),
    /// Insertion-ordered key-value entries; keys are nodes themselves
    Map(Vec<(NodeId, NodeId)>),
    /// Insertion-ordered members, deduplicated under SameValueZero
    Set(Vec<NodeId>),
    /// Own-enumerable string-keyed properties, insertion-ordered
    Object(IndexMap<String, NodeId>),
}

impl Value {
    /// Classify the payload into exactly one kind
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Text(_)
            | Value::Symbol(_)
            | Value::FunctionRef(_) => ValueKind::Primitive,
            Value::Date(_) => ValueKind::Date,
            Value::RegExp(_) => ValueKind::RegExp,
            Value::Array(_) => ValueKind::Array,
            Value::Map(_) => ValueKind::Map,
            Value::Set(_) => ValueKind::Set,
            Value::Object(_) => ValueKind::PlainObject,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.kind() == ValueKind::Primitive
    }

    /// Whether this is `null` or `undefined`
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// SameValueZero comparison for primitive payloads: NaN equals NaN,
    /// -0 equals 0, symbols and function refs by identity. Non-primitive
    /// payloads never compare equal here.
    pub fn same_primitive(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a.id == b.id,
            (Value::FunctionRef(a), Value::FunctionRef(b)) => a.id == b.id,
            _ => false,
        }
    }
}

/// Immutability state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreezeState {
    /// Mutation allowed
    Mutable,
    /// Array/Object: assignment, deletion and resize rejected
    Frozen,
    /// Map/Set: the container accepts new entries, but entries are
    /// deep-frozen as they are inserted
    FrozenContents,
}

/// A node in the arena: payload plus freeze state
#[derive(Debug, Clone)]
pub struct Node {
    value: Value,
    freeze: FreezeState,
}

impl Node {
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    pub fn freeze_state(&self) -> FreezeState {
        self.freeze
    }
}

/// Append-only arena of value nodes
#[derive(Debug, Default, Clone)]
pub struct ValueGraph {
    nodes: Vec<Node>,
    next_symbol: u32,
    next_function: u32,
}

impl ValueGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node, or `None` for an id from another graph
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a node. Panics if the id does not belong to this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Payload of a node
    pub fn value(&self, id: NodeId) -> &Value {
        self.node(id).value()
    }

    /// Kind of a node
    pub fn kind(&self, id: NodeId) -> ValueKind {
        self.node(id).kind()
    }

    /// Freeze state of a node
    pub fn freeze_state(&self, id: NodeId) -> FreezeState {
        self.node(id).freeze_state()
    }

    /// Whether the node rejects property mutation
    pub fn is_frozen(&self, id: NodeId) -> bool {
        self.freeze_state(id) == FreezeState::Frozen
    }

    pub(crate) fn alloc(&mut self, value: Value) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            value,
            freeze: FreezeState::Mutable,
        });
        id
    }

    // ----- constructors -----

    pub fn undefined(&mut self) -> NodeId {
        self.alloc(Value::Undefined)
    }

    pub fn null(&mut self) -> NodeId {
        self.alloc(Value::Null)
    }

    pub fn boolean(&mut self, value: bool) -> NodeId {
        self.alloc(Value::Bool(value))
    }

    pub fn number(&mut self, value: f64) -> NodeId {
        self.alloc(Value::Number(value))
    }

    pub fn text(&mut self, value: impl Into<String>) -> NodeId {
        self.alloc(Value::Text(value.into()))
    }

    /// Allocate a fresh symbol. Each call produces a distinct identity,
    /// regardless of description.
    pub fn symbol(&mut self, description: Option<&str>) -> NodeId {
        let id = self.next_symbol;
        self.next_symbol += 1;
        self.alloc(Value::Symbol(SymbolRef {
            id,
            description: description.map(str::to_string),
        }))
    }

    /// Allocate a fresh function reference with a distinct identity
    pub fn function_ref(&mut self, name: Option<&str>) -> NodeId {
        let id = self.next_function;
        self.next_function += 1;
        self.alloc(Value::FunctionRef(FunctionRef {
            id,
            name: name.map(str::to_string),
        }))
    }

    pub fn date(&mut self, value: DateValue) -> NodeId {
        self.alloc(Value::Date(value))
    }

    pub fn date_from_millis(&mut self, millis: f64) -> NodeId {
        self.date(DateValue::from_millis(millis))
    }

    /// Create a regexp node, validating pattern and flags
    pub fn regexp(&mut self, source: &str, flags: &str) -> Result<NodeId> {
        let value = RegExpValue::new(source, flags)?;
        Ok(self.alloc(Value::RegExp(value)))
    }

    /// Wrap an already-validated regexp value
    pub fn regexp_value(&mut self, value: RegExpValue) -> NodeId {
        self.alloc(Value::RegExp(value))
    }

    pub fn array(&mut self, items: impl IntoIterator<Item = NodeId>) -> NodeId {
        let items: Vec<NodeId> = items.into_iter().collect();
        self.alloc(Value::Array(items))
    }

    /// Create a set, deduplicating members under SameValueZero
    pub fn set(&mut self, members: impl IntoIterator<Item = NodeId>) -> NodeId {
        let mut unique: Vec<NodeId> = Vec::new();
        for member in members {
            if !unique.iter().any(|&m| self.same_value_zero(m, member)) {
                unique.push(member);
            }
        }
        self.alloc(Value::Set(unique))
    }

    /// Create a map; a duplicate key (under SameValueZero) keeps the last
    /// value, like repeated `Map.set` calls
    pub fn map(&mut self, entries: impl IntoIterator<Item = (NodeId, NodeId)>) -> NodeId {
        let mut unique: Vec<(NodeId, NodeId)> = Vec::new();
        for (key, value) in entries {
            if let Some(slot) = unique.iter_mut().find(|(k, _)| self.same_value_zero(*k, key)) {
                slot.1 = value;
            } else {
                unique.push((key, value));
            }
        }
        self.alloc(Value::Map(unique))
    }

    /// Create a plain object; a duplicate key keeps the last value at the
    /// first key's position, like an object literal
    pub fn object<K: Into<String>>(
        &mut self,
        props: impl IntoIterator<Item = (K, NodeId)>,
    ) -> NodeId {
        let props: IndexMap<String, NodeId> =
            props.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.alloc(Value::Object(props))
    }

    // ----- typed accessors -----

    pub fn array_items(&self, id: NodeId) -> Option<&[NodeId]> {
        match self.value(id) {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn object_props(&self, id: NodeId) -> Option<&IndexMap<String, NodeId>> {
        match self.value(id) {
            Value::Object(props) => Some(props),
            _ => None,
        }
    }

    pub fn object_get(&self, id: NodeId, key: &str) -> Option<NodeId> {
        self.object_props(id)?.get(key).copied()
    }

    pub fn map_entries(&self, id: NodeId) -> Option<&[(NodeId, NodeId)]> {
        match self.value(id) {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a map value by key under SameValueZero
    pub fn map_get(&self, id: NodeId, key: NodeId) -> Option<NodeId> {
        self.map_entries(id)?
            .iter()
            .find(|(k, _)| self.same_value_zero(*k, key))
            .map(|(_, v)| *v)
    }

    pub fn set_members(&self, id: NodeId) -> Option<&[NodeId]> {
        match self.value(id) {
            Value::Set(members) => Some(members),
            _ => None,
        }
    }

    /// Membership test under SameValueZero
    pub fn set_has(&self, id: NodeId, member: NodeId) -> bool {
        self.set_members(id)
            .map(|members| members.iter().any(|&m| self.same_value_zero(m, member)))
            .unwrap_or(false)
    }

    /// SameValueZero: identity for object-typed nodes, value equality with
    /// NaN = NaN and -0 = 0 for primitives
    pub fn same_value_zero(&self, a: NodeId, b: NodeId) -> bool {
        a == b || self.value(a).same_primitive(self.value(b))
    }

    // ----- mutators -----

    fn expect_kind(&self, id: NodeId, expected: ValueKind) -> Result<()> {
        let found = self.kind(id);
        if found != expected {
            return Err(Error::KindMismatch { expected, found });
        }
        Ok(())
    }

    fn reject_frozen(&self, id: NodeId) -> Result<()> {
        if self.is_frozen(id) {
            return Err(Error::FrozenNode {
                kind: self.kind(id),
            });
        }
        Ok(())
    }

    /// Overwrite a date node's timestamp.
    ///
    /// Dates are never marked frozen (the freeze engine copies them fresh
    /// instead), so unlike the container mutators this never fails on
    /// freeze state — timestamp mutation bypasses property freezing.
    pub fn date_set(&mut self, id: NodeId, value: DateValue) -> Result<()> {
        self.expect_kind(id, ValueKind::Date)?;
        self.nodes[id.index()].value = Value::Date(value);
        Ok(())
    }

    /// Append an element to an array
    pub fn array_push(&mut self, array: NodeId, item: NodeId) -> Result<()> {
        self.expect_kind(array, ValueKind::Array)?;
        self.reject_frozen(array)?;
        self.push_raw(array, item);
        Ok(())
    }

    /// Replace an array element in place
    pub fn array_set(&mut self, array: NodeId, index: usize, item: NodeId) -> Result<()> {
        self.expect_kind(array, ValueKind::Array)?;
        self.reject_frozen(array)?;
        let len = self.array_items(array).map(|items| items.len()).unwrap_or(0);
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        self.replace_array_item(array, index, item);
        Ok(())
    }

    /// Set an own property on a plain object
    pub fn object_set(&mut self, object: NodeId, key: impl Into<String>, value: NodeId) -> Result<()> {
        self.expect_kind(object, ValueKind::PlainObject)?;
        self.reject_frozen(object)?;
        self.insert_prop_raw(object, key.into(), value);
        Ok(())
    }

    /// Delete an own property; returns whether the key was present
    pub fn object_delete(&mut self, object: NodeId, key: &str) -> Result<bool> {
        self.expect_kind(object, ValueKind::PlainObject)?;
        self.reject_frozen(object)?;
        match &mut self.nodes[object.index()].value {
            Value::Object(props) => Ok(props.shift_remove(key).is_some()),
            _ => unreachable!("kind checked above"),
        }
    }

    /// Insert or replace a map entry. On a frozen-contents map the key and
    /// value are deep-frozen before insertion.
    pub fn map_set(&mut self, map: NodeId, key: NodeId, value: NodeId) -> Result<()> {
        self.expect_kind(map, ValueKind::Map)?;
        let (key, value) = if self.freeze_state(map) == FreezeState::FrozenContents {
            (
                crate::engine::deep_freeze(self, key),
                crate::engine::deep_freeze(self, value),
            )
        } else {
            (key, value)
        };
        if let Some(index) = self
            .map_entries(map)
            .and_then(|entries| entries.iter().position(|(k, _)| self.same_value_zero(*k, key)))
        {
            self.replace_entry(map, index, key, value);
        } else {
            self.push_entry_raw(map, key, value);
        }
        Ok(())
    }

    /// Remove a map entry by key; returns whether the key was present.
    /// Allowed on frozen-contents maps: only the entries are immutable,
    /// not the container shape.
    pub fn map_delete(&mut self, map: NodeId, key: NodeId) -> Result<bool> {
        self.expect_kind(map, ValueKind::Map)?;
        let index = self
            .map_entries(map)
            .and_then(|entries| entries.iter().position(|(k, _)| self.same_value_zero(*k, key)));
        match index {
            Some(index) => {
                match &mut self.nodes[map.index()].value {
                    Value::Map(entries) => {
                        entries.remove(index);
                    }
                    _ => unreachable!("kind checked above"),
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Add a member to a set; returns whether the member was newly added.
    /// On a frozen-contents set the member is deep-frozen before insertion.
    pub fn set_add(&mut self, set: NodeId, member: NodeId) -> Result<bool> {
        self.expect_kind(set, ValueKind::Set)?;
        let member = if self.freeze_state(set) == FreezeState::FrozenContents {
            crate::engine::deep_freeze(self, member)
        } else {
            member
        };
        if self.set_has(set, member) {
            return Ok(false);
        }
        self.push_member_raw(set, member);
        Ok(true)
    }

    /// Remove a set member; returns whether it was present
    pub fn set_delete(&mut self, set: NodeId, member: NodeId) -> Result<bool> {
        self.expect_kind(set, ValueKind::Set)?;
        let index = self
            .set_members(set)
            .and_then(|members| members.iter().position(|&m| self.same_value_zero(m, member)));
        match index {
            Some(index) => {
                match &mut self.nodes[set.index()].value {
                    Value::Set(members) => {
                        members.remove(index);
                    }
                    _ => unreachable!("kind checked above"),
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // ----- raw mutation, engine-internal: no freeze checks, no hooks -----

    pub(crate) fn push_raw(&mut self, array: NodeId, item: NodeId) {
        match &mut self.nodes[array.index()].value {
            Value::Array(items) => items.push(item),
            _ => unreachable!("push_raw target must be an array"),
        }
    }

    pub(crate) fn replace_array_item(&mut self, array: NodeId, index: usize, item: NodeId) {
        match &mut self.nodes[array.index()].value {
            Value::Array(items) => items[index] = item,
            _ => unreachable!("replace_array_item target must be an array"),
        }
    }

    pub(crate) fn insert_prop_raw(&mut self, object: NodeId, key: String, value: NodeId) {
        match &mut self.nodes[object.index()].value {
            Value::Object(props) => {
                props.insert(key, value);
            }
            _ => unreachable!("insert_prop_raw target must be an object"),
        }
    }

    pub(crate) fn push_entry_raw(&mut self, map: NodeId, key: NodeId, value: NodeId) {
        match &mut self.nodes[map.index()].value {
            Value::Map(entries) => entries.push((key, value)),
            _ => unreachable!("push_entry_raw target must be a map"),
        }
    }

    pub(crate) fn replace_entry(&mut self, map: NodeId, index: usize, key: NodeId, value: NodeId) {
        match &mut self.nodes[map.index()].value {
            Value::Map(entries) => entries[index] = (key, value),
            _ => unreachable!("replace_entry target must be a map"),
        }
    }

    pub(crate) fn push_member_raw(&mut self, set: NodeId, member: NodeId) {
        match &mut self.nodes[set.index()].value {
            Value::Set(members) => members.push(member),
            _ => unreachable!("push_member_raw target must be a set"),
        }
    }

    pub(crate) fn replace_member(&mut self, set: NodeId, index: usize, member: NodeId) {
        match &mut self.nodes[set.index()].value {
            Value::Set(members) => members[index] = member,
            _ => unreachable!("replace_member target must be a set"),
        }
    }

    pub(crate) fn mark_frozen(&mut self, id: NodeId) {
        self.nodes[id.index()].freeze = FreezeState::Frozen;
    }

    pub(crate) fn mark_frozen_contents(&mut self, id: NodeId) {
        self.nodes[id.index()].freeze = FreezeState::FrozenContents;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_constructors_classify() {
        let mut g = ValueGraph::new();
        let n = g.number(1.5);
        let t = g.text("hi");
        let u = g.undefined();
        assert_eq!(g.kind(n), ValueKind::Primitive);
        assert_eq!(g.kind(t), ValueKind::Primitive);
        assert!(g.value(u).is_nullish());
    }

    #[test]
    fn test_same_value_zero_numbers() {
        let mut g = ValueGraph::new();
        let nan_a = g.number(f64::NAN);
        let nan_b = g.number(f64::NAN);
        let neg_zero = g.number(-0.0);
        let zero = g.number(0.0);
        assert!(g.same_value_zero(nan_a, nan_b));
        assert!(g.same_value_zero(neg_zero, zero));
    }

    #[test]
    fn test_same_value_zero_objects_by_identity() {
        let mut g = ValueGraph::new();
        let x1 = g.number(1.0);
        let a = g.object([("x", x1)]);
        let x2 = g.number(1.0);
        let b = g.object([("x", x2)]);
        assert!(!g.same_value_zero(a, b));
        assert!(g.same_value_zero(a, a));
    }

    #[test]
    fn test_symbols_distinct_even_with_same_description() {
        let mut g = ValueGraph::new();
        let a = g.symbol(Some("tag"));
        let b = g.symbol(Some("tag"));
        assert!(!g.same_value_zero(a, b));
    }

    #[test]
    fn test_set_constructor_dedups() {
        let mut g = ValueGraph::new();
        let one_a = g.number(1.0);
        let one_b = g.number(1.0);
        let two = g.number(2.0);
        let set = g.set([one_a, one_b, two]);
        assert_eq!(g.set_members(set).unwrap().len(), 2);
    }

    #[test]
    fn test_map_constructor_keeps_last_value_for_duplicate_key() {
        let mut g = ValueGraph::new();
        let key_a = g.text("k");
        let key_b = g.text("k");
        let v1 = g.number(1.0);
        let v2 = g.number(2.0);
        let map = g.map([(key_a, v1), (key_b, v2)]);
        assert_eq!(g.map_entries(map).unwrap().len(), 1);
        assert_eq!(g.map_get(map, key_a), Some(v2));
    }

    #[test]
    fn test_frozen_object_rejects_mutation() {
        let mut g = ValueGraph::new();
        let v = g.number(1.0);
        let obj = g.object([("a", v)]);
        g.mark_frozen(obj);
        let w = g.number(2.0);
        let err = g.object_set(obj, "b", w).unwrap_err();
        assert!(matches!(err, Error::FrozenNode { .. }));
        let err = g.object_delete(obj, "a").unwrap_err();
        assert!(matches!(err, Error::FrozenNode { .. }));
    }

    #[test]
    fn test_frozen_array_rejects_push_and_set() {
        let mut g = ValueGraph::new();
        let v = g.number(1.0);
        let arr = g.array([v]);
        g.mark_frozen(arr);
        let w = g.number(2.0);
        assert!(matches!(
            g.array_push(arr, w),
            Err(Error::FrozenNode { .. })
        ));
        assert!(matches!(g.array_set(arr, 0, w), Err(Error::FrozenNode { .. })));
    }

    #[test]
    fn test_array_set_out_of_bounds() {
        let mut g = ValueGraph::new();
        let v = g.number(1.0);
        let arr = g.array([v]);
        let err = g.array_set(arr, 3, v).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds { index: 3, len: 1 }));
    }

    #[test]
    fn test_kind_mismatch_on_wrong_target() {
        let mut g = ValueGraph::new();
        let n = g.number(1.0);
        let err = g.array_push(n, n).unwrap_err();
        assert!(matches!(err, Error::KindMismatch { .. }));
    }
}
