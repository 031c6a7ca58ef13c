//! AST nodes, which double as runtime results.

use super::{ValueType, wire::WireValue};
use crate::Vec;
use serde::{Deserialize, Serialize};

/// A node of the query AST, and the result type of evaluation.
///
/// Leaves carry their payload in the variant itself, so a payload can never be
/// paired with a tag that does not own one. Everything else is a [`Node`]: a
/// tag plus an ordered list of children, used either as record fields
/// (`CELL = [capacity, lock, type, data]`) or as operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireValue", into = "WireValue")]
pub enum Value {
    Uint64(u64),
    Nil,
    Bool(bool),
    Bytes(Vec<u8>),
    /// Positional argument reference, bound by APPLY/REDUCE/MAP.
    Arg(u64),
    /// Caller-supplied parameter reference, or an unbound parameter placeholder
    /// when returned by a host.
    Param(u64),
    Node(Node),
}

/// Compound node: a tag that owns no payload, plus its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    tag: ValueType,
    children: Vec<Value>,
}

/// Attempt to build a node whose tag requires a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} carries a primitive payload and cannot be built as a compound node")]
pub struct PayloadTag(pub ValueType);

impl Node {
    pub fn new(tag: ValueType, children: Vec<Value>) -> Result<Node, PayloadTag> {
        if tag.is_leaf() {
            return Err(PayloadTag(tag));
        }
        Ok(Node { tag, children })
    }

    /// Callers guarantee `tag` is not a leaf tag.
    pub(crate) fn from_parts(tag: ValueType, children: Vec<Value>) -> Node {
        debug_assert!(!tag.is_leaf(), "{tag} is a leaf tag");
        Node { tag, children }
    }

    pub fn tag(&self) -> ValueType {
        self.tag
    }

    pub fn children(&self) -> &[Value] {
        &self.children
    }

    pub fn into_children(self) -> Vec<Value> {
        self.children
    }
}

impl Value {
    pub fn tag(&self) -> ValueType {
        match self {
            Value::Uint64(_) => ValueType::Uint64,
            Value::Nil => ValueType::Nil,
            Value::Bool(_) => ValueType::Bool,
            Value::Bytes(_) => ValueType::Bytes,
            Value::Arg(_) => ValueType::Arg,
            Value::Param(_) => ValueType::Param,
            Value::Node(node) => node.tag,
        }
    }

    /// Children of a compound node; empty for leaves.
    pub fn children(&self) -> &[Value] {
        match self {
            Value::Node(node) => &node.children,
            _ => &[],
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Uint64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Value {
        Value::Bytes(bytes.into())
    }

    /// Generic compound constructor.
    pub fn node(tag: ValueType, children: Vec<Value>) -> Result<Value, PayloadTag> {
        Node::new(tag, children).map(Value::Node)
    }

    // ------------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------------

    pub fn cell(capacity: Value, lock: Value, type_: Value, data: Value) -> Value {
        Value::Node(Node::from_parts(
            ValueType::Cell,
            crate::vec![capacity, lock, type_, data],
        ))
    }

    pub fn script(code_hash: Value, hash_type: Value, args: Value) -> Value {
        Value::Node(Node::from_parts(
            ValueType::Script,
            crate::vec![code_hash, hash_type, args],
        ))
    }

    pub fn out_point(tx_hash: Value, index: Value) -> Value {
        Value::Node(Node::from_parts(
            ValueType::OutPoint,
            crate::vec![tx_hash, index],
        ))
    }

    pub fn cell_dep(out_point: Value, dep_type: Value) -> Value {
        Value::Node(Node::from_parts(
            ValueType::CellDep,
            crate::vec![out_point, dep_type],
        ))
    }

    pub fn transaction(fields: Vec<Value>) -> Value {
        Value::Node(Node::from_parts(ValueType::Transaction, fields))
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    /// `APPLY(body, args...)`
    pub fn apply(body: Value, args: impl IntoIterator<Item = Value>) -> Value {
        let mut children = crate::vec![body];
        children.extend(args);
        Value::Node(Node::from_parts(ValueType::Apply, children))
    }

    /// `REDUCE(body, init, list)`
    pub fn reduce(body: Value, init: Value, list: Value) -> Value {
        Value::Node(Node::from_parts(
            ValueType::Reduce,
            crate::vec![body, init, list],
        ))
    }

    /// `MAP(body, list)`
    pub fn map(body: Value, list: Value) -> Value {
        Value::Node(Node::from_parts(ValueType::Map, crate::vec![body, list]))
    }

    /// `FILTER(predicate, list)`
    pub fn filter(predicate: Value, list: Value) -> Value {
        Value::Node(Node::from_parts(
            ValueType::Filter,
            crate::vec![predicate, list],
        ))
    }

    /// `LIST(elements...)`
    pub fn list(elements: impl IntoIterator<Item = Value>) -> Value {
        Value::Node(Node::from_parts(
            ValueType::List,
            elements.into_iter().collect(),
        ))
    }

    /// `QUERY_CELLS(predicate)`
    pub fn query_cells(predicate: Value) -> Value {
        Value::Node(Node::from_parts(
            ValueType::QueryCells,
            crate::vec![predicate],
        ))
    }

    /// `QUERY_CELLS()`: every cell the host knows about.
    pub fn query_all_cells() -> Value {
        Value::Node(Node::from_parts(ValueType::QueryCells, Vec::new()))
    }

    /// `GET_*(record)`. Fails if `field` owns a payload.
    pub fn get(field: ValueType, record: Value) -> Result<Value, PayloadTag> {
        Value::node(field, crate::vec![record])
    }

    /// Operator or field projection node, e.g. `Value::op(ValueType::Plus, [a, b])`.
    pub fn op(tag: ValueType, operands: impl IntoIterator<Item = Value>) -> Result<Value, PayloadTag> {
        Value::node(tag, operands.into_iter().collect())
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Value {
        Value::Node(node)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Value {
        Value::Uint64(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}
