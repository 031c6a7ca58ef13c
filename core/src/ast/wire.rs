//! Message shape used by the external codec.
//!
//! A wire value is a tag, at most one primitive payload and a list of
//! children. Decoding validates the combination before a [`Value`] is built.

use super::{Node, Value, ValueType};
use crate::Vec;
use serde::{Deserialize, Serialize};

/// Every field is always serialized so positional formats such as postcard
/// stay decodable; readers of self-describing formats may omit the optional
/// ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireValue {
    pub t: ValueType,
    #[serde(default)]
    pub primitive: Option<WirePrimitive>,
    #[serde(default)]
    pub children: Vec<WireValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WirePrimitive {
    B(bool),
    U(u64),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("{tag} requires a {expected} payload")]
    MissingPayload { tag: ValueType, expected: &'static str },
    #[error("{tag} cannot carry this primitive payload")]
    UnexpectedPayload { tag: ValueType },
    #[error("{tag} is a leaf and cannot have {count} children")]
    LeafWithChildren { tag: ValueType, count: usize },
}

impl TryFrom<WireValue> for Value {
    type Error = ShapeError;

    fn try_from(wire: WireValue) -> Result<Value, ShapeError> {
        let WireValue {
            t,
            primitive,
            children,
        } = wire;

        if t.is_leaf() && !children.is_empty() {
            return Err(ShapeError::LeafWithChildren {
                tag: t,
                count: children.len(),
            });
        }

        let missing = |expected| ShapeError::MissingPayload { tag: t, expected };
        match (t, primitive) {
            (ValueType::Uint64, Some(WirePrimitive::U(n))) => Ok(Value::Uint64(n)),
            (ValueType::Uint64, None) => Err(missing("u")),
            (ValueType::Bool, Some(WirePrimitive::B(b))) => Ok(Value::Bool(b)),
            (ValueType::Bool, None) => Err(missing("b")),
            (ValueType::Bytes, Some(WirePrimitive::Raw(raw))) => Ok(Value::Bytes(raw)),
            (ValueType::Bytes, None) => Err(missing("raw")),
            (ValueType::Arg, Some(WirePrimitive::U(i))) => Ok(Value::Arg(i)),
            (ValueType::Arg, None) => Err(missing("u")),
            (ValueType::Param, Some(WirePrimitive::U(i))) => Ok(Value::Param(i)),
            (ValueType::Param, None) => Err(missing("u")),
            (ValueType::Nil, None) => Ok(Value::Nil),
            (tag, None) => {
                let children = children
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Node(Node::from_parts(tag, children)))
            }
            (tag, Some(_)) => Err(ShapeError::UnexpectedPayload { tag }),
        }
    }
}

impl From<Value> for WireValue {
    fn from(value: Value) -> WireValue {
        let t = value.tag();
        let leaf = |primitive| WireValue {
            t,
            primitive,
            children: Vec::new(),
        };
        match value {
            Value::Uint64(n) | Value::Arg(n) | Value::Param(n) => leaf(Some(WirePrimitive::U(n))),
            Value::Bool(b) => leaf(Some(WirePrimitive::B(b))),
            Value::Bytes(raw) => leaf(Some(WirePrimitive::Raw(raw))),
            Value::Nil => leaf(None),
            Value::Node(node) => WireValue {
                t,
                primitive: None,
                children: node.into_children().into_iter().map(WireValue::from).collect(),
            },
        }
    }
}
