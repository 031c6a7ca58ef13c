//! Field projection over CELL and SCRIPT records.

use super::{ExecutionError, Position, operators::sha256};
use crate::ast::{Value, ValueType};

/// Record kind, arity and field position read by a `GET_*` tag.
fn field(tag: ValueType) -> Option<(ValueType, usize, usize)> {
    let field = match tag {
        ValueType::GetCapacity => (ValueType::Cell, 4, 0),
        ValueType::GetLock => (ValueType::Cell, 4, 1),
        ValueType::GetType => (ValueType::Cell, 4, 2),
        ValueType::GetData | ValueType::GetDataHash => (ValueType::Cell, 4, 3),
        ValueType::GetCodeHash => (ValueType::Script, 3, 0),
        ValueType::GetHashType => (ValueType::Script, 3, 1),
        ValueType::GetArgs => (ValueType::Script, 3, 2),
        _ => return None,
    };
    Some(field)
}

/// Project the field selected by `tag` out of an evaluated operand.
///
/// `NIL` propagates through every projection. Otherwise the record kind and
/// arity are checked before the child is read.
pub(super) fn project(tag: ValueType, operand: Value) -> Result<Value, ExecutionError> {
    if operand.is_nil() {
        return Ok(Value::Nil);
    }

    let Some((kind, arity, position)) = field(tag) else {
        return Err(ExecutionError::UnsupportedNode {
            tag,
            position: Position::Value,
        });
    };

    let Value::Node(node) = operand else {
        return Err(ExecutionError::type_mismatch(tag, kind, operand.tag()));
    };
    if node.tag() != kind {
        return Err(ExecutionError::type_mismatch(tag, kind, node.tag()));
    }
    if node.children().len() != arity {
        return Err(ExecutionError::exactly(tag, arity, node.children().len()));
    }

    let child = node.into_children().swap_remove(position);
    if tag != ValueType::GetDataHash {
        return Ok(child);
    }
    match child {
        Value::Nil => Ok(Value::Nil),
        Value::Bytes(data) => Ok(Value::Bytes(sha256(&data))),
        other => Err(ExecutionError::type_mismatch(tag, ValueType::Bytes, other.tag())),
    }
}
