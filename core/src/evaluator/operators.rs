//! Operator implementations.
//!
//! Operators receive operands that were already evaluated left to right.
//! Unsigned arithmetic wraps instead of panicking on overflow.

use super::ExecutionError;
use crate::{
    Vec,
    ast::{Value, ValueType},
    environment::Environment,
};
use sha2::{Digest, Sha256};

/// Combine already-evaluated operands for operator `tag`.
pub(super) fn evaluate(
    tag: ValueType,
    operands: Vec<Value>,
    env: &dyn Environment,
) -> Result<Value, ExecutionError> {
    match tag {
        ValueType::Equal => equal(operands, env),
        ValueType::Plus => {
            let [x, y] = uint64_operands(tag, &operands)?;
            Ok(Value::Uint64(x.wrapping_add(y)))
        }
        ValueType::Minus => {
            let [x, y] = uint64_operands(tag, &operands)?;
            Ok(Value::Uint64(x.wrapping_sub(y)))
        }
        ValueType::Less => {
            let [x, y] = uint64_operands(tag, &operands)?;
            Ok(Value::Bool(x < y))
        }
        ValueType::And => fold_bool(tag, &operands, false),
        ValueType::Or => fold_bool(tag, &operands, true),
        ValueType::Not => {
            let [b] = exact::<1>(tag, &operands)?;
            Ok(Value::Bool(!expect_bool(tag, b)?))
        }
        ValueType::Xor => {
            let [x, y] = exact::<2>(tag, &operands)?;
            Ok(Value::Bool(expect_bool(tag, x)? ^ expect_bool(tag, y)?))
        }
        ValueType::Hash => {
            let [data] = exact::<1>(tag, &operands)?;
            Ok(Value::Bytes(sha256(expect_bytes(tag, data)?)))
        }
        ValueType::Len => {
            let [x] = exact::<1>(tag, &operands)?;
            let len = match x {
                Value::Bytes(bytes) => bytes.len(),
                Value::Node(node) if node.tag().is_record() => node.children().len(),
                other => return Err(ExecutionError::type_mismatch(tag, ValueType::Bytes, other.tag())),
            };
            Ok(Value::Uint64(len as u64))
        }
        ValueType::Index => index(tag, operands),
        ValueType::Slice => slice(tag, operands),
        _ => Err(ExecutionError::UnsupportedNode {
            tag,
            position: super::Position::Value,
        }),
    }
}

/// `EQUAL` either binds a parameter or compares structurally.
///
/// When exactly one side is an unbound `PARAM` and the other is not `NIL`, the
/// host is asked to bind the parameter to the other side, and success yields
/// `true`. Otherwise the two values are compared by tag, payload and children.
fn equal(operands: Vec<Value>, env: &dyn Environment) -> Result<Value, ExecutionError> {
    let [x, y] = exact::<2>(ValueType::Equal, &operands)?;
    let binding = match (x, y) {
        (Value::Param(_), Value::Param(_)) => None,
        (Value::Param(index), other) | (other, Value::Param(index)) if !other.is_nil() => {
            Some((*index, other))
        }
        _ => None,
    };

    match binding {
        Some((index, value)) => {
            tracing::debug!(index, %value, "EQUAL binds parameter");
            let index = usize::try_from(index).map_err(|_| ExecutionError::Lookup {
                kind: super::BindingKind::Param,
                index,
            })?;
            env.index_param(index, value).map_err(ExecutionError::from_host)?;
            Ok(Value::Bool(true))
        }
        None => Ok(Value::Bool(x == y)),
    }
}

/// `AND` stops at the first `false`, `OR` at the first `true`.
fn fold_bool(tag: ValueType, operands: &[Value], stop_on: bool) -> Result<Value, ExecutionError> {
    if operands.is_empty() {
        return Err(ExecutionError::at_least(tag, 1, 0));
    }
    for operand in operands {
        if expect_bool(tag, operand)? == stop_on {
            return Ok(Value::Bool(stop_on));
        }
    }
    Ok(Value::Bool(!stop_on))
}

fn index(tag: ValueType, operands: Vec<Value>) -> Result<Value, ExecutionError> {
    let [target, position] = exact::<2>(tag, &operands)?;
    let position = expect_u64(tag, position)?;
    let out_of_range = |len| ExecutionError::OutOfRange {
        tag,
        index: position,
        len,
    };
    let at = usize::try_from(position).ok();
    match target {
        Value::Bytes(bytes) => at
            .and_then(|i| bytes.get(i))
            .map(|byte| Value::Uint64(u64::from(*byte)))
            .ok_or_else(|| out_of_range(bytes.len())),
        Value::Node(node) if node.tag().is_record() => at
            .and_then(|i| node.children().get(i))
            .cloned()
            .ok_or_else(|| out_of_range(node.children().len())),
        other => Err(ExecutionError::type_mismatch(tag, ValueType::Bytes, other.tag())),
    }
}

fn slice(tag: ValueType, operands: Vec<Value>) -> Result<Value, ExecutionError> {
    let [data, start, end] = exact::<3>(tag, &operands)?;
    let bytes = expect_bytes(tag, data)?;
    let start = expect_u64(tag, start)?;
    let end = expect_u64(tag, end)?;

    let len = bytes.len();
    let bound = |n: u64| {
        usize::try_from(n)
            .ok()
            .filter(|n| *n <= len)
            .ok_or(ExecutionError::OutOfRange { tag, index: n, len })
    };
    let (from, to) = (bound(start)?, bound(end)?);
    if from > to {
        return Err(ExecutionError::OutOfRange {
            tag,
            index: start,
            len: to,
        });
    }
    Ok(Value::Bytes(bytes[from..to].to_vec()))
}

pub(super) fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

fn exact<const N: usize>(tag: ValueType, operands: &[Value]) -> Result<&[Value; N], ExecutionError> {
    operands
        .try_into()
        .map_err(|_| ExecutionError::exactly(tag, N, operands.len()))
}

fn uint64_operands(tag: ValueType, operands: &[Value]) -> Result<[u64; 2], ExecutionError> {
    let [x, y] = exact::<2>(tag, operands)?;
    Ok([expect_u64(tag, x)?, expect_u64(tag, y)?])
}

fn expect_u64(tag: ValueType, value: &Value) -> Result<u64, ExecutionError> {
    value
        .as_u64()
        .ok_or_else(|| ExecutionError::type_mismatch(tag, ValueType::Uint64, value.tag()))
}

fn expect_bool(tag: ValueType, value: &Value) -> Result<bool, ExecutionError> {
    value
        .as_bool()
        .ok_or_else(|| ExecutionError::type_mismatch(tag, ValueType::Bool, value.tag()))
}

fn expect_bytes(tag: ValueType, value: &Value) -> Result<&[u8], ExecutionError> {
    value
        .as_bytes()
        .ok_or_else(|| ExecutionError::type_mismatch(tag, ValueType::Bytes, value.tag()))
}
