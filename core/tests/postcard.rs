extern crate alloc;

use alloc::vec::Vec;
use animagus_core::ast::{Call, Root, Value, ValueType};
use postcard::{from_bytes, to_allocvec};
use std::ops::Deref;

fn op(tag: ValueType, operands: impl IntoIterator<Item = Value>) -> Value {
    Value::op(tag, operands).unwrap()
}

#[test]
fn test_postcard_leaves() {
    // Tags are zigzag varints, then the optional payload, then the children.
    let v = to_allocvec(&Value::Nil).unwrap();
    assert_eq!(&[2, 0, 0], v.deref());

    let v = to_allocvec(&Value::Bool(true)).unwrap();
    assert_eq!(&[4, 1, 0, 1, 0], v.deref());

    let v = to_allocvec(&Value::Uint64(300)).unwrap();
    assert_eq!(&[0, 1, 1, 0xac, 0x02, 0], v.deref());
    assert_eq!(from_bytes::<Value>(&v).unwrap(), Value::Uint64(300));

    let v = to_allocvec(&Value::Param(1)).unwrap();
    assert_eq!(&[34, 1, 1, 1, 0], v.deref());
}

#[test]
fn test_postcard_query_round_trip() {
    let capacity = op(ValueType::GetCapacity, [Value::Arg(0)]);
    let predicate = op(
        ValueType::And,
        [
            op(ValueType::Equal, [op(ValueType::GetArgs, [op(ValueType::GetLock, [Value::Arg(0)])]), Value::Param(0)]),
            op(ValueType::Less, [Value::Uint64(61), capacity.clone()]),
        ],
    );
    let root: Root = [
        Call::new(
            "balance",
            Value::reduce(
                op(ValueType::Plus, [Value::Arg(0), Value::Arg(1)]),
                Value::Uint64(0),
                Value::map(capacity, Value::query_cells(predicate)),
            ),
        ),
        Call::new("ready", Value::Bool(true)),
    ]
    .into_iter()
    .collect();

    let bytes: Vec<u8> = to_allocvec(&root).unwrap();
    let decoded: Root = from_bytes(&bytes).unwrap();
    assert_eq!(decoded, root);
}

#[test]
fn test_postcard_rejects_unknown_tag() {
    // 10 is the zigzag encoding of 5, which falls in the reserved gap.
    assert!(from_bytes::<Value>(&[10, 0, 0]).is_err());
}

#[test]
fn test_postcard_rejects_payload_on_compound_tag() {
    // PLUS (83, zigzag 166 = 0xa6 0x01) with a u64 payload.
    assert!(from_bytes::<Value>(&[0xa6, 0x01, 1, 1, 5, 0]).is_err());
}
