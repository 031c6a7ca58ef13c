#![allow(dead_code)]

use animagus::{MemoryEnvironment, Root, Value};

/// The lock every test cell is guarded by, apart from its args.
pub const CODE_HASH: [u8; 32] = [0x9b; 32];

pub fn cell(capacity: u64, owner: u8) -> Value {
    Value::cell(
        Value::Uint64(capacity),
        Value::script(Value::bytes(CODE_HASH), Value::Bool(true), Value::bytes([owner])),
        Value::Nil,
        Value::bytes([owner, 0xff]),
    )
}

/// Cells owned by 1, 2 and 1 again.
pub fn ledger() -> MemoryEnvironment {
    MemoryEnvironment::builder()
        .unbound_param()
        .cells([cell(100, 1), cell(200, 2), cell(300, 1)])
        .build()
}

pub fn parse_root(json: &str) -> Root {
    serde_json::from_str(json).expect("fixture root")
}
