//! Node tags.
//!
//! Tag numbers are part of the wire format and are sparse: the gaps between
//! blocks are reserved for future kinds. Code that classifies tags must compare
//! against the named boundaries (see [`crate::classifier`]) instead of assuming
//! the enum is dense.

use crate::String;
use core::{fmt, str::FromStr};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use static_assertions::const_assert_eq;

/// Tag of a [`Value`](super::Value) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum ValueType {
    // Primitives
    Uint64 = 0,
    Nil = 1,
    Bool = 2,
    Bytes = 3,

    // Bindings
    Arg = 16,
    Param = 17,

    // Records
    OutPoint = 18,
    CellDep = 19,
    Script = 20,
    Cell = 21,
    Transaction = 22,

    // Functional combinators
    Apply = 23,
    Reduce = 24,

    // List producers
    List = 25,
    QueryCells = 26,
    Map = 27,
    Filter = 28,

    // Field projections
    GetCapacity = 48,
    GetData = 49,
    GetLock = 50,
    GetType = 51,
    GetDataHash = 52,
    GetOutPoint = 53,
    GetCodeHash = 54,
    GetHashType = 55,
    GetArgs = 56,

    // Operators
    Hash = 73,
    Not = 74,
    And = 75,
    Or = 76,
    Xor = 77,
    Equal = 78,
    Less = 79,
    Len = 80,
    Slice = 81,
    Index = 82,
    Plus = 83,
    Minus = 84,
}

// The classifier depends on these exact boundaries.
const_assert_eq!(ValueType::Bytes as i32, 3);
const_assert_eq!(ValueType::Arg as i32, 16);
const_assert_eq!(ValueType::Filter as i32, 28);
const_assert_eq!(ValueType::GetCapacity as i32, 48);
const_assert_eq!(ValueType::GetArgs as i32, 56);
const_assert_eq!(ValueType::Hash as i32, 73);
const_assert_eq!(ValueType::Minus as i32, 84);

/// Every tag, in wire order.
pub const ALL_VALUE_TYPES: [ValueType; 38] = [
    ValueType::Uint64,
    ValueType::Nil,
    ValueType::Bool,
    ValueType::Bytes,
    ValueType::Arg,
    ValueType::Param,
    ValueType::OutPoint,
    ValueType::CellDep,
    ValueType::Script,
    ValueType::Cell,
    ValueType::Transaction,
    ValueType::Apply,
    ValueType::Reduce,
    ValueType::List,
    ValueType::QueryCells,
    ValueType::Map,
    ValueType::Filter,
    ValueType::GetCapacity,
    ValueType::GetData,
    ValueType::GetLock,
    ValueType::GetType,
    ValueType::GetDataHash,
    ValueType::GetOutPoint,
    ValueType::GetCodeHash,
    ValueType::GetHashType,
    ValueType::GetArgs,
    ValueType::Hash,
    ValueType::Not,
    ValueType::And,
    ValueType::Or,
    ValueType::Xor,
    ValueType::Equal,
    ValueType::Less,
    ValueType::Len,
    ValueType::Slice,
    ValueType::Index,
    ValueType::Plus,
    ValueType::Minus,
];

/// A tag number or name that does not identify any [`ValueType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownValueType {
    #[error("unknown value type number {0}")]
    Number(i32),
    #[error("unknown value type name `{0}`")]
    Name(String),
}

impl ValueType {
    /// Wire number of this tag.
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Look up a tag by wire number.
    pub fn from_i32(number: i32) -> Option<ValueType> {
        ALL_VALUE_TYPES
            .binary_search_by_key(&number, |ty| ty.as_i32())
            .ok()
            .map(|idx| ALL_VALUE_TYPES[idx])
    }

    /// Upper-case wire name, e.g. `QUERY_CELLS`.
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Uint64 => "UINT64",
            ValueType::Nil => "NIL",
            ValueType::Bool => "BOOL",
            ValueType::Bytes => "BYTES",
            ValueType::Arg => "ARG",
            ValueType::Param => "PARAM",
            ValueType::OutPoint => "OUT_POINT",
            ValueType::CellDep => "CELL_DEP",
            ValueType::Script => "SCRIPT",
            ValueType::Cell => "CELL",
            ValueType::Transaction => "TRANSACTION",
            ValueType::Apply => "APPLY",
            ValueType::Reduce => "REDUCE",
            ValueType::List => "LIST",
            ValueType::QueryCells => "QUERY_CELLS",
            ValueType::Map => "MAP",
            ValueType::Filter => "FILTER",
            ValueType::GetCapacity => "GET_CAPACITY",
            ValueType::GetData => "GET_DATA",
            ValueType::GetLock => "GET_LOCK",
            ValueType::GetType => "GET_TYPE",
            ValueType::GetDataHash => "GET_DATA_HASH",
            ValueType::GetOutPoint => "GET_OUT_POINT",
            ValueType::GetCodeHash => "GET_CODE_HASH",
            ValueType::GetHashType => "GET_HASH_TYPE",
            ValueType::GetArgs => "GET_ARGS",
            ValueType::Hash => "HASH",
            ValueType::Not => "NOT",
            ValueType::And => "AND",
            ValueType::Or => "OR",
            ValueType::Xor => "XOR",
            ValueType::Equal => "EQUAL",
            ValueType::Less => "LESS",
            ValueType::Len => "LEN",
            ValueType::Slice => "SLICE",
            ValueType::Index => "INDEX",
            ValueType::Plus => "PLUS",
            ValueType::Minus => "MINUS",
        }
    }

    /// Tags whose node carries a scalar payload instead of children.
    pub const fn has_payload(self) -> bool {
        matches!(
            self,
            ValueType::Uint64
                | ValueType::Bool
                | ValueType::Bytes
                | ValueType::Arg
                | ValueType::Param
        )
    }

    /// Leaf tags: payload tags plus NIL.
    pub const fn is_leaf(self) -> bool {
        self.has_payload() || matches!(self, ValueType::Nil)
    }

    /// Fixed-arity blockchain records.
    pub const fn is_record(self) -> bool {
        let n = self.as_i32();
        n >= ValueType::OutPoint.as_i32() && n <= ValueType::Transaction.as_i32()
    }
}

impl TryFrom<i32> for ValueType {
    type Error = UnknownValueType;

    fn try_from(number: i32) -> Result<Self, Self::Error> {
        ValueType::from_i32(number).ok_or(UnknownValueType::Number(number))
    }
}

impl From<ValueType> for i32 {
    fn from(ty: ValueType) -> i32 {
        ty.as_i32()
    }
}

impl FromStr for ValueType {
    type Err = UnknownValueType;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ALL_VALUE_TYPES
            .iter()
            .copied()
            .find(|ty| ty.name() == name)
            .ok_or_else(|| UnknownValueType::Name(name.into()))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Text formats use the name, binary formats the wire number.
impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(self.name())
        } else {
            serializer.serialize_i32(self.as_i32())
        }
    }
}

impl<'de> Deserialize<'de> for ValueType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagVisitor;

        impl<'de> de::Visitor<'de> for TagVisitor {
            type Value = ValueType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a value type name or number")
            }

            fn visit_str<E: de::Error>(self, name: &str) -> Result<ValueType, E> {
                name.parse().map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, number: i64) -> Result<ValueType, E> {
                i32::try_from(number)
                    .ok()
                    .and_then(ValueType::from_i32)
                    .ok_or_else(|| E::custom(format_args!("unknown value type number {number}")))
            }

            fn visit_u64<E: de::Error>(self, number: u64) -> Result<ValueType, E> {
                i32::try_from(number)
                    .ok()
                    .and_then(ValueType::from_i32)
                    .ok_or_else(|| E::custom(format_args!("unknown value type number {number}")))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_any(TagVisitor)
        } else {
            deserializer.deserialize_i32(TagVisitor)
        }
    }
}
