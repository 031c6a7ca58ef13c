//! The query AST.
//!
//! ASTs arrive fully decoded from an external codec. The same [`Value`] type
//! describes expressions (operators, control forms) and the data they run over
//! (cells, scripts, primitives), so evaluation results are `Value`s too.

mod call;
mod display;
mod value;
mod value_type;
mod wire;


pub use call::{Call, Root};
pub use value::{Node, PayloadTag, Value};
pub use value_type::{ALL_VALUE_TYPES, UnknownValueType, ValueType};
pub use wire::{ShapeError, WirePrimitive, WireValue};
