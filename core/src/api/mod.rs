//! Host-facing entry points.
//!
//! A host decodes a [`Root`](crate::ast::Root), supplies an
//! [`Environment`](crate::environment::Environment) and evaluates every call:
//!
//! ```
//! use animagus_core::api::{ExecutionOptions, run_root};
//! use animagus_core::ast::{Call, Root, Value, ValueType};
//! use animagus_core::environment::MemoryEnvironment;
//!
//! let env = MemoryEnvironment::builder()
//!     .cell(Value::cell(Value::Uint64(61), Value::Nil, Value::Nil, Value::Nil))
//!     .build();
//! let capacities = Value::map(
//!     Value::get(ValueType::GetCapacity, Value::Arg(0)).unwrap(),
//!     Value::query_all_cells(),
//! );
//! let sum = Value::op(ValueType::Plus, [Value::Arg(0), Value::Arg(1)]).unwrap();
//! let root: Root = [Call::new("total", Value::reduce(sum, Value::Uint64(0), capacities))]
//!     .into_iter()
//!     .collect();
//!
//! let results = run_root(&root, &env, &ExecutionOptions::default());
//! assert_eq!(results[0].name, "total");
//! assert_eq!(results[0].result.as_ref().unwrap(), &Value::Uint64(61));
//! ```

mod options;
mod run;

pub use options::ExecutionOptions;
pub use run::{CallResult, run_root};
