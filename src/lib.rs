//! Animagus - an evaluator for blockchain query ASTs
//!
//! # Overview
//!
//! A query is a tree of [`Value`] nodes: primitives, field projections,
//! operators and a handful of control forms (APPLY, REDUCE, MAP, FILTER). The
//! host answers argument, parameter and cell lookups through an
//! [`Environment`], and evaluation produces a [`Value`] or a typed
//! [`ExecutionError`].
//!
//! # Quick Start
//!
//! ```
//! use animagus::{MemoryEnvironment, Value, ValueType, execute};
//!
//! let env = MemoryEnvironment::builder()
//!     .cell(Value::cell(Value::Uint64(100), Value::Nil, Value::Nil, Value::Nil))
//!     .cell(Value::cell(Value::Uint64(250), Value::Nil, Value::Nil, Value::Nil))
//!     .build();
//!
//! // REDUCE(PLUS(ARG(0), ARG(1)), 0, MAP(GET_CAPACITY(ARG(0)), QUERY_CELLS()))
//! let capacities = Value::map(
//!     Value::get(ValueType::GetCapacity, Value::Arg(0)).unwrap(),
//!     Value::query_all_cells(),
//! );
//! let plus = Value::op(ValueType::Plus, [Value::Arg(0), Value::Arg(1)]).unwrap();
//! let total = Value::reduce(plus, Value::Uint64(0), capacities);
//!
//! assert_eq!(execute(&total, &env).unwrap(), Value::Uint64(350));
//! ```
//!
//! # Errors
//!
//! Every [`ExecutionError`] has an [`ErrorKind`]. Errors returned by the host
//! are passed through untouched and can be recovered with
//! [`ExecutionError::host_error`]. Use [`render_error_to_string`] to show a
//! failure with its full cause chain.

// Re-export public API from animagus_core
pub use animagus_core::api::{self, CallResult, ExecutionOptions, run_root};
pub use animagus_core::ast::{self, Call, Root, Value, ValueType};
pub use animagus_core::classifier;
pub use animagus_core::environment::{
    self, Environment, HostError, MemoryEnvironment, PrependEnvironment,
};

// Re-export errors and the evaluator
pub use animagus_core::evaluator::{
    self, ErrorKind, Evaluator, ExecutionError, execute, execute_with_options,
};

mod error_renderer;
pub use error_renderer::{
    ErrorReport, render_error, render_error_to, render_error_to_string,
    render_error_to_string_no_color,
};
