//! Tree-walking evaluator for query ASTs.
//!
//! The evaluator borrows a [`Value`] tree and an [`Environment`] and produces a
//! freshly owned result. Nodes are dispatched by tag class (see
//! [`crate::classifier`]):
//!
//! - **Primitives** evaluate to themselves.
//! - **Operators** evaluate every child left to right, then combine.
//! - **Structural gets** evaluate one child, then project a record field.
//! - **Control forms** (ARG, PARAM, APPLY, REDUCE) have their own order.
//!
//! List producers (LIST, QUERY_CELLS, MAP, FILTER) are only resolved where a
//! list is expected: REDUCE's third operand and the list operand of MAP and
//! FILTER.
//!
//! ## Design Principles
//!
//! - **Never panic**: malformed trees are reported as [`ExecutionError`]s
//! - **Bounded recursion**: nesting deeper than `max_depth` is an error, and the
//!   default limit fits a 2 MB thread stack
//! - **Dynamic checks only**: there is no type inference; shapes are checked as nodes are reached
//!
//! ## Example
//!
//! ```
//! use animagus_core::ast::{Value, ValueType};
//! use animagus_core::environment::MemoryEnvironment;
//! use animagus_core::evaluator;
//!
//! let env = MemoryEnvironment::builder().build();
//! let sum = Value::op(ValueType::Plus, [Value::Uint64(5), Value::Uint64(7)]).unwrap();
//! assert_eq!(evaluator::execute(&sum, &env).unwrap(), Value::Uint64(12));
//! ```

mod accessors;
mod error;
mod eval;
mod list;
mod operators;


pub use error::{Arity, BindingKind, ErrorKind, ExecutionError, Position, ResourceExceeded};
pub use eval::Evaluator;

use crate::{api::ExecutionOptions, ast::Value, environment::Environment};

/// Evaluate `expr` against `env` with default limits.
///
/// Uses the default depth limit of 256 and no iteration limit.
pub fn execute(expr: &Value, env: &dyn Environment) -> Result<Value, ExecutionError> {
    execute_with_options(expr, env, &ExecutionOptions::default())
}

/// Evaluate `expr` against `env` with custom limits.
///
/// ## Example
///
/// ```
/// use animagus_core::api::ExecutionOptions;
/// use animagus_core::ast::Value;
/// use animagus_core::environment::MemoryEnvironment;
/// use animagus_core::evaluator::execute_with_options;
///
/// let env = MemoryEnvironment::builder().build();
/// let options = ExecutionOptions { max_depth: 8, ..Default::default() };
/// let result = execute_with_options(&Value::Bool(true), &env, &options);
/// assert_eq!(result.unwrap(), Value::Bool(true));
/// ```
pub fn execute_with_options(
    expr: &Value,
    env: &dyn Environment,
    options: &ExecutionOptions,
) -> Result<Value, ExecutionError> {
    Evaluator::new(options.clone()).eval(expr, env)
}
