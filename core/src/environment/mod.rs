//! Host capability interface.
//!
//! The evaluator never resolves arguments, parameters or cells on its own; it
//! asks an [`Environment`] supplied by the host. Closures are expressed by
//! wrapping an environment in a [`PrependEnvironment`], which shadows only the
//! argument list.

mod memory;
mod prepend;

#[cfg(test)]
mod memory_test;

pub use memory::{BindingError, MemoryEnvironment, MemoryEnvironmentBuilder, QueryError};
pub use prepend::PrependEnvironment;

use crate::{Box, Vec, ast::Value};

/// Error produced by a host. Passed through the evaluator untouched.
pub type HostError = Box<dyn core::error::Error + Send + Sync>;

/// Capabilities the evaluator needs from its host.
pub trait Environment {
    /// Positional argument `index` of the innermost binding form.
    fn arg(&self, index: usize) -> Option<Value>;

    /// Caller-supplied parameter `index`.
    ///
    /// Hosts that solve for parameters return a `Value::Param(index)`
    /// placeholder while the parameter is still unbound.
    fn param(&self, index: usize) -> Option<Value>;

    /// Record or check that parameter `index` must equal `value`.
    fn index_param(&self, index: usize, value: &Value) -> Result<(), HostError>;

    /// Resolve a `QUERY_CELLS` node to an ordered list of cells.
    fn query_cell(&self, query: &Value) -> Result<Vec<Value>, HostError>;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn arg(&self, index: usize) -> Option<Value> {
        (**self).arg(index)
    }

    fn param(&self, index: usize) -> Option<Value> {
        (**self).param(index)
    }

    fn index_param(&self, index: usize, value: &Value) -> Result<(), HostError> {
        (**self).index_param(index, value)
    }

    fn query_cell(&self, query: &Value) -> Result<Vec<Value>, HostError> {
        (**self).query_cell(query)
    }
}
