//! In-memory reference host.
//!
//! Holds a fixed argument list, a parameter table and a cell set. Queries are
//! answered by running the query's predicate against every cell, and
//! parameter bindings are solved on the fly: an unbound parameter compared
//! with `EQUAL` takes the value it was compared against.
//!
//! Predicates may contain queries of their own, and each predicate runs in a
//! fresh [`Evaluator`]. Nested predicates still share one `max_depth` budget:
//! the outermost predicate's height bounds the whole chain, and a predicate
//! that would go past the limit fails with
//! [`ResourceExceeded`](crate::evaluator::ResourceExceeded).

use super::{Environment, HostError, PrependEnvironment};
use crate::{
    Vec,
    api::ExecutionOptions,
    ast::{Value, ValueType},
    evaluator::{Evaluator, ExecutionError},
    vec,
};
use core::cell::{Cell, RefCell};
use hashbrown::HashMap;

/// Parameter binding failures reported by [`MemoryEnvironment::index_param`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("parameter {index} is not declared (only {declared} parameters)")]
    UnknownParam { index: usize, declared: usize },

    #[error("parameter {index} is already {bound}, cannot bind it to {requested}")]
    Conflict {
        index: usize,
        bound: Value,
        requested: Value,
    },
}

/// Cell query failures reported by [`MemoryEnvironment::query_cell`].
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("QUERY_CELLS takes at most one predicate, got {children}")]
    MalformedQuery { children: usize },

    #[error("cell predicate must produce BOOL, got {found}")]
    NonBoolPredicate { found: ValueType },

    #[error("cell predicate failed on cell {cell}")]
    Predicate {
        cell: usize,
        #[source]
        source: ExecutionError,
    },
}

#[derive(Debug, Clone)]
enum ParamSlot {
    Supplied(Value),
    Unbound,
}

/// An [`Environment`] backed by in-memory data.
///
/// Uses interior mutability for parameter bindings, so one instance must not
/// be shared between concurrent evaluations.
#[derive(Debug)]
pub struct MemoryEnvironment {
    args: Vec<Value>,
    params: Vec<ParamSlot>,
    cells: Vec<Value>,
    bindings: RefCell<HashMap<usize, Value>>,
    options: ExecutionOptions,
    /// Height of the outermost predicate being evaluated, 0 outside queries.
    query_depth: Cell<usize>,
}

/// Builder for [`MemoryEnvironment`].
#[derive(Debug, Default)]
pub struct MemoryEnvironmentBuilder {
    args: Vec<Value>,
    params: Vec<ParamSlot>,
    cells: Vec<Value>,
    options: ExecutionOptions,
}

impl MemoryEnvironmentBuilder {
    pub fn arg(mut self, value: Value) -> Self {
        self.args.push(value);
        self
    }

    pub fn args(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.args.extend(values);
        self
    }

    /// Declare the next parameter with a caller-supplied value.
    pub fn param(mut self, value: Value) -> Self {
        self.params.push(ParamSlot::Supplied(value));
        self
    }

    /// Declare the next parameter without a value; it is solved by `EQUAL`.
    pub fn unbound_param(mut self) -> Self {
        self.params.push(ParamSlot::Unbound);
        self
    }

    /// Declare the next parameter, supplied when `value` is `Some`.
    pub fn param_slot(self, value: Option<Value>) -> Self {
        match value {
            Some(value) => self.param(value),
            None => self.unbound_param(),
        }
    }

    pub fn cell(mut self, cell: Value) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn cells(mut self, cells: impl IntoIterator<Item = Value>) -> Self {
        self.cells.extend(cells);
        self
    }

    /// Options used when evaluating query predicates.
    pub fn options(mut self, options: ExecutionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> MemoryEnvironment {
        MemoryEnvironment {
            args: self.args,
            params: self.params,
            cells: self.cells,
            bindings: RefCell::new(HashMap::new()),
            options: self.options,
            query_depth: Cell::new(0),
        }
    }
}

impl MemoryEnvironment {
    pub fn builder() -> MemoryEnvironmentBuilder {
        MemoryEnvironmentBuilder::default()
    }

    pub fn cells(&self) -> &[Value] {
        &self.cells
    }

    /// Parameter values recorded through `index_param`, sorted by index.
    pub fn bindings(&self) -> Vec<(usize, Value)> {
        let mut bindings: Vec<_> = self
            .bindings
            .borrow()
            .iter()
            .map(|(index, value)| (*index, value.clone()))
            .collect();
        bindings.sort_by_key(|(index, _)| *index);
        bindings
    }

    /// Forget every recorded binding.
    pub fn reset_bindings(&self) {
        self.bindings.borrow_mut().clear();
    }

    fn filter_cells(
        &self,
        predicate: &Value,
        options: &ExecutionOptions,
    ) -> Result<Vec<Value>, HostError> {
        let mut found = Vec::new();
        for (position, cell) in self.cells.iter().enumerate() {
            // Bindings made while testing one cell must not leak into the next.
            let snapshot = self.bindings.borrow().clone();
            let keep = self.matches(position, predicate, cell, options);
            *self.bindings.borrow_mut() = snapshot;

            if keep? {
                found.push(cell.clone());
            }
        }
        Ok(found)
    }

    fn matches(
        &self,
        position: usize,
        predicate: &Value,
        cell: &Value,
        options: &ExecutionOptions,
    ) -> Result<bool, HostError> {
        let scope = PrependEnvironment::new(self, [cell.clone()]);
        let result = Evaluator::new(options.clone())
            .eval(predicate, &scope)
            .map_err(|source| -> HostError {
                match source {
                    // Keep the limit visible to every enclosing evaluation.
                    ExecutionError::ResourceExceeded(limit) => limit.into(),
                    source => QueryError::Predicate {
                        cell: position,
                        source,
                    }
                    .into(),
                }
            })?;
        match result {
            Value::Bool(keep) => Ok(keep),
            other => Err(QueryError::NonBoolPredicate { found: other.tag() }.into()),
        }
    }
}

impl Environment for MemoryEnvironment {
    fn arg(&self, index: usize) -> Option<Value> {
        self.args.get(index).cloned()
    }

    fn param(&self, index: usize) -> Option<Value> {
        match self.params.get(index)? {
            ParamSlot::Supplied(value) => Some(value.clone()),
            ParamSlot::Unbound => Some(
                self.bindings
                    .borrow()
                    .get(&index)
                    .cloned()
                    .unwrap_or(Value::Param(index as u64)),
            ),
        }
    }

    fn index_param(&self, index: usize, value: &Value) -> Result<(), HostError> {
        let slot = self.params.get(index).ok_or(BindingError::UnknownParam {
            index,
            declared: self.params.len(),
        })?;

        let mut bindings = self.bindings.borrow_mut();
        let bound = match slot {
            ParamSlot::Supplied(supplied) => Some(supplied),
            ParamSlot::Unbound => bindings.get(&index),
        };
        if let Some(bound) = bound {
            if bound != value {
                return Err(BindingError::Conflict {
                    index,
                    bound: bound.clone(),
                    requested: value.clone(),
                }
                .into());
            }
            return Ok(());
        }

        tracing::debug!(index, %value, "binding parameter");
        bindings.insert(index, value.clone());
        Ok(())
    }

    fn query_cell(&self, query: &Value) -> Result<Vec<Value>, HostError> {
        let predicate = match query.children() {
            [] => return Ok(self.cells.clone()),
            [predicate] => predicate,
            children => {
                return Err(QueryError::MalformedQuery {
                    children: children.len(),
                }
                .into());
            }
        };

        // A nested query is a subtree of the enclosing predicate, so at most
        // `charged - reach` levels are already in use when it starts.
        let charged = self.query_depth.get();
        let reach = height(predicate);
        let used = charged.saturating_sub(reach);
        let options = ExecutionOptions {
            max_depth: self.options.max_depth.saturating_sub(used),
            ..self.options.clone()
        };
        self.query_depth.set(used + reach);
        let found = self.filter_cells(predicate, &options);
        self.query_depth.set(charged);
        let found = found?;

        tracing::debug!(total = self.cells.len(), matched = found.len(), "cell query");
        Ok(found)
    }
}

/// Height of an expression tree. Evaluating a node never nests deeper than
/// its height, apart from queries it hands back to the host.
fn height(expr: &Value) -> usize {
    let mut deepest = 0;
    let mut pending = vec![(expr, 1)];
    while let Some((node, level)) = pending.pop() {
        deepest = deepest.max(level);
        pending.extend(node.children().iter().map(|child| (child, level + 1)));
    }
    deepest
}
