//! Core evaluation logic.

use super::{
    ExecutionError, Position,
    ResourceExceeded::{self, *},
    accessors, operators,
};
use crate::{
    Vec,
    api::ExecutionOptions,
    ast::{Node, Value, ValueType},
    classifier::NodeClass,
    environment::{Environment, PrependEnvironment},
    evaluator::BindingKind,
};

/// Evaluator for query ASTs.
///
/// Holds only the limits and the current depth; all bindings live in the
/// [`Environment`] passed to each call, so one evaluator can be reused across
/// expressions.
#[derive(Debug, Clone)]
pub struct Evaluator {
    options: ExecutionOptions,
    depth: usize,
}

impl Evaluator {
    /// Create a new evaluator with the given options.
    pub fn new(options: ExecutionOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// Evaluate an expression node in value position.
    pub fn eval(&mut self, expr: &Value, env: &dyn Environment) -> Result<Value, ExecutionError> {
        self.enter()?;
        let result = self.eval_inner(expr, env);
        self.leave();
        result
    }

    /// Check depth before recursing.
    pub(super) fn enter(&mut self) -> Result<(), ExecutionError> {
        if self.depth >= self.options.max_depth {
            tracing::warn!(depth = self.depth, max_depth = self.options.max_depth, "evaluation too deep");
            return Err(StackOverflow {
                depth: self.depth,
                max_depth: self.options.max_depth,
            }
            .into());
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Inner evaluation logic (no depth tracking).
    fn eval_inner(&mut self, expr: &Value, env: &dyn Environment) -> Result<Value, ExecutionError> {
        let tag = expr.tag();
        match NodeClass::of(tag) {
            NodeClass::Primitive => Ok(expr.clone()),

            NodeClass::Operator => {
                let operands = self.eval_all(expr.children(), env)?;
                operators::evaluate(tag, operands, env)
            }

            NodeClass::StructuralGet => {
                let [operand] = expr.children() else {
                    return Err(ExecutionError::exactly(tag, 1, expr.children().len()));
                };
                let record = self.eval(operand, env)?;
                accessors::project(tag, record)
            }

            NodeClass::ControlForm => match expr {
                Value::Arg(index) => lookup(BindingKind::Arg, *index, |i| env.arg(i)),
                Value::Param(index) => lookup(BindingKind::Param, *index, |i| env.param(i)),
                Value::Node(node) => self.eval_form(node, env),
                _ => Err(ExecutionError::UnsupportedNode {
                    tag,
                    position: Position::Value,
                }),
            },
        }
    }

    fn eval_form(&mut self, node: &Node, env: &dyn Environment) -> Result<Value, ExecutionError> {
        let tag = node.tag();
        tracing::trace!(%tag, depth = self.depth, "control form");

        match (tag, node.children()) {
            (ValueType::Apply, [body, args @ ..]) => {
                let args = self.eval_all(args, env)?;
                self.eval(body, &PrependEnvironment::new(env, args))
            }
            (ValueType::Apply, []) => Err(ExecutionError::at_least(tag, 1, 0)),

            (ValueType::Reduce, [body, init, list]) => {
                let mut acc = self.eval(init, env)?;
                let elements = self.eval_list(list, env)?;
                self.check_iterations(tag, elements.len())?;
                for element in elements {
                    acc = self.eval(body, &PrependEnvironment::new(env, [acc, element]))?;
                }
                Ok(acc)
            }
            (ValueType::Reduce, children) => Err(ExecutionError::exactly(tag, 3, children.len())),

            _ => Err(ExecutionError::UnsupportedNode {
                tag,
                position: Position::Value,
            }),
        }
    }

    /// Evaluate each expression in order, stopping at the first error.
    pub(super) fn eval_all(
        &mut self,
        exprs: &[Value],
        env: &dyn Environment,
    ) -> Result<Vec<Value>, ExecutionError> {
        exprs.iter().map(|expr| self.eval(expr, env)).collect()
    }

    pub(super) fn check_iterations(&self, tag: ValueType, count: usize) -> Result<(), ExecutionError> {
        match self.options.max_iterations {
            Some(max_iterations) if count > max_iterations => {
                tracing::warn!(%tag, count, max_iterations, "iteration limit exceeded");
                Err(ResourceExceeded::IterationLimit {
                    tag,
                    max_iterations,
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}

fn lookup(
    kind: BindingKind,
    index: u64,
    fetch: impl FnOnce(usize) -> Option<Value>,
) -> Result<Value, ExecutionError> {
    usize::try_from(index)
        .ok()
        .and_then(fetch)
        .ok_or(ExecutionError::Lookup { kind, index })
}
