//! List evaluation.
//!
//! Resolves list-producing nodes to an ordered sequence of values. Only
//! reachable from list positions (REDUCE's third operand, the list operand of
//! MAP and FILTER); in value position these tags are unsupported.

use super::{Evaluator, ExecutionError, Position};
use crate::{
    Vec,
    ast::{Value, ValueType},
    environment::{Environment, PrependEnvironment},
};

impl Evaluator {
    /// Evaluate a node in list position.
    pub fn eval_list(
        &mut self,
        expr: &Value,
        env: &dyn Environment,
    ) -> Result<Vec<Value>, ExecutionError> {
        self.enter()?;
        let result = self.eval_list_inner(expr, env);
        self.leave();
        result
    }

    fn eval_list_inner(
        &mut self,
        expr: &Value,
        env: &dyn Environment,
    ) -> Result<Vec<Value>, ExecutionError> {
        let tag = expr.tag();
        tracing::trace!(%tag, "resolving list");

        match (tag, expr.children()) {
            // The query node goes to the host unevaluated.
            (ValueType::QueryCells, _) => {
                let cells = env.query_cell(expr).map_err(ExecutionError::from_host)?;
                tracing::debug!(count = cells.len(), "query returned cells");
                Ok(cells)
            }

            (ValueType::Map, [body, inner]) => {
                let elements = self.eval_list(inner, env)?;
                self.check_iterations(tag, elements.len())?;
                elements
                    .into_iter()
                    .map(|element| self.eval(body, &PrependEnvironment::new(env, [element])))
                    .collect()
            }
            (ValueType::Map, children) => Err(ExecutionError::exactly(tag, 2, children.len())),

            (ValueType::Filter, [predicate, inner]) => {
                let elements = self.eval_list(inner, env)?;
                self.check_iterations(tag, elements.len())?;
                let mut kept = Vec::with_capacity(elements.len());
                for element in elements {
                    let scope = PrependEnvironment::new(env, [element.clone()]);
                    match self.eval(predicate, &scope)? {
                        Value::Bool(true) => kept.push(element),
                        Value::Bool(false) => {}
                        other => {
                            return Err(ExecutionError::type_mismatch(
                                tag,
                                ValueType::Bool,
                                other.tag(),
                            ));
                        }
                    }
                }
                Ok(kept)
            }
            (ValueType::Filter, children) => Err(ExecutionError::exactly(tag, 2, children.len())),

            (ValueType::List, elements) => self.eval_all(elements, env),

            _ => Err(ExecutionError::UnsupportedNode {
                tag,
                position: Position::List,
            }),
        }
    }
}
