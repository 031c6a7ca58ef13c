use super::ExecutionOptions;
use crate::{
    String, Vec,
    ast::{Root, Value},
    environment::Environment,
    evaluator::{Evaluator, ExecutionError},
};

/// Outcome of one [`Call`](crate::ast::Call).
#[derive(Debug)]
pub struct CallResult {
    pub name: String,
    pub result: Result<Value, ExecutionError>,
}

/// Evaluate every call of `root` in order.
///
/// Calls are independent: a failing call is reported in its own
/// [`CallResult`] and the remaining calls still run.
pub fn run_root(root: &Root, env: &dyn Environment, options: &ExecutionOptions) -> Vec<CallResult> {
    let mut evaluator = Evaluator::new(options.clone());
    root.calls
        .iter()
        .map(|call| {
            let result = evaluator.eval(&call.result, env);
            match &result {
                Ok(value) => tracing::debug!(name = %call.name, %value, "call evaluated"),
                Err(err) => tracing::debug!(name = %call.name, kind = %err.kind(), "call failed"),
            }
            CallResult {
                name: call.name.clone(),
                result,
            }
        })
        .collect()
}
