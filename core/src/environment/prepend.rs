use super::{Environment, HostError};
use crate::{Vec, ast::Value};
use smallvec::SmallVec;

/// Closure environment: `[bound..., base args...]`.
///
/// Only `arg` is affected. Parameters and the cell query backend stay global
/// for the whole evaluation, so they are forwarded to the base unchanged.
pub struct PrependEnvironment<'env> {
    base: &'env dyn Environment,
    // REDUCE binds two arguments and MAP one, so most closures stay inline.
    args: SmallVec<[Value; 2]>,
}

impl<'env> PrependEnvironment<'env> {
    pub fn new(base: &'env dyn Environment, args: impl IntoIterator<Item = Value>) -> Self {
        Self {
            base,
            args: args.into_iter().collect(),
        }
    }
}

impl Environment for PrependEnvironment<'_> {
    fn arg(&self, index: usize) -> Option<Value> {
        match self.args.get(index) {
            Some(value) => Some(value.clone()),
            None => self.base.arg(index - self.args.len()),
        }
    }

    fn param(&self, index: usize) -> Option<Value> {
        self.base.param(index)
    }

    fn index_param(&self, index: usize, value: &Value) -> Result<(), HostError> {
        self.base.index_param(index, value)
    }

    fn query_cell(&self, query: &Value) -> Result<Vec<Value>, HostError> {
        self.base.query_cell(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MemoryEnvironment;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bound_args_shadow_base() {
        let base = MemoryEnvironment::builder()
            .arg(Value::Uint64(10))
            .arg(Value::Uint64(11))
            .param(Value::Bool(true))
            .build();
        let env = PrependEnvironment::new(&base, [Value::Uint64(1), Value::Uint64(2)]);

        assert_eq!(env.arg(0), Some(Value::Uint64(1)));
        assert_eq!(env.arg(1), Some(Value::Uint64(2)));
        assert_eq!(env.arg(2), Some(Value::Uint64(10)));
        assert_eq!(env.arg(3), Some(Value::Uint64(11)));
        assert_eq!(env.arg(4), None);
        assert_eq!(env.param(0), Some(Value::Bool(true)));
    }

    #[test]
    fn test_nested_wrappers() {
        let base = MemoryEnvironment::builder().build();
        let outer = PrependEnvironment::new(&base, [Value::Uint64(1)]);
        let inner = PrependEnvironment::new(&outer, [Value::Uint64(2)]);

        assert_eq!(inner.arg(0), Some(Value::Uint64(2)));
        assert_eq!(inner.arg(1), Some(Value::Uint64(1)));
        assert_eq!(inner.arg(2), None);
        assert_eq!(outer.arg(0), Some(Value::Uint64(1)));
        assert_eq!(outer.arg(1), None);
    }
}
