use super::*;
use crate::{
    ast::{Value, ValueType},
    api::ExecutionOptions,
    evaluator::{ErrorKind, ExecutionError, ResourceExceeded, execute, execute_with_options},
    vec,
};
use pretty_assertions::assert_eq;

fn op(tag: ValueType, operands: impl IntoIterator<Item = Value>) -> Value {
    Value::op(tag, operands).unwrap()
}

fn cell(capacity: u64) -> Value {
    Value::cell(
        Value::Uint64(capacity),
        Value::script(Value::bytes([0x11; 32]), Value::Bool(true), Value::bytes([0x01])),
        Value::Nil,
        Value::Bytes(vec![]),
    )
}

fn capacity_of_arg() -> Value {
    op(ValueType::GetCapacity, [Value::Arg(0)])
}

fn total_capacity(query: Value) -> Value {
    Value::reduce(
        op(ValueType::Plus, [Value::Arg(0), Value::Arg(1)]),
        Value::Uint64(0),
        Value::map(capacity_of_arg(), query),
    )
}

fn query_error(err: &ExecutionError) -> &QueryError {
    err.host_error()
        .and_then(|host| host.downcast_ref::<QueryError>())
        .unwrap()
}

#[test]
fn test_args_and_supplied_params() {
    let env = MemoryEnvironment::builder()
        .arg(Value::Uint64(1))
        .param(Value::bytes([0xaa]))
        .build();

    assert_eq!(env.arg(0), Some(Value::Uint64(1)));
    assert_eq!(env.arg(1), None);
    assert_eq!(env.param(0), Some(Value::bytes([0xaa])));
    assert_eq!(env.param(1), None);
}

#[test]
fn test_unbound_param_is_a_placeholder() {
    let env = MemoryEnvironment::builder()
        .param(Value::Uint64(1))
        .unbound_param()
        .build();
    assert_eq!(env.param(1), Some(Value::Param(1)));
}

#[test]
fn test_equal_binds_unbound_param() {
    let env = MemoryEnvironment::builder().unbound_param().build();
    let expr = op(ValueType::Equal, [Value::Param(0), Value::Uint64(5)]);

    assert_eq!(execute(&expr, &env).unwrap(), Value::Bool(true));
    assert_eq!(env.bindings(), vec![(0, Value::Uint64(5))]);
    assert_eq!(env.param(0), Some(Value::Uint64(5)));

    // Once bound, later comparisons see the value.
    let again = op(ValueType::Equal, [Value::Param(0), Value::Uint64(6)]);
    assert_eq!(execute(&again, &env).unwrap(), Value::Bool(false));

    env.reset_bindings();
    assert!(env.bindings().is_empty());
    assert_eq!(env.param(0), Some(Value::Param(0)));
}

#[test]
fn test_equal_param_against_nil_compares() {
    let env = MemoryEnvironment::builder().unbound_param().build();
    let expr = op(ValueType::Equal, [Value::Param(0), Value::Nil]);
    assert_eq!(execute(&expr, &env).unwrap(), Value::Bool(false));
    assert!(env.bindings().is_empty());
}

#[test]
fn test_index_param_conflict() {
    let env = MemoryEnvironment::builder()
        .param(Value::Uint64(1))
        .unbound_param()
        .build();

    assert!(env.index_param(0, &Value::Uint64(1)).is_ok());
    let err = env.index_param(0, &Value::Uint64(2)).unwrap_err();
    assert_eq!(
        err.downcast_ref::<BindingError>(),
        Some(&BindingError::Conflict {
            index: 0,
            bound: Value::Uint64(1),
            requested: Value::Uint64(2),
        })
    );

    env.index_param(1, &Value::Bool(true)).unwrap();
    env.index_param(1, &Value::Bool(true)).unwrap();
    assert!(env.index_param(1, &Value::Bool(false)).is_err());
}

#[test]
fn test_index_param_unknown() {
    let env = MemoryEnvironment::builder().unbound_param().build();
    let err = env.index_param(3, &Value::Nil).unwrap_err();
    assert_eq!(
        err.downcast_ref::<BindingError>(),
        Some(&BindingError::UnknownParam {
            index: 3,
            declared: 1
        })
    );
}

#[test]
fn test_query_all_cells() {
    let env = MemoryEnvironment::builder()
        .cells([cell(10), cell(20), cell(30)])
        .build();
    let total = total_capacity(Value::query_all_cells());
    assert_eq!(execute(&total, &env).unwrap(), Value::Uint64(60));
}

#[test]
fn test_query_with_predicate() {
    let env = MemoryEnvironment::builder()
        .cells([cell(10), cell(20), cell(30)])
        .build();
    let small = Value::query_cells(op(ValueType::Less, [capacity_of_arg(), Value::Uint64(25)]));

    let found = env.query_cell(&small).unwrap();
    assert_eq!(found, vec![cell(10), cell(20)]);
    assert_eq!(execute(&total_capacity(small), &env).unwrap(), Value::Uint64(30));
}

#[test]
fn test_query_bindings_do_not_leak_between_cells() {
    let env = MemoryEnvironment::builder()
        .unbound_param()
        .cells([cell(10), cell(20)])
        .build();
    let query = Value::query_cells(op(ValueType::Equal, [Value::Param(0), capacity_of_arg()]));

    let found = env.query_cell(&query).unwrap();
    assert_eq!(found, vec![cell(10), cell(20)]);
    assert!(env.bindings().is_empty());
}

#[test]
fn test_query_with_supplied_param() {
    let env = MemoryEnvironment::builder()
        .param(Value::Uint64(20))
        .cells([cell(10), cell(20), cell(20)])
        .build();
    let query = Value::query_cells(op(ValueType::Equal, [Value::Param(0), capacity_of_arg()]));
    assert_eq!(env.query_cell(&query).unwrap().len(), 2);
}

#[test]
fn test_malformed_query() {
    let env = MemoryEnvironment::builder().cell(cell(1)).build();
    let query = Value::node(ValueType::QueryCells, vec![Value::Bool(true), Value::Bool(true)]).unwrap();

    let err = execute(&total_capacity(query), &env).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DelegatedError);
    assert!(matches!(
        query_error(&err),
        QueryError::MalformedQuery { children: 2 }
    ));
}

#[test]
fn test_non_bool_predicate() {
    let env = MemoryEnvironment::builder().cell(cell(1)).build();
    let query = Value::query_cells(capacity_of_arg());

    let err = execute(&total_capacity(query), &env).unwrap_err();
    assert!(matches!(
        query_error(&err),
        QueryError::NonBoolPredicate {
            found: ValueType::Uint64
        }
    ));
}

#[test]
fn test_failing_predicate_keeps_its_cause() {
    let env = MemoryEnvironment::builder().cells([cell(1), cell(2)]).build();
    let query = Value::query_cells(op(ValueType::Equal, [Value::Arg(4), Value::Nil]));

    let err = execute(&total_capacity(query), &env).unwrap_err();
    let QueryError::Predicate { cell, source } = query_error(&err) else {
        panic!("expected a predicate failure, got {err}");
    };
    assert_eq!(*cell, 0);
    assert_eq!(source.kind(), ErrorKind::LookupError);
}

/// `levels` queries, each predicate folding over the next query:
/// `QUERY_CELLS(EQUAL(UINT64(0), REDUCE(ARG(0), UINT64(0), <inner>)))`.
/// Every level adds three to the predicate height.
fn nested_queries(levels: usize) -> Value {
    (0..levels).fold(Value::query_all_cells(), |inner, _| {
        Value::query_cells(op(
            ValueType::Equal,
            [
                Value::Uint64(0),
                Value::reduce(Value::Arg(0), Value::Uint64(0), inner),
            ],
        ))
    })
}

#[test]
fn test_nested_queries_share_depth_budget() {
    let options = ExecutionOptions {
        max_depth: 8,
        ..Default::default()
    };
    let env = MemoryEnvironment::builder()
        .cell(cell(10))
        .options(options.clone())
        .build();

    // Two levels reach depth 6.
    let result = execute_with_options(&total_capacity(nested_queries(2)), &env, &options);
    assert_eq!(result.unwrap(), Value::Uint64(10));

    // Three levels would reach depth 9.
    for levels in [3, 30] {
        let err = execute_with_options(&total_capacity(nested_queries(levels)), &env, &options)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResourceExceeded, "{levels} levels: {err}");
        assert!(matches!(
            err,
            ExecutionError::ResourceExceeded(ResourceExceeded::StackOverflow { .. })
        ));
    }

    // The budget is released once the query returns.
    let result = execute_with_options(&total_capacity(nested_queries(2)), &env, &options);
    assert_eq!(result.unwrap(), Value::Uint64(10));
}
