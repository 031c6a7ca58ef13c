mod cases;

use animagus::{
    ErrorKind, ExecutionOptions, MemoryEnvironment, Value, ValueType, environment::QueryError,
    execute, execute_with_options, render_error_to_string_no_color,
};
use cases::ledger;

fn op(tag: ValueType, operands: impl IntoIterator<Item = Value>) -> Value {
    Value::op(tag, operands).unwrap()
}

#[test]
fn test_render_shows_kind_and_message() {
    let env = MemoryEnvironment::builder().build();
    let err = execute(&op(ValueType::Plus, [Value::Bool(true), Value::Uint64(1)]), &env).unwrap_err();

    let rendered = render_error_to_string_no_color(&err);
    assert!(rendered.contains("TypeError"), "{rendered}");
    assert!(rendered.contains("PLUS expects UINT64, got BOOL"), "{rendered}");
}

#[test]
fn test_render_shows_host_cause_chain() {
    let env = ledger();
    // The predicate reads an argument that does not exist.
    let query = Value::query_cells(op(ValueType::Equal, [Value::Arg(3), Value::Nil]));
    let expr = Value::reduce(Value::Arg(0), Value::Nil, query);
    let err = execute(&expr, &env).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DelegatedError);
    assert!(matches!(
        err.host_error().and_then(|e| e.downcast_ref::<QueryError>()),
        Some(QueryError::Predicate { cell: 0, .. })
    ));

    let rendered = render_error_to_string_no_color(&err);
    assert!(rendered.contains("DelegatedError"), "{rendered}");
    assert!(rendered.contains("cell predicate failed on cell 0"), "{rendered}");
    assert!(rendered.contains("cannot find arg index 3"), "{rendered}");
}

#[test]
fn test_render_resource_limit_has_help() {
    let env = MemoryEnvironment::builder().build();
    let mut expr = Value::Uint64(0);
    for _ in 0..8 {
        expr = op(ValueType::Plus, [expr, Value::Uint64(1)]);
    }
    let options = ExecutionOptions {
        max_depth: 4,
        ..Default::default()
    };
    let err = execute_with_options(&expr, &env, &options).unwrap_err();

    let rendered = render_error_to_string_no_color(&err);
    assert!(rendered.contains("ResourceExceeded"), "{rendered}");
    assert!(rendered.contains("ExecutionOptions"), "{rendered}");
}
