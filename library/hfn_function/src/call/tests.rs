use super::*;
use crate::errors::{incompatible_types, FuncErrorKind};
use crate::param::Param;
use hfn_value::Mark;
use pretty_assertions::assert_eq;

fn ctx() -> CallContext {
    CallContext::new().without_process_env()
}

/// Concatenates its string arguments. Panics if it ever sees an unknown,
/// which the engine must prevent.
fn concat_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let mut out = String::new();
    for arg in args {
        let s = arg.as_str().ok_or_else(|| internal("body saw a non-string"))?;
        out.push_str(s);
    }
    Ok(Value::string(out))
}

fn concat() -> Function {
    Function::returning("concat", Type::String, concat_body)
        .with_param(Param::new("first", Type::String))
        .with_var_param(Param::new("rest", Type::String))
        .not_null()
}

fn first_elem_type(args: &[Value]) -> Result<Type, FuncError> {
    match args[0].ty().element_type() {
        Some(Type::Dynamic) | None => Err(incompatible_types("cannot pick").at_arg(0)),
        Some(ty) => Ok(ty.clone()),
    }
}

fn first_elem_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let elems = args[0].elements().unwrap_or_default();
    elems
        .first()
        .cloned()
        .ok_or_else(|| argument_error("empty list").at_arg(0))
}

fn first_elem() -> Function {
    Function::resolving("first", first_elem_type, first_elem_body)
        .with_param(Param::new("list", Type::list(Type::Dynamic)))
}

#[test]
fn arity_is_checked_first() {
    let err = concat().call(&ctx(), vec![]).unwrap_err();
    assert_eq!(
        err.kind,
        FuncErrorKind::Arity {
            name: "concat".into(),
            expected: "at least 1 argument".into(),
            got: 0
        }
    );

    let err = first_elem()
        .call(&ctx(), vec![Value::dynamic(), Value::dynamic()])
        .unwrap_err();
    assert_eq!(err.to_string(), "first expects 1 argument, got 2");
}

#[test]
fn null_is_rejected_with_param_name() {
    let err = concat()
        .call(&ctx(), vec![Value::string("a"), Value::null(Type::String)])
        .unwrap_err();
    assert_eq!(err.arg_index, Some(1));
    assert_eq!(
        err.to_string(),
        "invalid value for \"rest\" parameter: argument must not be null"
    );
}

#[test]
fn unknown_short_circuits_without_running_body() {
    let out = concat()
        .call(&ctx(), vec![Value::unknown(Type::String), Value::string("b")])
        .unwrap();
    assert_eq!(out, Value::unknown(Type::String).refine_not_null());
}

#[test]
fn dynamic_argument_defers() {
    let out = concat()
        .call(&ctx(), vec![Value::string("a"), Value::dynamic()])
        .unwrap();
    assert_eq!(out, Value::dynamic());
    assert_eq!(concat().return_type(&[Value::dynamic()]).unwrap(), Type::Dynamic);
}

#[test]
fn arguments_are_converted_to_param_type() {
    let out = concat()
        .call(&ctx(), vec![Value::int(1), Value::bool(true)])
        .unwrap();
    assert_eq!(out, Value::string("1true"));
}

#[test]
fn conversion_failure_names_param() {
    let err = first_elem()
        .call(&ctx(), vec![Value::string("x")])
        .unwrap_err();
    assert_eq!(err.param, Some("list"));
    assert!(err.is_argument_error());
}

#[test]
fn marks_are_collected_and_reapplied() {
    let out = concat()
        .call(
            &ctx(),
            vec![Value::string("a").mark(Mark::SENSITIVE), Value::string("b")],
        )
        .unwrap();
    assert_eq!(out.as_str(), Some("ab"));
    assert!(out.has_mark(&Mark::SENSITIVE));
}

#[test]
fn nested_marks_reach_the_result() {
    let list = Value::list(
        Type::String,
        vec![Value::string("s").mark(Mark::new("pii"))],
    );
    let out = first_elem().call(&ctx(), vec![list]).unwrap();
    assert_eq!(out.as_str(), Some("s"));
    assert!(out.has_mark(&Mark::new("pii")));
}

#[test]
fn unknown_result_keeps_marks() {
    let out = concat()
        .call(
            &ctx(),
            vec![Value::unknown(Type::String).mark(Mark::SENSITIVE)],
        )
        .unwrap();
    assert!(!out.is_known());
    assert!(out.has_mark(&Mark::SENSITIVE));
}

#[test]
fn resolver_errors_are_annotated() {
    let err = first_elem()
        .call(&ctx(), vec![Value::empty_list(Type::Dynamic)])
        .unwrap_err();
    assert_eq!(err.param, Some("list"));
    assert!(matches!(err.kind, FuncErrorKind::TypeUnification { .. }));
}

#[test]
fn body_errors_are_annotated() {
    let err = first_elem()
        .call(&ctx(), vec![Value::empty_list(Type::Number)])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid value for \"list\" parameter: empty list"
    );
}

#[test]
fn result_is_conformed_to_declared_type() {
    fn number_body(_: &CallContext, _: &[Value], _: &Type) -> Result<Value, FuncError> {
        Ok(Value::int(3))
    }
    let f = Function::returning("n", Type::String, number_body);
    assert_eq!(f.call(&ctx(), vec![]).unwrap(), Value::string("3"));

    let g = Function::returning("g", Type::list(Type::String), number_body);
    let err = g.call(&ctx(), vec![]).unwrap_err();
    assert!(matches!(err.kind, FuncErrorKind::Internal { .. }));
}

#[test]
fn wrong_kind_message() {
    let err = wrong_kind(0, "list or tuple", &Type::String);
    assert_eq!(err.message, "list or tuple required, but have string");
    assert_eq!(err.arg_index, Some(0));
}
