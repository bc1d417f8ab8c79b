//! End-to-end behavior of the standard table.
//!
//! Every call goes through `hfn_stdlib::functions()`, the way a host
//! evaluator would reach these functions.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use hfn_function::{Allow, CallContext, FuncError, FuncErrorKind, Param};
use hfn_stdlib::{functions, FUNCTION_NAMES};
use hfn_value::{Mark, Type, Value};
use pretty_assertions::assert_eq;

fn call(name: &str, args: Vec<Value>) -> Result<Value, FuncError> {
    functions().call(&CallContext::new(), name, args)
}

fn nums(ns: &[i64]) -> Value {
    Value::list(Type::Number, ns.iter().copied().map(Value::int).collect())
}

// -- Unknown propagation --

#[test]
fn unknown_argument_short_circuits_without_running_the_body() {
    // "garbage" would be an error if the body ran.
    let out = call(
        "cidrcontains",
        vec![Value::unknown(Type::String), Value::string("garbage")],
    )
    .unwrap();
    assert_eq!(out, Value::unknown(Type::Bool));

    let out = call(
        "cidrsubnet",
        vec![Value::string("not a prefix"), Value::unknown(Type::Number), Value::int(1)],
    )
    .unwrap();
    assert_eq!(out, Value::unknown(Type::String).refine_not_null());
}

/// Types tried for parameters declared as dynamic.
fn candidate_types() -> Vec<Type> {
    vec![
        Type::String,
        Type::Number,
        Type::Bool,
        Type::list(Type::String),
        Type::list(Type::Number),
        Type::set(Type::String),
        Type::map(Type::String),
    ]
}

/// `ty` with dynamic parts filled in: `dynamic` at the top level, string
/// inside collections.
fn concrete(ty: &Type, dynamic: &Type) -> Type {
    let elem = || concrete(ty.element_type().unwrap_or(&Type::Dynamic), &Type::String);
    if ty.is_dynamic() {
        dynamic.clone()
    } else if ty.is_list() {
        Type::list(elem())
    } else if ty.is_set() {
        Type::set(elem())
    } else if ty.is_map() {
        Type::map(elem())
    } else {
        ty.clone()
    }
}

/// A known, non-null value of `ty`.
fn sample(ty: &Type) -> Value {
    let elem_ty = ty.element_type().cloned().unwrap_or(Type::String);
    match ty {
        Type::String => Value::string("x"),
        Type::Number => Value::int(1),
        Type::Bool => Value::bool(true),
        Type::List(_) => Value::list(elem_ty.clone(), vec![sample(&elem_ty)]),
        Type::Set(_) => Value::set(elem_ty.clone(), vec![sample(&elem_ty)]),
        Type::Map(_) => Value::map(elem_ty.clone(), [("k", sample(&elem_ty))]),
        _ => Value::unknown(ty.clone()),
    }
}

#[test]
fn unknown_argument_yields_unknown_for_every_function() {
    for name in FUNCTION_NAMES {
        let f = functions().get(name).unwrap();
        let mut params: Vec<&Param> = f.params().iter().collect();
        if params.is_empty() {
            params.extend(f.var_param());
        }

        for (target, param) in params.iter().enumerate() {
            if param.allows(Allow::UNKNOWN) {
                continue;
            }
            let mut resolved_any = false;
            for candidate in candidate_types() {
                let args: Vec<Value> = params
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let ty = concrete(&p.ty, &candidate);
                        if i == target {
                            Value::unknown(ty)
                        } else {
                            sample(&ty)
                        }
                    })
                    .collect();

                let ty = match (f.static_return_type(), f.return_type(&args)) {
                    (Some(ty), _) => ty.clone(),
                    (None, Ok(ty)) => ty,
                    // The resolver rejects these argument types.
                    (None, Err(_)) => continue,
                };
                resolved_any = true;

                let expected = if f.is_not_null() {
                    Value::unknown(ty).refine_not_null()
                } else {
                    Value::unknown(ty)
                };
                let out = call(name, args.clone())
                    .unwrap_or_else(|e| panic!("{name}({args:?}) failed: {e}"));
                assert_eq!(out, expected, "{name} with unknown {:?}", param.name);
            }
            assert!(resolved_any, "{name}: no argument types resolved for {:?}", param.name);
        }
    }
}

#[test]
fn unknown_result_has_the_resolved_type() {
    let out = call(
        "setunion",
        vec![
            Value::unknown(Type::set(Type::String)),
            Value::set(Type::String, vec![Value::string("a")]),
        ],
    )
    .unwrap();
    assert_eq!(out.ty(), &Type::set(Type::String));
    assert!(!out.is_known());
}

#[test]
fn dynamic_argument_defers() {
    let out = call("upper", vec![Value::dynamic()]).unwrap();
    assert_eq!(out, Value::dynamic());
}

// -- Null and arity --

#[test]
fn null_argument_names_the_parameter() {
    let err = call("upper", vec![Value::null(Type::String)]).unwrap_err();
    assert!(err.is_argument_error());
    assert_eq!(err.param, Some("str"));
    assert_eq!(err.arg_index, Some(0));
}

#[test]
fn arity_is_checked_first() {
    let err = call("upper", vec![]).unwrap_err();
    assert!(matches!(err.kind, FuncErrorKind::Arity { .. }));
    assert_eq!(err.to_string(), "upper expects 1 argument, got 0");
}

// -- Marks --

#[test]
fn marks_flow_through_ordinary_functions() {
    let out = call("upper", vec![Value::string("x").mark(Mark::SENSITIVE)]).unwrap();
    assert_eq!(out, Value::string("X").mark(Mark::SENSITIVE));

    let out = call(
        "sum",
        vec![Value::list(
            Type::Number,
            vec![Value::int(1), Value::int(2).mark(Mark::new("pii"))],
        )],
    )
    .unwrap();
    assert_eq!(out, Value::int(3).mark(Mark::new("pii")));
}

#[test]
fn sensitive_round_trip_for_every_state() {
    for v in [
        Value::string("secret"),
        Value::unknown(Type::Number),
        Value::null(Type::Bool),
    ] {
        let marked = call("sensitive", vec![v.clone()]).unwrap();
        assert_eq!(call("issensitive", vec![marked.clone()]).unwrap(), Value::bool(true));
        let cleared = call("nonsensitive", vec![marked]).unwrap();
        assert_eq!(call("issensitive", vec![cleared.clone()]).unwrap(), Value::bool(false));
        assert_eq!(cleared, v);
    }
}

// -- CIDR --

#[test]
fn cidrcontains_cases() {
    let contains = |a: &str, b: &str| call("cidrcontains", vec![Value::string(a), Value::string(b)]);
    assert_eq!(contains("10.0.0.0/8", "10.1.2.3").unwrap(), Value::bool(true));
    assert_eq!(contains("10.0.0.0/8", "11.0.0.0").unwrap(), Value::bool(false));
    assert_eq!(contains("10.0.0.0/8", "10.0.0.0/16").unwrap(), Value::bool(true));
    let err = contains("10.0.0.0/8", "::1").unwrap_err();
    assert!(matches!(err.kind, FuncErrorKind::FamilyMismatch { .. }));
}

// -- Cross-collection algorithms --

#[test]
fn matchkeys_cases() {
    let out = call(
        "matchkeys",
        vec![Value::string_list(["a", "b", "c"]), nums(&[1, 2, 3]), nums(&[2])],
    )
    .unwrap();
    assert_eq!(out, Value::string_list(["b"]));

    let out = call(
        "matchkeys",
        vec![Value::string_list(["a", "b", "c"]), nums(&[1, 2, 3]), nums(&[])],
    )
    .unwrap();
    assert_eq!(out, Value::empty_list(Type::String));
}

#[test]
fn sum_cases() {
    assert_eq!(call("sum", vec![nums(&[1, 2, 3])]).unwrap(), Value::int(6));
    assert!(call("sum", vec![nums(&[])]).unwrap_err().is_argument_error());
    let err = call(
        "sum",
        vec![Value::list(
            Type::Number,
            vec![Value::number(f64::INFINITY), Value::number(f64::NEG_INFINITY)],
        )],
    )
    .unwrap_err();
    assert!(matches!(err.kind, FuncErrorKind::Numeric { .. }));
}

#[test]
fn transpose_case() {
    let input = Value::map(
        Type::list(Type::String),
        [
            ("a", Value::string_list(["x", "y"])),
            ("b", Value::string_list(["x"])),
        ],
    );
    let expected = Value::map(
        Type::list(Type::String),
        [
            ("x", Value::string_list(["a", "b"])),
            ("y", Value::string_list(["a"])),
        ],
    );
    assert_eq!(call("transpose", vec![input]).unwrap(), expected);
}

#[test]
fn set_subtract_of_itself_is_empty() {
    let s = Value::set(Type::Number, vec![Value::int(1), Value::int(2)]);
    let out = call("setsubtract", vec![s.clone(), s]).unwrap();
    assert_eq!(out, Value::set(Type::Number, vec![]));
}

// -- Context --

#[test]
fn env_reads_the_context() {
    let ctx = CallContext::new()
        .with_env_overrides([("HFN_STAGE", "prod")])
        .without_process_env();
    let out = functions()
        .call(&ctx, "env", vec![Value::string("HFN_STAGE")])
        .unwrap();
    assert_eq!(out, Value::string("prod"));
}

#[test]
fn tracing_init_is_idempotent() {
    hfn_stdlib::init_tracing();
    hfn_stdlib::init_tracing();
}
