use super::*;
use hfn_function::FuncErrorKind;
use pretty_assertions::assert_eq;

fn call(f: Function, args: Vec<Value>) -> Result<Value, FuncError> {
    f.call(&CallContext::new(), args)
}

fn numbers(ns: &[f64]) -> Value {
    Value::list(Type::Number, ns.iter().copied().map(Value::number).collect())
}

fn bools(bs: &[Option<bool>]) -> Value {
    let elems = bs
        .iter()
        .map(|b| b.map_or_else(|| Value::unknown(Type::Bool), Value::bool))
        .collect();
    Value::list(Type::Bool, elems)
}

#[test]
fn matchkeys_keeps_value_order() {
    let out = call(
        matchkeys(),
        vec![
            Value::string_list(["a", "b", "c"]),
            numbers(&[1.0, 2.0, 3.0]),
            numbers(&[3.0, 2.0]),
        ],
    )
    .unwrap();
    assert_eq!(out, Value::string_list(["b", "c"]));
}

#[test]
fn matchkeys_empty_searchset() {
    let out = call(
        matchkeys(),
        vec![
            Value::string_list(["a", "b"]),
            numbers(&[1.0, 2.0]),
            Value::empty_list(Type::Number),
        ],
    )
    .unwrap();
    assert_eq!(out, Value::empty_list(Type::String));
}

#[test]
fn matchkeys_unifies_keys_with_searchset() {
    let out = call(
        matchkeys(),
        vec![
            Value::string_list(["a", "b"]),
            numbers(&[1.0, 2.0]),
            Value::string_list(["2"]),
        ],
    )
    .unwrap();
    assert_eq!(out, Value::string_list(["b"]));
}

#[test]
fn matchkeys_length_mismatch() {
    let err = call(
        matchkeys(),
        vec![
            Value::string_list(["a"]),
            numbers(&[1.0, 2.0]),
            numbers(&[1.0]),
        ],
    )
    .unwrap_err();
    assert_eq!(err.message, "length of keys and values should be equal");
}

#[test]
fn matchkeys_unknown_key_is_unknown() {
    let keys = Value::list(Type::Number, vec![Value::int(1), Value::unknown(Type::Number)]);
    let out = call(
        matchkeys(),
        vec![Value::string_list(["a", "b"]), keys, numbers(&[1.0])],
    )
    .unwrap();
    assert!(!out.is_known());
    assert_eq!(out.ty(), &Type::list(Type::String));
}

#[test]
fn matchkeys_unknown_search_element() {
    let values = Value::string_list(["a"]);
    let partial = |first: i64| {
        Value::list(Type::Number, vec![Value::int(first), Value::unknown(Type::Number)])
    };

    let out = call(matchkeys(), vec![values.clone(), numbers(&[1.0]), partial(5)]).unwrap();
    assert_eq!(out, Value::unknown(Type::list(Type::String)).refine_not_null());

    let out = call(matchkeys(), vec![values, numbers(&[1.0]), partial(1)]).unwrap();
    assert_eq!(out, Value::string_list(["a"]));
}

#[test]
fn matchkeys_incompatible_searchset() {
    let nested = Value::list(Type::list(Type::String), vec![Value::string_list(["x"])]);
    let err = call(
        matchkeys(),
        vec![Value::string_list(["a"]), Value::string_list(["a"]), nested],
    )
    .unwrap_err();
    assert!(matches!(err.kind, FuncErrorKind::TypeUnification { .. }));
    assert_eq!(
        err.message,
        "keys and searchset must be of the same type: \
         list of string and list of list of string are incompatible"
    );
    assert_eq!(err.arg_index, Some(2));
    assert_eq!(err.param, Some("searchset"));
}

#[test]
fn transpose_pivots_sorted() {
    let input = Value::map(
        Type::list(Type::String),
        [
            ("b", Value::string_list(["x"])),
            ("a", Value::string_list(["x", "y"])),
        ],
    );
    let out = call(transpose(), vec![input]).unwrap();
    let expected = Value::map(
        Type::list(Type::String),
        [
            ("x", Value::string_list(["a", "b"])),
            ("y", Value::string_list(["a"])),
        ],
    );
    assert_eq!(out, expected);
}

#[test]
fn transpose_rejects_null_elements() {
    let input = Value::map(
        Type::list(Type::String),
        [(
            "a",
            Value::list(Type::String, vec![Value::null(Type::String)]),
        )],
    );
    let err = call(transpose(), vec![input]).unwrap_err();
    assert_eq!(err.message, "input must be a map of lists of strings");
}

#[test]
fn sum_of_numbers() {
    assert_eq!(
        call(sum(), vec![numbers(&[1.0, 2.0, 3.0])]).unwrap(),
        Value::int(6)
    );
    let tuple = Value::tuple(vec![Value::int(1), Value::string("2.5")]);
    assert_eq!(call(sum(), vec![tuple]).unwrap(), Value::number(3.5));
}

#[test]
fn sum_errors() {
    let err = call(sum(), vec![Value::empty_list(Type::Number)]).unwrap_err();
    assert_eq!(err.message, "cannot sum an empty list");

    let err = call(sum(), vec![Value::string("12")]).unwrap_err();
    assert_eq!(err.message, "cannot sum noniterable");

    let err = call(sum(), vec![numbers(&[f64::INFINITY, f64::NEG_INFINITY])]).unwrap_err();
    assert!(matches!(err.kind, FuncErrorKind::Numeric { .. }));

    let mixed = Value::tuple(vec![Value::int(1), Value::bool(true)]);
    let err = call(sum(), vec![mixed]).unwrap_err();
    assert_eq!(
        err.message,
        "argument must be list, set, or tuple of number values"
    );
}

#[test]
fn sum_with_infinite_input() {
    let out = call(sum(), vec![numbers(&[f64::MAX, f64::MAX, f64::NEG_INFINITY])]).unwrap();
    assert_eq!(out, Value::number(f64::NEG_INFINITY));

    let out = call(sum(), vec![numbers(&[1.0, f64::INFINITY])]).unwrap();
    assert_eq!(out, Value::number(f64::INFINITY));
}

#[test]
fn sum_of_partially_unknown_list() {
    let list = Value::list(Type::Number, vec![Value::int(1), Value::unknown(Type::Number)]);
    assert_eq!(
        call(sum(), vec![list]).unwrap(),
        Value::unknown(Type::Number).refine_not_null()
    );
}

#[test]
fn index_finds_first_match() {
    let list = Value::string_list(["a", "b", "a"]);
    assert_eq!(
        call(index(), vec![list.clone(), Value::string("a")]).unwrap(),
        Value::int(0)
    );
    assert_eq!(
        call(index(), vec![list.clone(), Value::string("b")]).unwrap(),
        Value::int(1)
    );
    let err = call(index(), vec![list, Value::string("z")]).unwrap_err();
    assert_eq!(err.message, "item not found");
}

#[test]
fn index_unknown_before_match() {
    let list = Value::list(
        Type::String,
        vec![Value::unknown(Type::String), Value::string("b")],
    );
    let out = call(index(), vec![list, Value::string("b")]).unwrap();
    assert_eq!(out, Value::unknown(Type::Number));

    let list = Value::list(
        Type::String,
        vec![Value::string("b"), Value::unknown(Type::String)],
    );
    let out = call(index(), vec![list, Value::string("b")]).unwrap();
    assert_eq!(out, Value::int(0));
}

#[test]
fn index_unknown_value_skips_sequence_check() {
    let set = Value::set(Type::Number, vec![Value::int(1)]);
    let out = call(index(), vec![set, Value::unknown(Type::Number)]).unwrap();
    assert_eq!(out, Value::unknown(Type::Number));
}

#[test]
fn index_requires_sequence() {
    let err = call(index(), vec![Value::string("abc"), Value::string("a")]).unwrap_err();
    assert_eq!(err.message, "argument must be a list or tuple");
    let err = call(index(), vec![Value::empty_list(Type::String), Value::string("a")]).unwrap_err();
    assert_eq!(err.message, "cannot search an empty list");
}

#[test]
fn length_of_each_kind() {
    let len = |v: Value| call(length(), vec![v]).unwrap();
    assert_eq!(len(Value::string("héllo")), Value::int(5));
    assert_eq!(len(Value::string_list(["a", "b"])), Value::int(2));
    assert_eq!(
        len(Value::object([("a", Value::int(1)), ("b", Value::int(2))])),
        Value::int(2)
    );
    assert_eq!(len(Value::unknown(Type::tuple(vec![Type::String; 3]))), Value::int(3));
    assert_eq!(len(Value::unknown(Type::list(Type::String))), Value::unknown(Type::Number));
    assert_eq!(len(Value::dynamic()), Value::unknown(Type::Number));
}

#[test]
fn length_rejects_primitives() {
    let err = call(length(), vec![Value::int(3)]).unwrap_err();
    assert_eq!(err.arg_index, Some(0));
}

#[test]
fn alltrue_scans() {
    let all = |bs: &[Option<bool>]| call(alltrue(), vec![bools(bs)]).unwrap();
    assert_eq!(all(&[]), Value::bool(true));
    assert_eq!(all(&[Some(true), Some(true)]), Value::bool(true));
    assert_eq!(all(&[None, Some(false)]), Value::bool(false));
    assert_eq!(all(&[Some(true), None]), Value::unknown(Type::Bool));

    let with_null = Value::list(Type::Bool, vec![Value::bool(true), Value::null(Type::Bool)]);
    assert_eq!(call(alltrue(), vec![with_null]).unwrap(), Value::bool(false));
}

#[test]
fn anytrue_scans() {
    let any = |bs: &[Option<bool>]| call(anytrue(), vec![bools(bs)]).unwrap();
    assert_eq!(any(&[]), Value::bool(false));
    assert_eq!(any(&[None, Some(true)]), Value::bool(true));
    assert_eq!(any(&[Some(false), None]), Value::unknown(Type::Bool));

    let with_null = Value::list(Type::Bool, vec![Value::null(Type::Bool), Value::bool(false)]);
    assert_eq!(call(anytrue(), vec![with_null]).unwrap(), Value::bool(false));
}
