use super::*;
use hfn_value::Mark;
use pretty_assertions::assert_eq;

fn call(f: Function, v: Value) -> Result<Value, FuncError> {
    f.call(&CallContext::new(), vec![v])
}

#[test]
fn primitives() {
    assert_eq!(call(tostring(), Value::int(5)).unwrap(), Value::string("5"));
    assert_eq!(call(tostring(), Value::bool(true)).unwrap(), Value::string("true"));
    assert_eq!(call(tonumber(), Value::string("1.5")).unwrap(), Value::number(1.5));
    assert_eq!(call(tobool(), Value::string("false")).unwrap(), Value::bool(false));
}

#[test]
fn invalid_text() {
    let err = call(tonumber(), Value::string("no")).unwrap_err();
    assert_eq!(
        err.message,
        "cannot convert \"no\" to number; given string must be a decimal representation of a number"
    );
    let err = call(tobool(), Value::string("yes")).unwrap_err();
    assert_eq!(
        err.message,
        "cannot convert \"yes\" to bool; only the strings \"true\" or \"false\" are allowed"
    );
}

#[test]
fn impossible_type_is_rejected_before_the_body() {
    let err = tonumber()
        .return_type(&[Value::string_list(["a"])])
        .unwrap_err();
    assert_eq!(err.message, "cannot convert list of string to number");
    assert_eq!(err.param, Some("v"));
}

#[test]
fn collections() {
    let tuple = Value::tuple(vec![Value::string("a"), Value::int(1)]);
    assert_eq!(
        call(tolist(), tuple.clone()).unwrap(),
        Value::string_list(["a", "1"])
    );
    let dupes = Value::string_list(["b", "a", "b"]);
    assert_eq!(
        call(toset(), dupes).unwrap(),
        Value::set(Type::String, vec![Value::string("a"), Value::string("b")])
    );
    let obj = Value::object([("a", Value::int(1)), ("b", Value::bool(true))]);
    assert_eq!(
        call(tomap(), obj).unwrap(),
        Value::map(
            Type::String,
            [("a", Value::string("1")), ("b", Value::string("true"))]
        )
    );
}

#[test]
fn null_unknown_and_marks_pass_through() {
    assert_eq!(
        call(tostring(), Value::null(Type::Number)).unwrap(),
        Value::null(Type::String)
    );
    assert_eq!(
        call(tostring(), Value::unknown(Type::Bool)).unwrap(),
        Value::unknown(Type::String)
    );
    assert_eq!(
        call(tolist(), Value::dynamic()).unwrap(),
        Value::unknown(Type::list(Type::Dynamic))
    );

    let out = call(tostring(), Value::int(3).mark(Mark::SENSITIVE)).unwrap();
    assert_eq!(out.as_str(), Some("3"));
    assert!(out.has_mark(&Mark::SENSITIVE));
}
