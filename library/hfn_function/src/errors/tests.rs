use super::*;
use hfn_value::{convert, Type, Value};
use pretty_assertions::assert_eq;

#[test]
fn message_matches_kind() {
    let err = numeric_error("can't compute sum of opposing infinities");
    assert_eq!(err.message, err.kind.to_string());
    assert_eq!(err.to_string(), "can't compute sum of opposing infinities");
}

#[test]
fn param_name_prefixes_display() {
    let err = must_not_be_null().at_arg(1).with_param("keys");
    assert_eq!(err.arg_index, Some(1));
    assert_eq!(
        err.to_string(),
        "invalid value for \"keys\" parameter: argument must not be null"
    );
}

#[test]
fn first_attribution_wins() {
    let err = argument_error("bad").at_arg(0).at_arg(3).with_param("a").with_param("b");
    assert_eq!(err.arg_index, Some(0));
    assert_eq!(err.param, Some("a"));
}

#[test]
fn arity_and_family_messages() {
    assert_eq!(
        wrong_arg_count("sum", "1 argument", 2).to_string(),
        "sum expects 1 argument, got 2"
    );
    assert_eq!(
        family_mismatch("10.0.0.0/8", "::1").to_string(),
        "address family mismatch: 10.0.0.0/8 vs. ::1"
    );
    assert_eq!(
        undefined_function("nope").to_string(),
        "call to unknown function \"nope\""
    );
}

#[test]
fn conversion_errors_become_argument_errors() {
    let conv = convert(&Value::string("x"), &Type::Number).unwrap_err();
    let err = FuncError::from(conv);
    assert!(err.is_argument_error());
    assert_eq!(err.message, "a number is required");
}
