use super::*;
use crate::mark::Mark;
use pretty_assertions::assert_eq;

#[test]
fn known_primitives() {
    assert_eq!(Value::int(1).equals(&Value::int(1)), Value::bool(true));
    assert_eq!(Value::int(1).equals(&Value::int(2)), Value::bool(false));
    assert_eq!(Value::string("1").equals(&Value::int(1)), Value::bool(false));
}

#[test]
fn unknown_operands_give_unknown() {
    let r = Value::unknown(Type::String).equals(&Value::string("a"));
    assert!(!r.is_known());
    assert_eq!(r.ty(), &Type::Bool);
}

#[test]
fn nulls() {
    let null = Value::null(Type::String);
    assert_eq!(null.equals(&Value::null(Type::Number)), Value::bool(true));
    assert_eq!(null.equals(&Value::string("a")), Value::bool(false));
    assert!(!null.equals(&Value::unknown(Type::String)).is_known());
    assert_eq!(
        null.equals(&Value::unknown(Type::String).refine_not_null()),
        Value::bool(false)
    );
}

#[test]
fn definite_difference_beats_unknown_elements() {
    let a = Value::list(Type::Number, vec![Value::int(1), Value::unknown(Type::Number)]);
    let b = Value::list(Type::Number, vec![Value::int(2), Value::unknown(Type::Number)]);
    assert_eq!(a.equals(&b), Value::bool(false));

    let c = Value::list(Type::Number, vec![Value::int(1), Value::int(5)]);
    assert!(!a.equals(&c).is_known());
}

#[test]
fn sets_with_unknowns_are_unknown() {
    let a = Value::set(Type::Number, vec![Value::unknown(Type::Number)]);
    let b = Value::set(Type::Number, vec![Value::int(1)]);
    assert!(!a.equals(&b).is_known());

    let c = Value::set(Type::Number, vec![Value::int(1)]);
    assert_eq!(b.equals(&c), Value::bool(true));
}

#[test]
fn maps_compare_keys_then_values() {
    let a = Value::map(Type::String, [("k", Value::string("v"))]);
    let b = Value::map(Type::String, [("j", Value::string("v"))]);
    assert_eq!(a.equals(&b), Value::bool(false));
    assert_eq!(a.equals(&a.clone()), Value::bool(true));
}

#[test]
fn result_carries_operand_marks() {
    let a = Value::string("x").mark(Mark::SENSITIVE);
    let r = a.equals(&Value::string("x"));
    assert_eq!(r.as_bool(), Some(true));
    assert!(r.has_mark(&Mark::SENSITIVE));
}
