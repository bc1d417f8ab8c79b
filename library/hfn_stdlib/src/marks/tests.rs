use super::*;
use pretty_assertions::assert_eq;

fn states() -> Vec<Value> {
    vec![
        Value::string("secret"),
        Value::unknown(Type::String),
        Value::null(Type::list(Type::Number)),
        Value::dynamic(),
    ]
}

#[test]
fn sensitive_keeps_type_and_prior_marks() {
    let ctx = CallContext::new();
    for v in states() {
        let ty = v.ty().clone();
        let input = v.mark(Mark::new("pii"));
        let out = sensitive().call(&ctx, vec![input]).unwrap();
        assert_eq!(out.ty(), &ty);
        assert!(out.has_mark(&Mark::SENSITIVE));
        assert!(out.has_mark(&Mark::new("pii")));
    }
}

#[test]
fn nonsensitive_removes_only_sensitive() {
    let ctx = CallContext::new();
    for v in states() {
        let input = v.mark(Mark::SENSITIVE).mark(Mark::new("pii"));
        let out = nonsensitive().call(&ctx, vec![input]).unwrap();
        assert!(!out.has_mark(&Mark::SENSITIVE));
        assert!(out.has_mark(&Mark::new("pii")));
    }
}

#[test]
fn issensitive_is_known_for_every_state() {
    let ctx = CallContext::new();
    for v in states() {
        let out = issensitive().call(&ctx, vec![v.clone()]).unwrap();
        assert_eq!(out, Value::bool(false));
        let out = issensitive()
            .call(&ctx, vec![v.mark(Mark::SENSITIVE)])
            .unwrap();
        assert_eq!(out, Value::bool(true));
    }
}

#[test]
fn generic_helpers_work_for_any_mark() {
    let m = Mark::new("custom");
    let v = attach(Value::int(1), m.clone());
    assert!(query(&v, &m));
    let v = detach(v, &m);
    assert!(!query(&v, &m));
    assert_eq!(v, Value::int(1));
}
