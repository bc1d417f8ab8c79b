use super::*;
use crate::param::Allow;
use pretty_assertions::assert_eq;

fn noop(_: &CallContext, _: &[Value], ty: &Type) -> Result<Value, FuncError> {
    Ok(Value::null(ty.clone()))
}

#[test]
fn builder_collects_params() {
    let f = Function::returning("f", Type::String, noop)
        .with_param(Param::new("a", Type::Number))
        .with_var_param(Param::new("rest", Type::String).allowing(Allow::NULL))
        .with_description("test function")
        .not_null();

    assert_eq!(f.name(), "f");
    assert_eq!(f.params().len(), 1);
    assert!(f.var_param().unwrap().allows(Allow::NULL));
    assert!(f.is_not_null());
    assert_eq!(f.static_return_type(), Some(&Type::String));
    assert_eq!(format!("{f:?}"), "f(a: number, rest...: string)");
}

#[test]
fn param_for_falls_back_to_var_param() {
    let f = Function::returning("f", Type::Bool, noop)
        .with_param(Param::new("first", Type::Number))
        .with_var_param(Param::new("more", Type::Number));
    assert_eq!(f.param_for(0).unwrap().name, "first");
    assert_eq!(f.param_for(5).unwrap().name, "more");

    let g = Function::returning("g", Type::Bool, noop);
    assert!(g.param_for(0).is_none());
}
