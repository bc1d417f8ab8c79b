//! Argument accessors shared by function bodies.
//!
//! The call engine has already converted every argument to its parameter
//! type, so a failure here means the body accepted a null or unknown it did
//! not handle, or the argument is a number outside the accepted domain.

use hfn_function::{argument_error, incompatible_types, internal, FuncError};
use hfn_value::{unify_unsafe, Type, Value};

pub(crate) fn str_arg(args: &[Value], i: usize) -> Result<&str, FuncError> {
    args.get(i)
        .and_then(Value::as_str)
        .ok_or_else(|| internal(format!("argument {i} is not a known string")))
}

pub(crate) fn num_arg(args: &[Value], i: usize) -> Result<f64, FuncError> {
    args.get(i)
        .and_then(Value::as_number)
        .ok_or_else(|| internal(format!("argument {i} is not a known number")))
}

/// A number argument that must be whole.
pub(crate) fn int_arg(args: &[Value], i: usize) -> Result<i64, FuncError> {
    let n = num_arg(args, i)?;
    args[i]
        .as_int()
        .ok_or_else(|| argument_error(format!("{n} is not a whole number")).at_arg(i))
}

/// Element type of a collection return type.
pub(crate) fn elem_type(ty: &Type) -> Type {
    ty.element_type().cloned().unwrap_or(Type::Dynamic)
}

/// Unify argument types, each paired with its argument position.
///
/// On failure the error is attributed to the first argument whose type
/// cannot join the types before it, and names both sides.
pub(crate) fn unify_args(types: &[(usize, Type)], what: &str) -> Result<Type, FuncError> {
    let all: Vec<Type> = types.iter().map(|(_, ty)| ty.clone()).collect();
    if let Some(ty) = unify_unsafe(&all) {
        return Ok(ty);
    }
    for n in 1..all.len() {
        if unify_unsafe(&all[..=n]).is_some() {
            continue;
        }
        let (i, ty) = &types[n];
        let acc = unify_unsafe(&all[..n]).unwrap_or_else(|| all[0].clone());
        let message = format!("{what}: {acc} and {ty} are incompatible");
        return Err(incompatible_types(message).at_arg(*i));
    }
    Err(incompatible_types(what))
}
