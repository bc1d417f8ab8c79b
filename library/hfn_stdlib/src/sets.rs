//! Set algebra over sets with unifiable element types.
//!
//! Every operation shares one return type rule and one body: the inputs are
//! converted to the unified set type and folded left to right. Only union
//! tolerates unknown elements; the others return an unknown set unless every
//! input is wholly known, since resolving an unknown element later could
//! change membership.

use hfn_function::{Allow, CallContext, FuncError, Function, Param};
use hfn_value::{convert, set, Repr, Type, Value};

use crate::helpers::{elem_type, unify_args};
use crate::table::FunctionTable;

type SetOp = fn(&[Value], &[Value]) -> Vec<Value>;

fn set_param(name: &'static str) -> Param {
    Param::new(name, Type::set(Type::Dynamic)).allowing(Allow::DYNAMIC_TYPE)
}

/// Unified set type of the arguments. Known empty sets of dynamic element
/// type place no constraint.
fn set_operation_type(args: &[Value]) -> Result<Type, FuncError> {
    let elem_types: Vec<(usize, Type)> = args
        .iter()
        .enumerate()
        .filter_map(|(i, arg)| {
            let ty = elem_type(arg.ty());
            let empty_literal = ty.is_dynamic() && arg.element_count() == Some(0);
            (!empty_literal).then_some((i, ty))
        })
        .collect();

    if elem_types.is_empty() {
        return Ok(Type::set(Type::Dynamic));
    }
    unify_args(&elem_types, "given sets must all have compatible element types").map(Type::set)
}

fn apply(args: &[Value], ret: &Type, op: SetOp, allow_unknowns: bool) -> Result<Value, FuncError> {
    let mut acc: Option<Vec<Value>> = None;
    for (i, arg) in args.iter().enumerate() {
        let arg = convert(arg, ret).map_err(|e| FuncError::from(e).at_arg(i))?;
        if !allow_unknowns && !arg.is_wholly_known() {
            return Ok(Value::unknown(ret.clone()));
        }
        let elems = match arg.repr() {
            Repr::Known(..) => arg.elements().unwrap_or_default(),
            Repr::Unknown { .. } => return Ok(Value::unknown(ret.clone())),
            Repr::Null(_) => &[],
        };
        acc = Some(match acc {
            None => elems.to_vec(),
            Some(acc) => op(&acc, elems),
        });
    }
    Ok(Value::set(elem_type(ret), acc.unwrap_or_default()))
}

macro_rules! set_function {
    ($(#[$doc:meta])* $name:ident, $op:path, $allow_unknowns:expr) => {
        $(#[$doc])*
        pub fn $name() -> Function {
            fn body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
                apply(args, ret, $op, $allow_unknowns)
            }
            Function::resolving(stringify!($name), set_operation_type, body)
                .with_param(set_param("first_set"))
                .with_var_param(set_param("other_sets"))
                .not_null()
        }
    };
}

set_function!(
    /// Elements present in any of the sets.
    setunion, set::union, true
);
set_function!(
    /// Elements present in every set.
    setintersection, set::intersection, false
);
set_function!(
    /// Elements present in an odd number of the sets.
    setsymmetricdifference, set::symmetric_difference, false
);
set_function!(
    /// Elements of the first set not present in any of the others.
    compliment, set::subtract, false
);

/// Elements of `a` not present in `b`.
pub fn setsubtract() -> Function {
    fn body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
        apply(args, ret, set::subtract, false)
    }
    Function::resolving("setsubtract", set_operation_type, body)
        .with_param(set_param("a"))
        .with_param(set_param("b"))
        .not_null()
}

pub(crate) fn register(table: &mut FunctionTable) {
    table.insert(setunion());
    table.insert(setintersection());
    table.insert(setsubtract());
    table.insert(setsymmetricdifference());
    table.insert(compliment());
}
