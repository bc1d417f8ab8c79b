//! Explicit type conversion functions.
//!
//! Each accepts any value in any state. Null and unknown values convert to
//! null and unknown of the target type, and marks pass through untouched.

use hfn_function::{argument_error, Allow, CallContext, FuncError, Function, Param};
use hfn_value::{conversion_type, convert, ConversionErrorKind, Type, Value};

use crate::table::FunctionTable;

/// Result type of converting `arg` to `target`.
fn target_type(arg: &Value, target: &Type) -> Result<Type, FuncError> {
    let from = arg.ty();
    if from.is_dynamic() {
        return Ok(target.clone());
    }
    conversion_type(from, target).ok_or_else(|| {
        argument_error(format!("cannot convert {from} to {target}")).at_arg(0)
    })
}

fn convert_to(arg: &Value, ret: &Type) -> Result<Value, FuncError> {
    convert(arg, ret).map_err(|err| {
        let message = match (&err.kind, arg.as_str()) {
            (ConversionErrorKind::InvalidNumber, Some(s)) if err.path.is_empty() => format!(
                "cannot convert {s:?} to number; given string must be a decimal representation of a number"
            ),
            (ConversionErrorKind::InvalidBool, Some(s)) if err.path.is_empty() => format!(
                "cannot convert {s:?} to bool; only the strings \"true\" or \"false\" are allowed"
            ),
            _ => format!("cannot convert {} to {ret}: {err}", arg.ty()),
        };
        argument_error(message).at_arg(0)
    })
}

macro_rules! to_function {
    ($(#[$doc:meta])* $name:ident, $target:expr) => {
        $(#[$doc])*
        pub fn $name() -> Function {
            fn resolve(args: &[Value]) -> Result<Type, FuncError> {
                target_type(&args[0], &$target)
            }
            fn body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
                convert_to(&args[0], ret)
            }
            Function::resolving(stringify!($name), resolve, body)
                .with_param(Param::new("v", Type::Dynamic).allowing(Allow::all()))
        }
    };
}

to_function!(tostring, Type::String);
to_function!(tonumber, Type::Number);
to_function!(tobool, Type::Bool);
to_function!(
    /// Convert to a list; the element type follows the input.
    tolist,
    Type::list(Type::Dynamic)
);
to_function!(
    /// Convert to a set; duplicates collapse.
    toset,
    Type::set(Type::Dynamic)
);
to_function!(tomap, Type::map(Type::Dynamic));

pub(crate) fn register(table: &mut FunctionTable) {
    table.insert(tostring());
    table.insert(tonumber());
    table.insert(tobool());
    table.insert(tolist());
    table.insert(toset());
    table.insert(tomap());
}

#[cfg(test)]
mod tests;
