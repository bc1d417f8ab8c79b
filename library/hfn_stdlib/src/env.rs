//! Environment lookup through the call context.

use hfn_function::{Allow, CallContext, FuncError, Function, Param};
use hfn_value::{Type, Value};
use tracing::trace;

use crate::table::FunctionTable;

fn env_body(ctx: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let key = &args[0];
    let Some(name) = key.as_str() else {
        return Ok(Value::unknown(Type::String).with_marks(key.marks()));
    };
    let value = ctx.env_var(name);
    trace!(key = name, found = value.is_some(), "env lookup");
    Ok(Value::string(value.unwrap_or_default()).with_marks(key.marks()))
}

/// Read an environment variable. Unset variables read as the empty string.
pub fn env() -> Function {
    Function::returning("env", Type::String, env_body)
        .with_param(
            Param::new("key", Type::String)
                .allowing(Allow::UNKNOWN | Allow::MARKED)
                .with_description("Environment variable name"),
        )
        .with_description("Read environment variable, return empty string if the variable is not set.")
        .not_null()
}

pub(crate) fn register(table: &mut FunctionTable) {
    table.insert(env());
}
