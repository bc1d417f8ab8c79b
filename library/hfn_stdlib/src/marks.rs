//! Mark functions: the only functions that change a value's marks.
//!
//! Each accepts any value in any state (known, unknown, null, any type) and
//! works the same way for all of them.

use hfn_function::{Allow, CallContext, FuncError, Function, Param};
use hfn_value::{Mark, Type, Value};

use crate::table::FunctionTable;

/// Add `mark`, keeping existing marks.
pub fn attach(value: Value, mark: Mark) -> Value {
    value.mark(mark)
}

/// Remove `mark`, keeping all other marks.
pub fn detach(value: Value, mark: &Mark) -> Value {
    value.without_mark(mark)
}

/// Whether `value` carries `mark`. The value is not altered.
pub fn query(value: &Value, mark: &Mark) -> bool {
    value.has_mark(mark)
}

fn any_value() -> Param {
    Param::new("value", Type::Dynamic).allowing(Allow::all())
}

fn same_type(args: &[Value]) -> Result<Type, FuncError> {
    Ok(args[0].ty().clone())
}

pub fn sensitive() -> Function {
    fn body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
        Ok(attach(args[0].clone(), Mark::SENSITIVE))
    }
    Function::resolving("sensitive", same_type, body)
        .with_param(any_value())
        .with_description("Marks a value as sensitive.")
}

pub fn nonsensitive() -> Function {
    fn body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
        Ok(detach(args[0].clone(), &Mark::SENSITIVE))
    }
    Function::resolving("nonsensitive", same_type, body)
        .with_param(any_value())
        .with_description("Removes the sensitive mark from a value.")
}

pub fn issensitive() -> Function {
    fn body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
        Ok(Value::bool(query(&args[0], &Mark::SENSITIVE)))
    }
    Function::returning("issensitive", Type::Bool, body)
        .with_param(any_value())
        .with_description("Reports whether a value is marked sensitive.")
}

pub(crate) fn register(table: &mut FunctionTable) {
    table.insert(sensitive());
    table.insert(nonsensitive());
    table.insert(issensitive());
}

#[cfg(test)]
mod tests;
