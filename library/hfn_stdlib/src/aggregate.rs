//! Cross-collection algorithms: key matching, pivoting, aggregation and
//! lookups that inspect elements one by one.
//!
//! The scanning functions follow one rule for unknown elements: a definite
//! answer found by the scan wins, otherwise any unknown seen along the way
//! makes the result unknown.

use std::collections::BTreeMap;

use hfn_function::{
    argument_error, numeric_error, Allow, CallContext, FuncError,
    Function, Param,
};
use hfn_value::{convert, Repr, Type, Value};

use crate::helpers::{elem_type, unify_args};
use crate::table::FunctionTable;

// matchkeys

fn keys_and_searchset_type(args: &[Value]) -> Result<Type, FuncError> {
    let types = [(1, args[1].ty().clone()), (2, args[2].ty().clone())];
    unify_args(&types, "keys and searchset must be of the same type")
}

fn matchkeys_type(args: &[Value]) -> Result<Type, FuncError> {
    keys_and_searchset_type(args)?;
    Ok(args[0].ty().clone())
}

fn matchkeys_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let (values, keys, searchset) = (&args[0], &args[1], &args[2]);
    let out_elem = elem_type(ret);

    let value_elems = values.elements().unwrap_or_default();
    let key_elems = keys.elements().unwrap_or_default();
    if value_elems.len() != key_elems.len() {
        return Err(argument_error("length of keys and values should be equal"));
    }

    let common = keys_and_searchset_type(args)?;
    let keys = convert(keys, &common).map_err(|e| FuncError::from(e).at_arg(1))?;
    let searchset = convert(searchset, &common).map_err(|e| FuncError::from(e).at_arg(2))?;
    let search = searchset.elements().unwrap_or_default();

    if search.is_empty() {
        return Ok(Value::empty_list(out_elem));
    }
    if !values.is_wholly_known() || !keys.is_wholly_known() {
        return Ok(Value::unknown(ret.clone()));
    }

    let mut output = Vec::new();
    for (value, key) in value_elems.iter().zip(keys.elements().unwrap_or_default()) {
        for candidate in search {
            let eq = key.equals(candidate);
            match eq.as_bool() {
                Some(true) => {
                    output.push(value.clone());
                    break;
                }
                Some(false) => {}
                None => return Ok(Value::unknown(ret.clone())),
            }
        }
    }
    Ok(Value::list(out_elem, output))
}

/// Elements of `values` whose corresponding `keys` element occurs in
/// `searchset`, in their original order.
pub fn matchkeys() -> Function {
    Function::resolving("matchkeys", matchkeys_type, matchkeys_body)
        .with_param(Param::new("values", Type::list(Type::Dynamic)))
        .with_param(Param::new("keys", Type::list(Type::Dynamic)))
        .with_param(Param::new("searchset", Type::list(Type::Dynamic)))
        .not_null()
}

// transpose

fn transpose_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let input = &args[0];
    if !input.is_wholly_known() {
        return Ok(Value::unknown(ret.clone()));
    }

    let not_strings = || argument_error("input must be a map of lists of strings").at_arg(0);
    let mut pivot: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (outer, list) in input.entries().into_iter().flatten() {
        let inner = list.elements().ok_or_else(not_strings)?;
        for v in inner {
            let key = v.as_str().ok_or_else(not_strings)?;
            pivot.entry(key.to_owned()).or_default().push(outer.clone());
        }
    }

    let entries = pivot.into_iter().map(|(k, mut outers)| {
        outers.sort();
        (k, Value::string_list(outers))
    });
    Ok(Value::map(Type::list(Type::String), entries))
}

/// Swap keys and values of a map of lists of strings.
pub fn transpose() -> Function {
    Function::returning("transpose", Type::map(Type::list(Type::String)), transpose_body)
        .with_param(Param::new("values", Type::map(Type::list(Type::String))))
        .not_null()
}

// sum

fn sum_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let list = &args[0];
    let ty = list.ty();
    if !ty.can_iterate_elements() {
        return Err(argument_error("cannot sum noniterable").at_arg(0));
    }
    if list.element_count() == Some(0) {
        return Err(argument_error("cannot sum an empty list").at_arg(0));
    }
    if !(ty.is_list() || ty.is_set() || ty.is_tuple()) {
        return Err(argument_error(format!(
            "argument must be list, set, or tuple. Received {}",
            ty.friendly_name()
        ))
        .at_arg(0));
    }
    if !list.is_wholly_known() {
        return Ok(Value::unknown(Type::Number));
    }

    let not_numbers =
        || argument_error("argument must be list, set, or tuple of number values").at_arg(0);
    let mut numbers = Vec::new();
    for v in list.elements().unwrap_or_default() {
        if v.is_null() {
            return Err(not_numbers());
        }
        let n = convert(v, &Type::Number)
            .ok()
            .and_then(|n| n.as_number())
            .ok_or_else(not_numbers)?;
        numbers.push(n);
    }

    // Infinite inputs decide the result; finite terms cannot cancel them.
    let positive = numbers.iter().any(|n| n.is_infinite() && n.is_sign_positive());
    let negative = numbers.iter().any(|n| n.is_infinite() && n.is_sign_negative());
    let total = match (positive, negative) {
        (true, true) => return Err(numeric_error("can't compute sum of opposing infinities")),
        (true, false) => f64::INFINITY,
        (false, true) => f64::NEG_INFINITY,
        (false, false) => numbers.iter().sum(),
    };
    Ok(Value::number(total))
}

/// Sum of a list, set or tuple of numbers.
pub fn sum() -> Function {
    Function::returning("sum", Type::Number, sum_body)
        .with_param(Param::new("list", Type::Dynamic))
        .not_null()
}

// index

#[allow(clippy::cast_possible_wrap)]
fn index_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let ty = args[0].ty();
    if !(ty.is_list() || ty.is_tuple()) {
        return Err(argument_error("argument must be a list or tuple").at_arg(0));
    }
    let elems = args[0].elements().unwrap_or_default();
    if elems.is_empty() {
        return Err(argument_error("cannot search an empty list").at_arg(0));
    }
    for (i, e) in elems.iter().enumerate() {
        match e.equals(&args[1]).as_bool() {
            Some(true) => return Ok(Value::int(i as i64)),
            Some(false) => {}
            None => return Ok(Value::unknown(Type::Number)),
        }
    }
    Err(argument_error("item not found"))
}

/// Position of the first element equal to `value`.
pub fn index() -> Function {
    Function::returning("index", Type::Number, index_body)
        .with_param(Param::new("list", Type::Dynamic))
        .with_param(Param::new("value", Type::Dynamic))
}

// length

fn length_type(args: &[Value]) -> Result<Type, FuncError> {
    match args[0].ty() {
        Type::String
        | Type::List(_)
        | Type::Set(_)
        | Type::Map(_)
        | Type::Tuple(_)
        | Type::Object(_)
        | Type::Dynamic => Ok(Type::Number),
        _ => Err(
            argument_error("argument must be a string, a collection type, or a structural type")
                .at_arg(0),
        ),
    }
}

#[allow(clippy::cast_possible_wrap)]
fn length_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let v = &args[0];
    let n = match v.ty() {
        Type::Dynamic => return Ok(Value::unknown(Type::Number)),
        Type::Tuple(elems) => elems.len(),
        Type::Object(attrs) => attrs.len(),
        Type::String => match v.as_str() {
            Some(s) => s.chars().count(),
            None => return Ok(Value::unknown(Type::Number)),
        },
        _ => match v.element_count() {
            Some(n) => n,
            None => return Ok(Value::unknown(Type::Number)),
        },
    };
    Ok(Value::int(n as i64))
}

/// Number of characters in a string, or elements in a collection.
/// Structural types report their length even when unknown.
pub fn length() -> Function {
    Function::resolving("length", length_type, length_body).with_param(
        Param::new("value", Type::Dynamic).allowing(Allow::UNKNOWN | Allow::DYNAMIC_TYPE),
    )
}

// alltrue / anytrue

fn alltrue_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let mut saw_unknown = false;
    for v in args[0].elements().unwrap_or_default() {
        match v.repr() {
            Repr::Unknown { .. } => saw_unknown = true,
            Repr::Null(_) => return Ok(Value::bool(false)),
            Repr::Known(..) => {
                if v.as_bool() == Some(false) {
                    return Ok(Value::bool(false));
                }
            }
        }
    }
    Ok(if saw_unknown {
        Value::unknown(Type::Bool)
    } else {
        Value::bool(true)
    })
}

/// Whether every element is true. Empty lists are all true; null elements
/// count as false.
pub fn alltrue() -> Function {
    Function::returning("alltrue", Type::Bool, alltrue_body)
        .with_param(Param::new("list", Type::list(Type::Bool)))
}

fn anytrue_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let mut saw_unknown = false;
    for v in args[0].elements().unwrap_or_default() {
        match v.repr() {
            Repr::Unknown { .. } => saw_unknown = true,
            Repr::Null(_) => {}
            Repr::Known(..) => {
                if v.as_bool() == Some(true) {
                    return Ok(Value::bool(true));
                }
            }
        }
    }
    Ok(if saw_unknown {
        Value::unknown(Type::Bool)
    } else {
        Value::bool(false)
    })
}

/// Whether any element is true. Null elements are skipped.
pub fn anytrue() -> Function {
    Function::returning("anytrue", Type::Bool, anytrue_body)
        .with_param(Param::new("list", Type::list(Type::Bool)))
}

pub(crate) fn register(table: &mut FunctionTable) {
    table.insert(matchkeys());
    table.insert(transpose());
    table.insert(sum());
    table.insert(index());
    table.insert(length());
    table.insert(alltrue());
    table.insert(anytrue());
}

#[cfg(test)]
mod tests;
