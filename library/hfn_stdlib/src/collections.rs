//! Functions over lists, sets, tuples, maps and objects.
//!
//! Sequence functions accept both lists and tuples. A list argument keeps
//! its list type in the result; a tuple argument produces a tuple whose
//! element types follow the elements.

use std::collections::BTreeMap;

use hfn_function::{
    argument_error, incompatible_types, Allow, CallContext, FuncError, Function, Param,
};
use hfn_value::{convert, unify_unsafe, Type, Value};

use crate::helpers::{elem_type, int_arg, num_arg, str_arg, unify_args};
use crate::table::FunctionTable;

/// Convert every element to `ty`, attributing failures to argument `arg`.
fn convert_elems(elems: &[Value], ty: &Type, arg: usize) -> Result<Vec<Value>, FuncError> {
    elems
        .iter()
        .map(|e| convert(e, ty).map_err(|err| FuncError::from(err).at_arg(arg)))
        .collect()
}

/// Rebuild a sequence of the same kind as `ty` from `elems`.
fn sequence_like(ty: &Type, elems: Vec<Value>) -> Value {
    match ty {
        Type::List(e) => Value::list((**e).clone(), elems),
        _ => Value::tuple(elems),
    }
}

fn require_sequence(arg: &Value, index: usize) -> Result<(), FuncError> {
    let ty = arg.ty();
    if ty.is_list() || ty.is_tuple() {
        Ok(())
    } else {
        Err(argument_error(format!(
            "argument must be a list or tuple, not {}",
            ty.friendly_name()
        ))
        .at_arg(index))
    }
}

// concat

fn concat_type(args: &[Value]) -> Result<Type, FuncError> {
    if args.is_empty() {
        return Err(argument_error("at least one argument is required"));
    }
    for (i, arg) in args.iter().enumerate() {
        if !(arg.ty().is_list() || arg.ty().is_tuple()) {
            return Err(argument_error(format!(
                "all arguments must be lists or tuples; got {}",
                arg.ty().friendly_name()
            ))
            .at_arg(i));
        }
    }

    if args.iter().all(|a| a.ty().is_list()) {
        let elems: Vec<Type> = args.iter().map(|a| elem_type(a.ty())).collect();
        if let Some(e) = unify_unsafe(&elems) {
            return Ok(Type::list(e));
        }
    }

    let mut elems = Vec::new();
    for arg in args {
        match arg.ty() {
            Type::Tuple(es) => elems.extend(es.iter().cloned()),
            _ => match arg.elements() {
                Some(es) => elems.extend(es.iter().map(|e| e.ty().clone())),
                None => return Ok(Type::Dynamic),
            },
        }
    }
    Ok(Type::Tuple(elems))
}

fn concat_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let mut out = Vec::new();
    for (i, arg) in args.iter().enumerate() {
        let elems = arg.elements().unwrap_or_default();
        match ret {
            Type::List(e) => out.extend(convert_elems(elems, e, i)?),
            _ => out.extend(elems.iter().cloned()),
        }
    }
    Ok(sequence_like(ret, out))
}

/// Join sequences end to end.
pub fn concat() -> Function {
    Function::resolving("concat", concat_type, concat_body)
        .with_var_param(Param::new("seqs", Type::Dynamic))
        .not_null()
}

// contains

fn contains_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let ty = args[0].ty();
    if !(ty.is_list() || ty.is_set() || ty.is_tuple()) {
        return Err(argument_error(format!(
            "argument must be list, tuple, or set, not {}",
            ty.friendly_name()
        ))
        .at_arg(0));
    }

    let mut saw_unknown = false;
    for e in args[0].elements().unwrap_or_default() {
        match e.equals(&args[1]).as_bool() {
            Some(true) => return Ok(Value::bool(true)),
            Some(false) => {}
            None => saw_unknown = true,
        }
    }
    Ok(if saw_unknown {
        Value::unknown(Type::Bool)
    } else {
        Value::bool(false)
    })
}

/// Whether a sequence or set holds an element equal to `value`.
pub fn contains() -> Function {
    Function::returning("contains", Type::Bool, contains_body)
        .with_param(Param::new("list", Type::Dynamic))
        .with_param(Param::new("value", Type::Dynamic))
        .not_null()
}

// distinct / compact / reverse / sort

fn distinct_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let list = &args[0];
    if !list.is_wholly_known() {
        return Ok(Value::unknown(ret.clone()));
    }
    let mut out: Vec<Value> = Vec::new();
    for e in list.elements().unwrap_or_default() {
        if !out.iter().any(|seen| seen.equals(e).as_bool() == Some(true)) {
            out.push(e.clone());
        }
    }
    Ok(Value::list(elem_type(ret), out))
}

fn same_as_first(args: &[Value]) -> Result<Type, FuncError> {
    Ok(args[0].ty().clone())
}

/// The list without repeated elements, keeping first occurrences.
pub fn distinct() -> Function {
    Function::resolving("distinct", same_as_first, distinct_body)
        .with_param(Param::new("list", Type::list(Type::Dynamic)))
        .not_null()
}

fn compact_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let list = &args[0];
    if !list.is_wholly_known() {
        return Ok(Value::unknown(ret.clone()));
    }
    let kept = list
        .elements()
        .unwrap_or_default()
        .iter()
        .filter(|e| !e.is_null() && e.as_str() != Some(""))
        .cloned()
        .collect();
    Ok(Value::list(Type::String, kept))
}

/// The list without null or empty strings.
pub fn compact() -> Function {
    Function::returning("compact", Type::list(Type::String), compact_body)
        .with_param(Param::new("list", Type::list(Type::String)))
        .not_null()
}

fn reverse_type(args: &[Value]) -> Result<Type, FuncError> {
    require_sequence(&args[0], 0)?;
    Ok(match args[0].ty() {
        Type::Tuple(es) => Type::Tuple(es.iter().rev().cloned().collect()),
        other => other.clone(),
    })
}

fn reverse_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let elems = args[0].elements().unwrap_or_default().iter().rev().cloned().collect();
    Ok(sequence_like(ret, elems))
}

pub fn reverse() -> Function {
    Function::resolving("reverse", reverse_type, reverse_body)
        .with_param(Param::new("list", Type::Dynamic))
        .not_null()
}

fn sort_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let list = &args[0];
    if !list.is_wholly_known() {
        return Ok(Value::unknown(ret.clone()));
    }
    let mut strings = Vec::new();
    for (i, e) in list.elements().unwrap_or_default().iter().enumerate() {
        let s = e.as_str().ok_or_else(|| {
            argument_error(format!(
                "given list element {i} is null; a null string cannot be sorted"
            ))
            .at_arg(0)
        })?;
        strings.push(s.to_owned());
    }
    strings.sort();
    Ok(Value::string_list(strings))
}

/// Lexicographically sorted strings.
pub fn sort() -> Function {
    Function::returning("sort", Type::list(Type::String), sort_body)
        .with_param(Param::new("list", Type::list(Type::String)))
        .not_null()
}

// element / slice

fn element_type_of(args: &[Value]) -> Result<Type, FuncError> {
    require_sequence(&args[0], 0)?;
    match args[0].ty() {
        Type::Tuple(es) => {
            let (Some(index), false) = (args[1].as_int(), es.is_empty()) else {
                return Ok(Type::Dynamic);
            };
            if index < 0 {
                return Ok(Type::Dynamic);
            }
            let i = usize::try_from(index).unwrap_or(usize::MAX) % es.len();
            Ok(es[i].clone())
        }
        other => Ok(elem_type(other)),
    }
}

fn element_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let elems = args[0].elements().unwrap_or_default();
    if elems.is_empty() {
        return Err(argument_error("cannot use element function with an empty list").at_arg(0));
    }
    let index = int_arg(args, 1)?;
    let Ok(index) = usize::try_from(index) else {
        return Err(argument_error("cannot use element function with a negative index").at_arg(1));
    };
    Ok(elems[index % elems.len()].clone())
}

/// The element at `index`, wrapping around past the end.
pub fn element() -> Function {
    Function::resolving("element", element_type_of, element_body)
        .with_param(Param::new("list", Type::Dynamic))
        .with_param(Param::new("index", Type::Number))
}

fn slice_bounds(args: &[Value], len: Option<usize>) -> Result<(usize, usize), FuncError> {
    let start = int_arg(args, 1)?;
    let end = int_arg(args, 2)?;
    let start = usize::try_from(start)
        .map_err(|_| argument_error("start index must not be less than zero").at_arg(1))?;
    let end = usize::try_from(end)
        .map_err(|_| argument_error("end index must not be less than zero").at_arg(2))?;
    if len.is_some_and(|len| end > len) {
        return Err(
            argument_error("end index must not be greater than the length of the list").at_arg(2),
        );
    }
    if start > end {
        return Err(argument_error("start index must not be greater than end index").at_arg(1));
    }
    Ok((start, end))
}

fn slice_type(args: &[Value]) -> Result<Type, FuncError> {
    require_sequence(&args[0], 0)?;
    match args[0].ty() {
        Type::Tuple(es) => {
            if !args[1].is_known() || !args[2].is_known() {
                return Ok(Type::Dynamic);
            }
            let (start, end) = slice_bounds(args, Some(es.len()))?;
            Ok(Type::Tuple(es[start..end].to_vec()))
        }
        other => Ok(other.clone()),
    }
}

fn slice_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let elems = args[0].elements().unwrap_or_default();
    let (start, end) = slice_bounds(args, Some(elems.len()))?;
    Ok(sequence_like(ret, elems[start..end].to_vec()))
}

/// Elements from `start_index` up to but excluding `end_index`.
pub fn slice() -> Function {
    Function::resolving("slice", slice_type, slice_body)
        .with_param(Param::new("list", Type::Dynamic))
        .with_param(Param::new("start_index", Type::Number))
        .with_param(Param::new("end_index", Type::Number))
        .not_null()
}

// flatten

fn flatten_into(elems: &[Value], out: &mut Vec<Value>) {
    for e in elems {
        let ty = e.ty();
        match e.elements() {
            Some(inner) if ty.is_list() || ty.is_set() || ty.is_tuple() => flatten_into(inner, out),
            _ => out.push(e.clone()),
        }
    }
}

fn flatten_type(args: &[Value]) -> Result<Type, FuncError> {
    let ty = args[0].ty();
    if !(ty.is_list() || ty.is_set() || ty.is_tuple()) {
        return Err(argument_error(format!(
            "can only flatten lists, sets and tuples, not {}",
            ty.friendly_name()
        ))
        .at_arg(0));
    }
    if !args[0].is_wholly_known() {
        return Ok(Type::Dynamic);
    }
    let mut flat = Vec::new();
    flatten_into(args[0].elements().unwrap_or_default(), &mut flat);
    Ok(Type::Tuple(flat.iter().map(|e| e.ty().clone()).collect()))
}

fn flatten_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    if !args[0].is_wholly_known() {
        return Ok(Value::unknown(ret.clone()));
    }
    let mut flat = Vec::new();
    flatten_into(args[0].elements().unwrap_or_default(), &mut flat);
    Ok(Value::tuple(flat))
}

/// Replace nested sequences by their elements, recursively.
pub fn flatten() -> Function {
    Function::resolving("flatten", flatten_type, flatten_body)
        .with_param(Param::new("list", Type::Dynamic))
        .not_null()
}

// keys / values / lookup

fn require_mapping(arg: &Value, index: usize) -> Result<(), FuncError> {
    let ty = arg.ty();
    if ty.is_map() || ty.is_object() {
        Ok(())
    } else {
        Err(argument_error(format!(
            "must have map or object type, not {}",
            ty.friendly_name()
        ))
        .at_arg(index))
    }
}

fn keys_type(args: &[Value]) -> Result<Type, FuncError> {
    require_mapping(&args[0], 0)?;
    Ok(match args[0].ty() {
        Type::Object(attrs) => Type::Tuple(vec![Type::String; attrs.len()]),
        _ => Type::list(Type::String),
    })
}

fn keys_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let keys = args[0]
        .entries()
        .into_iter()
        .flatten()
        .map(|(k, _)| Value::string(k.as_str()))
        .collect();
    Ok(sequence_like(ret, keys))
}

/// Keys of a map or attribute names of an object, in lexical order.
pub fn keys() -> Function {
    Function::resolving("keys", keys_type, keys_body)
        .with_param(Param::new("inputMap", Type::Dynamic))
        .not_null()
}

fn values_type(args: &[Value]) -> Result<Type, FuncError> {
    require_mapping(&args[0], 0)?;
    Ok(match args[0].ty() {
        Type::Object(attrs) => Type::Tuple(attrs.values().cloned().collect()),
        other => Type::list(elem_type(other)),
    })
}

fn values_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let values = args[0]
        .entries()
        .into_iter()
        .flatten()
        .map(|(_, v)| v.clone())
        .collect();
    Ok(sequence_like(ret, values))
}

/// Values of a map or object, in key order.
pub fn values() -> Function {
    Function::resolving("values", values_type, values_body)
        .with_param(Param::new("mapping", Type::Dynamic))
        .not_null()
}

fn lookup_type(args: &[Value]) -> Result<Type, FuncError> {
    if args.len() > 3 {
        return Err(argument_error("lookup() with too many arguments").at_arg(3));
    }
    require_mapping(&args[0], 0)?;
    let default = args.get(2).map(|d| d.ty().clone());
    match args[0].ty() {
        Type::Map(e) => match default {
            Some(d) => unify_unsafe(&[(**e).clone(), d]).ok_or_else(|| {
                incompatible_types("the default value must have the same type as the map elements")
            }),
            None => Ok((**e).clone()),
        },
        Type::Object(attrs) => {
            let attr = args[1].as_str().and_then(|k| attrs.get(k)).cloned();
            Ok(attr.or(default).unwrap_or(Type::Dynamic))
        }
        _ => Ok(Type::Dynamic),
    }
}

fn lookup_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let key = str_arg(args, 1)?;
    let found = args[0].entries().and_then(|es| es.get(key));
    let (value, index) = match (found, args.get(2)) {
        (Some(v), _) => (v, 0),
        (None, Some(default)) => (default, 2),
        (None, None) => {
            return Err(argument_error(format!("lookup failed to find key {key:?}")).at_arg(1))
        }
    };
    convert(value, ret).map_err(|e| FuncError::from(e).at_arg(index))
}

/// The value at `key`, or the default when the key is absent.
pub fn lookup() -> Function {
    Function::resolving("lookup", lookup_type, lookup_body)
        .with_param(Param::new("inputMap", Type::Dynamic))
        .with_param(Param::new("key", Type::String))
        .with_var_param(
            Param::new("default", Type::Dynamic)
                .allowing(Allow::NULL | Allow::UNKNOWN | Allow::DYNAMIC_TYPE),
        )
}

// coalesce / coalescelist

fn coalesce_type(args: &[Value]) -> Result<Type, FuncError> {
    if args.is_empty() {
        return Err(argument_error("at least one argument is required"));
    }
    let tys: Vec<(usize, Type)> = args.iter().map(|a| a.ty().clone()).enumerate().collect();
    unify_args(&tys, "all arguments must have the same type")
}

fn coalesce_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    for (i, arg) in args.iter().enumerate() {
        let arg = convert(arg, ret).map_err(|e| FuncError::from(e).at_arg(i))?;
        if !arg.is_known() {
            return Ok(Value::unknown(ret.clone()));
        }
        if arg.is_null() || arg.as_str() == Some("") {
            continue;
        }
        return Ok(arg);
    }
    Err(argument_error("no non-null, non-empty-string arguments"))
}

/// The first argument that is neither null nor an empty string.
pub fn coalesce() -> Function {
    Function::resolving("coalesce", coalesce_type, coalesce_body).with_var_param(
        Param::new("vals", Type::Dynamic)
            .allowing(Allow::NULL | Allow::UNKNOWN | Allow::DYNAMIC_TYPE),
    )
}

fn coalescelist_type(args: &[Value]) -> Result<Type, FuncError> {
    if args.is_empty() {
        return Err(argument_error("at least one argument is required"));
    }
    for (i, arg) in args.iter().enumerate() {
        if !(arg.ty().is_dynamic() || arg.ty().is_list() || arg.ty().is_tuple()) {
            return Err(argument_error(format!(
                "coalescelist arguments must be lists or tuples, got {}",
                arg.ty().friendly_name()
            ))
            .at_arg(i));
        }
    }
    let tys: Vec<Type> = args.iter().map(|a| a.ty().clone()).collect();
    Ok(unify_unsafe(&tys).unwrap_or(Type::Dynamic))
}

fn coalescelist_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    for (i, arg) in args.iter().enumerate() {
        if !arg.is_known() {
            return Ok(Value::unknown(ret.clone()));
        }
        if arg.element_count().unwrap_or(0) > 0 {
            return convert(arg, ret).map_err(|e| FuncError::from(e).at_arg(i));
        }
    }
    Err(argument_error("no non-null arguments"))
}

/// The first non-empty list.
pub fn coalescelist() -> Function {
    Function::resolving("coalescelist", coalescelist_type, coalescelist_body).with_var_param(
        Param::new("vals", Type::Dynamic).allowing(Allow::UNKNOWN | Allow::DYNAMIC_TYPE),
    )
}

// zipmap / chunklist / merge

fn zipmap_type(args: &[Value]) -> Result<Type, FuncError> {
    match args[1].ty() {
        Type::List(e) => Ok(Type::map((**e).clone())),
        Type::Tuple(es) => match args[0].elements() {
            Some(keys) if keys.iter().all(Value::is_known) => {
                let attrs: BTreeMap<String, Type> = keys
                    .iter()
                    .zip(es)
                    .filter_map(|(k, t)| Some((k.as_str()?.to_owned(), t.clone())))
                    .collect();
                Ok(Type::Object(attrs))
            }
            _ => Ok(Type::Dynamic),
        },
        other => Err(argument_error(format!(
            "values argument must be a list or tuple, not {}",
            other.friendly_name()
        ))
        .at_arg(1)),
    }
}

fn zipmap_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let keys = args[0].elements().unwrap_or_default();
    let values = args[1].elements().unwrap_or_default();
    if keys.len() != values.len() {
        return Err(argument_error(format!(
            "number of keys ({}) does not match number of values ({})",
            keys.len(),
            values.len()
        )));
    }
    if !keys.iter().all(Value::is_known) {
        return Ok(Value::unknown(ret.clone()));
    }

    let mut entries = BTreeMap::new();
    for (i, (k, v)) in keys.iter().zip(values).enumerate() {
        let key = k
            .as_str()
            .ok_or_else(|| argument_error(format!("key {i} is null")).at_arg(0))?;
        entries.insert(key.to_owned(), v.clone());
    }
    Ok(match ret {
        Type::Map(e) => Value::map((**e).clone(), entries),
        _ => Value::object(entries),
    })
}

/// A mapping built from a list of keys and a sequence of values.
pub fn zipmap() -> Function {
    Function::resolving("zipmap", zipmap_type, zipmap_body)
        .with_param(Param::new("keys", Type::list(Type::String)))
        .with_param(Param::new("values", Type::Dynamic))
        .not_null()
}

fn chunklist_type(args: &[Value]) -> Result<Type, FuncError> {
    Ok(Type::list(args[0].ty().clone()))
}

fn chunklist_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let size = int_arg(args, 1)?;
    let Ok(size) = usize::try_from(size) else {
        return Err(argument_error("the size argument must be positive").at_arg(1));
    };
    let list_ty = elem_type(ret);
    let item_ty = elem_type(&list_ty);
    let elems = args[0].elements().unwrap_or_default();

    let chunks = if size == 0 {
        vec![Value::list(item_ty, elems.to_vec())]
    } else {
        elems
            .chunks(size)
            .map(|chunk| Value::list(item_ty.clone(), chunk.to_vec()))
            .collect()
    };
    Ok(Value::list(list_ty, chunks))
}

/// Split a list into lists of at most `size` elements. A size of zero
/// yields the whole list as one chunk.
pub fn chunklist() -> Function {
    Function::resolving("chunklist", chunklist_type, chunklist_body)
        .with_param(Param::new("list", Type::list(Type::Dynamic)))
        .with_param(Param::new("size", Type::Number))
        .not_null()
}

fn merge_type(args: &[Value]) -> Result<Type, FuncError> {
    for (i, arg) in args.iter().enumerate() {
        if !(arg.ty().is_dynamic() || arg.ty().is_map() || arg.ty().is_object()) {
            return Err(argument_error(format!(
                "arguments must be maps or objects, got {}",
                arg.ty().friendly_name()
            ))
            .at_arg(i));
        }
    }
    let present: Vec<&Value> = args.iter().filter(|a| !a.is_null()).collect();

    if !present.is_empty() && present.iter().all(|a| a.ty().is_map()) {
        let elems: Vec<Type> = present.iter().map(|a| elem_type(a.ty())).collect();
        if let Some(e) = unify_unsafe(&elems) {
            return Ok(Type::map(e));
        }
    }

    let mut attrs = BTreeMap::new();
    for arg in present {
        match arg.ty() {
            Type::Object(a) => attrs.extend(a.iter().map(|(k, t)| (k.clone(), t.clone()))),
            _ => match arg.entries() {
                Some(es) => attrs.extend(es.iter().map(|(k, v)| (k.clone(), v.ty().clone()))),
                None => return Ok(Type::Dynamic),
            },
        }
    }
    Ok(Type::Object(attrs))
}

fn merge_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let mut entries = BTreeMap::new();
    for arg in args.iter().filter(|a| !a.is_null()) {
        for (k, v) in arg.entries().into_iter().flatten() {
            entries.insert(k.clone(), v.clone());
        }
    }
    match ret {
        Type::Map(e) => {
            let mut converted = BTreeMap::new();
            for (k, v) in entries {
                let v = convert(&v, e).map_err(FuncError::from)?;
                converted.insert(k, v);
            }
            Ok(Value::map((**e).clone(), converted))
        }
        _ => Ok(Value::object(entries)),
    }
}

/// Merge maps or objects; later arguments win. Null arguments are skipped.
pub fn merge() -> Function {
    Function::resolving("merge", merge_type, merge_body)
        .with_var_param(Param::new("maps", Type::Dynamic).allowing(Allow::NULL))
        .not_null()
}

// range

const MAX_RANGE: usize = 1024;

fn range_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let nums = (0..args.len())
        .map(|i| num_arg(args, i))
        .collect::<Result<Vec<f64>, FuncError>>()?;

    let (start, limit, step) = match nums[..] {
        [limit] => (0.0, limit, 1.0),
        [start, limit] => (start, limit, if start <= limit { 1.0 } else { -1.0 }),
        [start, limit, step] => (start, limit, step),
        _ => return Err(argument_error("must have one, two, or three arguments")),
    };

    if step == 0.0 {
        return Err(argument_error("step must not be zero").at_arg(2));
    }
    if start < limit && step < 0.0 {
        return Err(argument_error("step must be positive when start is less than limit").at_arg(2));
    }
    if start > limit && step > 0.0 {
        return Err(
            argument_error("step must be negative when start is greater than limit").at_arg(2),
        );
    }

    let mut out = Vec::new();
    let mut i = start;
    while (step > 0.0 && i < limit) || (step < 0.0 && i > limit) {
        if out.len() >= MAX_RANGE {
            return Err(argument_error(
                "more than 1024 values were generated; either decrease the difference between start and limit or use a smaller step",
            ));
        }
        out.push(Value::number(i));
        i += step;
    }
    Ok(Value::list(Type::Number, out))
}

/// Numbers from `start` up to but excluding `limit`, by `step`.
pub fn range() -> Function {
    Function::returning("range", Type::list(Type::Number), range_body)
        .with_var_param(Param::new("params", Type::Number))
        .not_null()
}

pub(crate) fn register(table: &mut FunctionTable) {
    table.insert(concat());
    table.insert(contains());
    table.insert(distinct());
    table.insert(compact());
    table.insert(element());
    table.insert(keys());
    table.insert(values());
    table.insert(lookup());
    table.insert(reverse());
    table.insert(flatten());
    table.insert(coalesce());
    table.insert(coalescelist());
    table.insert(zipmap());
    table.insert(chunklist());
    table.insert(range());
    table.insert(sort());
    table.insert(slice());
    table.insert(merge());
}
