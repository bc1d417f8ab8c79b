//! String functions, including the regular expression family.
//!
//! Lengths and offsets count Unicode scalar values.

use std::collections::BTreeMap;

use hfn_function::{argument_error, CallContext, FuncError, Function, ImplFn, Param};
use hfn_value::{Type, Value};
use regex::Regex;

use crate::helpers::{int_arg, str_arg};
use crate::table::FunctionTable;

macro_rules! string_function {
    ($(#[$doc:meta])* $name:ident, $op:expr) => {
        $(#[$doc])*
        pub fn $name() -> Function {
            fn body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
                let op: fn(&str) -> String = $op;
                Ok(Value::string(op(str_arg(args, 0)?)))
            }
            Function::returning(stringify!($name), Type::String, body)
                .with_param(Param::new("str", Type::String))
                .not_null()
        }
    };
}

string_function!(upper, str::to_uppercase);
string_function!(lower, str::to_lowercase);
string_function!(
    /// Remove leading and trailing whitespace.
    trimspace,
    |s| s.trim().to_owned()
);
string_function!(
    /// Remove every trailing newline sequence.
    chomp,
    |s| s.trim_end_matches(['\r', '\n']).to_owned()
);
string_function!(
    /// Reverse the characters of a string.
    strrev,
    |s| s.chars().rev().collect()
);
string_function!(
    /// Uppercase the first letter of each word.
    title,
    title_case
);

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    out
}

// Two-string operations

fn pair_function(
    name: &'static str,
    second: &'static str,
    ret: Type,
    body: ImplFn,
) -> Function {
    Function::returning(name, ret, body)
        .with_param(Param::new("str", Type::String))
        .with_param(Param::new(second, Type::String))
        .not_null()
}

/// Remove every character of `cutset` from both ends.
pub fn trim() -> Function {
    fn body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
        let cutset = str_arg(args, 1)?;
        let out = str_arg(args, 0)?.trim_matches(|c: char| cutset.contains(c));
        Ok(Value::string(out))
    }
    pair_function("trim", "cutset", Type::String, body)
}

pub fn trimprefix() -> Function {
    fn body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
        let (s, prefix) = (str_arg(args, 0)?, str_arg(args, 1)?);
        Ok(Value::string(s.strip_prefix(prefix).unwrap_or(s)))
    }
    pair_function("trimprefix", "prefix", Type::String, body)
}

pub fn trimsuffix() -> Function {
    fn body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
        let (s, suffix) = (str_arg(args, 0)?, str_arg(args, 1)?);
        Ok(Value::string(s.strip_suffix(suffix).unwrap_or(s)))
    }
    pair_function("trimsuffix", "suffix", Type::String, body)
}

pub fn startswith() -> Function {
    fn body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
        Ok(Value::bool(str_arg(args, 0)?.starts_with(str_arg(args, 1)?)))
    }
    pair_function("startswith", "prefix", Type::Bool, body)
}

pub fn endswith() -> Function {
    fn body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
        Ok(Value::bool(str_arg(args, 0)?.ends_with(str_arg(args, 1)?)))
    }
    pair_function("endswith", "suffix", Type::Bool, body)
}

pub fn strcontains() -> Function {
    fn body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
        Ok(Value::bool(str_arg(args, 0)?.contains(str_arg(args, 1)?)))
    }
    pair_function("strcontains", "substr", Type::Bool, body)
}

// Regular expressions

fn compile(pattern: &str, index: usize) -> Result<Regex, FuncError> {
    Regex::new(pattern).map_err(|e| {
        argument_error(format!("invalid regular expression pattern: {e}")).at_arg(index)
    })
}

/// Shape of a single match: the whole match, a list of the unnamed
/// groups, or an object of the named groups.
fn match_type(re: &Regex) -> Result<Type, FuncError> {
    let groups: Vec<Option<&str>> = re.capture_names().skip(1).collect();
    let named = groups.iter().filter(|g| g.is_some()).count();
    if groups.is_empty() {
        Ok(Type::String)
    } else if named == 0 {
        Ok(Type::list(Type::String))
    } else if named == groups.len() {
        Ok(Type::object(groups.into_iter().flatten().map(|n| (n, Type::String))))
    } else {
        Err(argument_error(
            "invalid regular expression pattern: cannot use both named and unnamed capture groups",
        )
        .at_arg(0))
    }
}

fn match_value(re: &Regex, caps: &regex::Captures<'_>, ty: &Type) -> Value {
    let group = |m: Option<regex::Match<'_>>| {
        m.map_or_else(|| Value::null(Type::String), |m| Value::string(m.as_str()))
    };
    match ty {
        Type::List(_) => Value::list(Type::String, caps.iter().skip(1).map(group).collect()),
        Type::Object(_) => {
            let attrs: BTreeMap<String, Value> = re
                .capture_names()
                .flatten()
                .map(|name| (name.to_owned(), group(caps.name(name))))
                .collect();
            Value::object(attrs)
        }
        _ => group(caps.get(0)),
    }
}

fn regex_type(args: &[Value]) -> Result<Type, FuncError> {
    match args[0].as_str() {
        Some(pattern) => match_type(&compile(pattern, 0)?),
        None => Ok(Type::Dynamic),
    }
}

fn regex_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let re = compile(str_arg(args, 0)?, 0)?;
    let caps = re.captures(str_arg(args, 1)?).ok_or_else(|| {
        argument_error("pattern did not match any part of the given string").at_arg(1)
    })?;
    Ok(match_value(&re, &caps, ret))
}

/// The first match of a pattern. Capture groups shape the result.
pub fn regex() -> Function {
    Function::resolving("regex", regex_type, regex_body)
        .with_param(Param::new("pattern", Type::String))
        .with_param(Param::new("string", Type::String))
        .not_null()
}

fn regexall_type(args: &[Value]) -> Result<Type, FuncError> {
    regex_type(args).map(Type::list)
}

fn regexall_body(_: &CallContext, args: &[Value], ret: &Type) -> Result<Value, FuncError> {
    let re = compile(str_arg(args, 0)?, 0)?;
    let elem = ret.element_type().cloned().unwrap_or(Type::String);
    let matches = re
        .captures_iter(str_arg(args, 1)?)
        .map(|caps| match_value(&re, &caps, &elem))
        .collect();
    Ok(Value::list(elem, matches))
}

/// Every non-overlapping match of a pattern.
pub fn regexall() -> Function {
    Function::resolving("regexall", regexall_type, regexall_body)
        .with_param(Param::new("pattern", Type::String))
        .with_param(Param::new("string", Type::String))
        .not_null()
}

fn regex_replace_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let re = compile(str_arg(args, 1)?, 1)?;
    let out = re.replace_all(str_arg(args, 0)?, str_arg(args, 2)?);
    Ok(Value::string(out))
}

/// Replace every match of a pattern. `$1` and `${name}` expand to groups.
pub fn regex_replace() -> Function {
    Function::returning("regex_replace", Type::String, regex_replace_body)
        .with_param(Param::new("str", Type::String))
        .with_param(Param::new("pattern", Type::String))
        .with_param(Param::new("replace", Type::String))
        .not_null()
}

fn replace_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let (s, substr, replacement) = (str_arg(args, 0)?, str_arg(args, 1)?, str_arg(args, 2)?);
    let out = match substr.strip_prefix('/').and_then(|p| p.strip_suffix('/')) {
        Some(pattern) => compile(pattern, 1)?.replace_all(s, replacement).into_owned(),
        None => s.replace(substr, replacement),
    };
    Ok(Value::string(out))
}

/// Replace every occurrence of `substr`. A substring wrapped in slashes is
/// a regular expression.
pub fn replace() -> Function {
    Function::returning("replace", Type::String, replace_body)
        .with_param(Param::new("str", Type::String))
        .with_param(Param::new("substr", Type::String))
        .with_param(Param::new("replace", Type::String))
        .not_null()
}

// Lists of strings

fn join_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let separator = str_arg(args, 0)?;
    if args.len() < 2 {
        return Err(argument_error("at least one list is required"));
    }

    let mut parts = Vec::new();
    for (i, list) in args.iter().enumerate().skip(1) {
        for (j, elem) in list.elements().unwrap_or_default().iter().enumerate() {
            if !elem.is_known() {
                return Ok(Value::unknown(Type::String));
            }
            let part = elem
                .as_str()
                .ok_or_else(|| argument_error(format!("element {j} is null")).at_arg(i))?;
            parts.push(part);
        }
    }
    Ok(Value::string(parts.join(separator)))
}

/// Concatenate the elements of one or more lists with a separator.
pub fn join() -> Function {
    Function::returning("join", Type::String, join_body)
        .with_param(Param::new("separator", Type::String))
        .with_var_param(Param::new("lists", Type::list(Type::String)))
        .not_null()
}

fn split_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let (separator, s) = (str_arg(args, 0)?, str_arg(args, 1)?);
    let parts: Vec<String> = if separator.is_empty() {
        s.chars().map(String::from).collect()
    } else {
        s.split(separator).map(str::to_owned).collect()
    };
    Ok(Value::string_list(parts))
}

pub fn split() -> Function {
    Function::returning("split", Type::list(Type::String), split_body)
        .with_param(Param::new("separator", Type::String))
        .with_param(Param::new("str", Type::String))
        .not_null()
}

fn substr_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let s = str_arg(args, 0)?;
    let offset = int_arg(args, 1)?;
    let length = int_arg(args, 2)?;

    let total = s.chars().count();
    let start = if offset < 0 {
        total.saturating_sub(usize::try_from(offset.unsigned_abs()).unwrap_or(usize::MAX))
    } else {
        usize::try_from(offset).unwrap_or(usize::MAX)
    };
    let rest = s.chars().skip(start);
    let out: String = match usize::try_from(length) {
        Ok(length) => rest.take(length).collect(),
        Err(_) => rest.collect(),
    };
    Ok(Value::string(out))
}

/// Characters starting at `offset`. A negative offset counts from the end
/// and a negative length takes the remainder.
pub fn substr() -> Function {
    Function::returning("substr", Type::String, substr_body)
        .with_param(Param::new("str", Type::String))
        .with_param(Param::new("offset", Type::Number))
        .with_param(Param::new("length", Type::Number))
        .not_null()
}

fn indent_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let spaces = int_arg(args, 0)?;
    let pad = " ".repeat(usize::try_from(spaces).unwrap_or(0));
    let out = str_arg(args, 1)?.replace('\n', &format!("\n{pad}"));
    Ok(Value::string(out))
}

/// Indent every line but the first by a number of spaces.
pub fn indent() -> Function {
    Function::returning("indent", Type::String, indent_body)
        .with_param(Param::new("spaces", Type::Number))
        .with_param(Param::new("str", Type::String))
        .not_null()
}

pub(crate) fn register(table: &mut FunctionTable) {
    table.insert(upper());
    table.insert(lower());
    table.insert(trimspace());
    table.insert(trim());
    table.insert(trimprefix());
    table.insert(trimsuffix());
    table.insert(chomp());
    table.insert(strrev());
    table.insert(startswith());
    table.insert(endswith());
    table.insert(strcontains());
    table.insert(replace());
    table.insert(regex());
    table.insert(regexall());
    table.insert(regex_replace());
    table.insert(join());
    table.insert(split());
    table.insert(substr());
    table.insert(title());
    table.insert(indent());
}
