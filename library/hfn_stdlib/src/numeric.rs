//! Numeric functions.

use hfn_function::{argument_error, CallContext, FuncError, Function, Param};
use hfn_value::{Type, Value};

use crate::helpers::{int_arg, num_arg};
use crate::table::FunctionTable;

macro_rules! unary_function {
    ($(#[$doc:meta])* $name:ident, $op:expr) => {
        $(#[$doc])*
        pub fn $name() -> Function {
            fn body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
                let op: fn(f64) -> f64 = $op;
                Ok(Value::number(op(num_arg(args, 0)?)))
            }
            Function::returning(stringify!($name), Type::Number, body)
                .with_param(Param::new("num", Type::Number))
                .not_null()
        }
    };
}

unary_function!(abs, f64::abs);
unary_function!(ceil, f64::ceil);
unary_function!(floor, f64::floor);
unary_function!(
    /// -1, 0 or 1 according to the sign of the number.
    signum,
    |n| if n > 0.0 {
        1.0
    } else if n < 0.0 {
        -1.0
    } else {
        0.0
    }
);

fn log_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let (num, base) = (num_arg(args, 0)?, num_arg(args, 1)?);
    Ok(Value::number(num.ln() / base.ln()))
}

/// Logarithm of `num` in `base`.
pub fn log() -> Function {
    Function::returning("log", Type::Number, log_body)
        .with_param(Param::new("num", Type::Number))
        .with_param(Param::new("base", Type::Number))
        .not_null()
}

fn pow_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    Ok(Value::number(num_arg(args, 0)?.powf(num_arg(args, 1)?)))
}

pub fn pow() -> Function {
    Function::returning("pow", Type::Number, pow_body)
        .with_param(Param::new("num", Type::Number))
        .with_param(Param::new("power", Type::Number))
        .not_null()
}

fn fold_numbers(args: &[Value], pick: fn(f64, f64) -> f64) -> Result<Value, FuncError> {
    if args.is_empty() {
        return Err(argument_error("must pass at least one number"));
    }
    let mut acc = num_arg(args, 0)?;
    for i in 1..args.len() {
        acc = pick(acc, num_arg(args, i)?);
    }
    Ok(Value::number(acc))
}

fn min_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    fold_numbers(args, f64::min)
}

fn max_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    fold_numbers(args, f64::max)
}

/// Smallest of one or more numbers.
pub fn min() -> Function {
    Function::returning("min", Type::Number, min_body)
        .with_var_param(Param::new("numbers", Type::Number))
        .not_null()
}

/// Largest of one or more numbers.
pub fn max() -> Function {
    Function::returning("max", Type::Number, max_body)
        .with_var_param(Param::new("numbers", Type::Number))
        .not_null()
}

// parseint

/// Value of an ASCII digit in bases up to 62. Letters are case-insensitive
/// up to base 36; above that, lowercase come first.
fn digit_value(c: char, base: u32) -> Option<u32> {
    let d = match c {
        '0'..='9' => c as u32 - '0' as u32,
        'a'..='z' => c as u32 - 'a' as u32 + 10,
        'A'..='Z' if base <= 36 => c as u32 - 'A' as u32 + 10,
        'A'..='Z' => c as u32 - 'A' as u32 + 36,
        _ => return None,
    };
    (d < base).then_some(d)
}

fn parse_int(text: &str, base: u32) -> Option<i128> {
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() {
        return None;
    }
    let mut acc: i128 = 0;
    for c in digits.chars() {
        let d = digit_value(c, base)?;
        acc = acc.checked_mul(i128::from(base))?.checked_add(i128::from(d))?;
    }
    Some(if negative { -acc } else { acc })
}

#[allow(clippy::cast_precision_loss)]
fn parseint_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let Some(text) = args[0].as_str() else {
        return Err(argument_error(format!(
            "first argument must be a string, not {}",
            args[0].ty().friendly_name()
        ))
        .at_arg(0));
    };
    let base = int_arg(args, 1)?;
    let base = u32::try_from(base)
        .ok()
        .filter(|b| (2..=62).contains(b))
        .ok_or_else(|| {
            argument_error("base must be a whole number between 2 and 62 inclusive").at_arg(1)
        })?;

    let n = parse_int(text, base).ok_or_else(|| {
        argument_error(format!("cannot parse {text:?} as a base {base} integer")).at_arg(0)
    })?;
    Ok(Value::number(n as f64))
}

/// Parse a string as an integer in `base` (2 to 62).
pub fn parseint() -> Function {
    Function::returning("parseint", Type::Number, parseint_body)
        .with_param(Param::new("number", Type::Dynamic))
        .with_param(Param::new("base", Type::Number))
        .not_null()
}

pub(crate) fn register(table: &mut FunctionTable) {
    table.insert(abs());
    table.insert(ceil());
    table.insert(floor());
    table.insert(signum());
    table.insert(log());
    table.insert(pow());
    table.insert(min());
    table.insert(max());
    table.insert(parseint());
}
