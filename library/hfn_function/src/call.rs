//! The call engine.
//!
//! Every function call goes through [`Function::call`], which applies the
//! parameter descriptors uniformly before the body ever sees an argument:
//!
//! 1. arity
//! 2. null arguments to parameters that forbid null are rejected
//! 3. marks on parameters that forbid marks are stripped and collected
//! 4. arguments whose type is still dynamic defer the whole call
//! 5. arguments are converted to the parameter type
//! 6. unknown arguments to parameters that forbid unknowns short-circuit
//!    the call to an unknown result of the resolved type
//!
//! After the body runs, its result is checked against the resolved type and
//! the collected marks are applied to it.

use hfn_value::{convert, MarkSet, Type, Value};
use tracing::debug;

use crate::context::CallContext;
use crate::errors::{argument_error, internal, must_not_be_null, wrong_arg_count, FuncError};
use crate::param::Allow;
use crate::signature::{Function, ReturnType};

/// Arguments after the engine has applied the parameter descriptors.
struct Prepared {
    args: Vec<Value>,
    marks: MarkSet,
    /// Some argument was unknown where unknowns are not accepted.
    short_circuit: bool,
    /// Some argument's type is not yet known.
    deferred: bool,
}

impl Function {
    /// Call the function with positional arguments.
    #[tracing::instrument(level = "trace", skip_all, fields(function = self.name, args = args.len()))]
    pub fn call(&self, ctx: &CallContext, args: Vec<Value>) -> Result<Value, FuncError> {
        let prepared = self.prepare(args)?;

        if prepared.deferred {
            debug!(function = self.name, "argument type not yet known, deferring");
            return Ok(Value::dynamic().with_marks(&prepared.marks));
        }

        let ret = self.resolve_type(&prepared.args)?;

        if prepared.short_circuit {
            debug!(function = self.name, ret = %ret, "unknown argument, result unknown");
            return Ok(self.unknown_result(ret).with_marks(&prepared.marks));
        }

        let result = (self.body)(ctx, &prepared.args, &ret).map_err(|e| self.annotate(e))?;
        let result = self.conform(result, &ret)?;
        Ok(result.with_marks(&prepared.marks))
    }

    /// Resolve the result type for these arguments without running the body.
    pub fn return_type(&self, args: &[Value]) -> Result<Type, FuncError> {
        let prepared = self.prepare(args.to_vec())?;
        if prepared.deferred {
            return Ok(Type::Dynamic);
        }
        self.resolve_type(&prepared.args)
    }

    fn check_arity(&self, got: usize) -> Result<(), FuncError> {
        let min = self.params.len();
        if self.var_param.is_some() {
            if got < min {
                return Err(wrong_arg_count(
                    self.name,
                    format!("at least {}", plural_args(min)),
                    got,
                ));
            }
        } else if got != min {
            return Err(wrong_arg_count(self.name, plural_args(min), got));
        }
        Ok(())
    }

    fn prepare(&self, args: Vec<Value>) -> Result<Prepared, FuncError> {
        self.check_arity(args.len())?;

        let mut prepared = Prepared {
            args: Vec::with_capacity(args.len()),
            marks: MarkSet::new(),
            short_circuit: false,
            deferred: false,
        };

        for (i, arg) in args.into_iter().enumerate() {
            let Some(param) = self.param_for(i) else {
                return Err(internal(format!("{}: no parameter for argument {i}", self.name)));
            };

            if arg.is_null() && !param.allows(Allow::NULL) {
                return Err(must_not_be_null().at_arg(i).with_param(param.name));
            }

            let arg = if param.allows(Allow::MARKED) {
                arg
            } else {
                let (arg, marks) = arg.unmark_deep();
                prepared.marks.extend_from(&marks);
                arg
            };

            if arg.ty().is_dynamic() && !param.allows(Allow::DYNAMIC_TYPE) {
                prepared.deferred = true;
                prepared.args.push(arg);
                continue;
            }

            let arg = convert(&arg, &param.ty)
                .map_err(|e| FuncError::from(e).at_arg(i).with_param(param.name))?;

            if !arg.is_known() && !param.allows(Allow::UNKNOWN) {
                prepared.short_circuit = true;
            }
            prepared.args.push(arg);
        }

        Ok(prepared)
    }

    fn resolve_type(&self, args: &[Value]) -> Result<Type, FuncError> {
        match &self.ret {
            ReturnType::Static(ty) => Ok(ty.clone()),
            ReturnType::Dynamic(resolve) => resolve(args).map_err(|e| self.annotate(e)),
        }
    }

    fn unknown_result(&self, ty: Type) -> Value {
        let unknown = Value::unknown(ty);
        if self.not_null {
            unknown.refine_not_null()
        } else {
            unknown
        }
    }

    /// Check the body's result against the resolved type.
    fn conform(&self, result: Value, ret: &Type) -> Result<Value, FuncError> {
        if self.not_null && result.is_null() {
            return Err(internal(format!("{} returned null", self.name)));
        }
        let result = if ret.is_dynamic() || result.ty() == ret {
            result
        } else {
            convert(&result, ret).map_err(|e| {
                internal(format!(
                    "{} returned {} where {ret} was declared: {e}",
                    self.name,
                    result.ty()
                ))
            })?
        };
        if self.not_null && !result.is_known() {
            return Ok(result.refine_not_null());
        }
        Ok(result)
    }

    /// Fill in the parameter name for errors attributed to an argument.
    fn annotate(&self, err: FuncError) -> FuncError {
        match err.arg_index.and_then(|i| self.param_for(i)) {
            Some(param) => err.with_param(param.name),
            None => err,
        }
    }
}

fn plural_args(n: usize) -> String {
    if n == 1 {
        "1 argument".to_owned()
    } else {
        format!("{n} arguments")
    }
}

/// Error for an argument that is not one of the accepted kinds.
#[cold]
pub fn wrong_kind(index: usize, expected: &str, got: &Type) -> FuncError {
    argument_error(format!("{expected} required, but have {got}")).at_arg(index)
}

#[cfg(test)]
mod tests;
