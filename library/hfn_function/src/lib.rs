//! Function engine for the hfn function library.
//!
//! A [`Function`] pairs declarative parameter descriptors ([`Param`],
//! [`Allow`]) with a return type rule and a body. [`Function::call`] applies
//! the shared contract for unknown, null, marked and dynamically typed
//! arguments, so function bodies only ever deal with the cases they opt in
//! to.

mod call;
mod context;
mod errors;
mod param;
mod signature;

pub use call::wrong_kind;
pub use context::CallContext;
pub use errors::{
    argument_error, family_mismatch, incompatible_types, internal, must_not_be_null,
    numeric_error, undefined_function, wrong_arg_count, FuncError, FuncErrorKind, FuncResult,
};
pub use param::{Allow, Param};
pub use signature::{Function, ImplFn, ReturnType, TypeFn};
