//! Error types for function calls.
//!
//! `FuncErrorKind` is the structured category; the factory functions below
//! are the public way to build errors and populate both `kind` and
//! `message`. Errors about a specific argument carry its position, and the
//! call engine fills in the parameter name so messages read
//! `invalid value for "list" parameter: ...`.

use std::fmt;

use hfn_value::ConversionError;

/// Result of a function call.
pub type FuncResult = Result<hfn_value::Value, FuncError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FuncErrorKind {
    /// Wrong type, value outside the domain, null where null is forbidden.
    #[error("{message}")]
    Argument { message: String },
    /// `expected` is phrased for display, e.g. "at least 1 argument".
    #[error("{name} expects {expected}, got {got}")]
    Arity {
        name: String,
        expected: String,
        got: usize,
    },
    /// Element types across arguments have no common type.
    #[error("{message}")]
    TypeUnification { message: String },
    /// Defined but exceptional arithmetic.
    #[error("{message}")]
    Numeric { message: String },
    /// IPv4 compared against IPv6 or vice versa.
    #[error("address family mismatch: {prefix} vs. {address}")]
    FamilyMismatch { prefix: String, address: String },
    #[error("call to unknown function {name:?}")]
    UndefinedFunction { name: String },
    /// A function broke its own contract.
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Error returned from a function call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncError {
    pub kind: FuncErrorKind,
    /// Equals `kind.to_string()`.
    pub message: String,
    /// Position of the offending argument, if any.
    pub arg_index: Option<usize>,
    /// Name of the offending parameter, filled in by the call engine.
    pub param: Option<&'static str>,
}

impl FuncError {
    fn from_kind(kind: FuncErrorKind) -> Self {
        let message = kind.to_string();
        FuncError {
            kind,
            message,
            arg_index: None,
            param: None,
        }
    }

    /// Attribute the error to the argument at `index`.
    #[must_use]
    pub fn at_arg(mut self, index: usize) -> Self {
        if self.arg_index.is_none() {
            self.arg_index = Some(index);
        }
        self
    }

    #[must_use]
    pub(crate) fn with_param(mut self, name: &'static str) -> Self {
        if self.param.is_none() {
            self.param = Some(name);
        }
        self
    }

    pub fn is_argument_error(&self) -> bool {
        matches!(self.kind, FuncErrorKind::Argument { .. })
    }
}

impl fmt::Display for FuncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.param {
            Some(param) => write!(f, "invalid value for {param:?} parameter: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for FuncError {}

impl From<ConversionError> for FuncError {
    fn from(err: ConversionError) -> Self {
        argument_error(err.to_string())
    }
}

// Factories

#[cold]
pub fn argument_error(message: impl Into<String>) -> FuncError {
    FuncError::from_kind(FuncErrorKind::Argument {
        message: message.into(),
    })
}

#[cold]
pub fn must_not_be_null() -> FuncError {
    argument_error("argument must not be null")
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: impl Into<String>, got: usize) -> FuncError {
    FuncError::from_kind(FuncErrorKind::Arity {
        name: name.to_owned(),
        expected: expected.into(),
        got,
    })
}

#[cold]
pub fn incompatible_types(message: impl Into<String>) -> FuncError {
    FuncError::from_kind(FuncErrorKind::TypeUnification {
        message: message.into(),
    })
}

#[cold]
pub fn numeric_error(message: impl Into<String>) -> FuncError {
    FuncError::from_kind(FuncErrorKind::Numeric {
        message: message.into(),
    })
}

#[cold]
pub fn family_mismatch(prefix: &str, address: &str) -> FuncError {
    FuncError::from_kind(FuncErrorKind::FamilyMismatch {
        prefix: prefix.to_owned(),
        address: address.to_owned(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> FuncError {
    FuncError::from_kind(FuncErrorKind::UndefinedFunction {
        name: name.to_owned(),
    })
}

#[cold]
pub fn internal(message: impl Into<String>) -> FuncError {
    FuncError::from_kind(FuncErrorKind::Internal {
        message: message.into(),
    })
}

#[cfg(test)]
mod tests;
