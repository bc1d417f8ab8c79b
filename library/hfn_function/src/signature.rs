//! Function signatures.

use std::fmt;

use hfn_value::{Type, Value};

use crate::context::CallContext;
use crate::errors::FuncError;
use crate::param::Param;

/// Function body. Receives the converted arguments (variadic tail
/// included) and the resolved return type.
pub type ImplFn = fn(&CallContext, &[Value], &Type) -> Result<Value, FuncError>;

/// Return type computed from the converted arguments.
pub type TypeFn = fn(&[Value]) -> Result<Type, FuncError>;

/// How a function's result type is determined.
#[derive(Clone)]
pub enum ReturnType {
    Static(Type),
    Dynamic(TypeFn),
}

/// A named function: parameters, return type rule and body.
///
/// Built once per process and shared read-only between threads.
#[derive(Clone)]
pub struct Function {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) params: Vec<Param>,
    pub(crate) var_param: Option<Param>,
    pub(crate) ret: ReturnType,
    pub(crate) body: ImplFn,
    pub(crate) not_null: bool,
}

impl Function {
    pub fn new(name: &'static str, ret: ReturnType, body: ImplFn) -> Self {
        Function {
            name,
            description: "",
            params: Vec::new(),
            var_param: None,
            ret,
            body,
            not_null: false,
        }
    }

    /// Shorthand for a function with a static return type.
    pub fn returning(name: &'static str, ty: Type, body: ImplFn) -> Self {
        Function::new(name, ReturnType::Static(ty), body)
    }

    /// Shorthand for a function whose return type depends on its arguments.
    pub fn resolving(name: &'static str, ty: TypeFn, body: ImplFn) -> Self {
        Function::new(name, ReturnType::Dynamic(ty), body)
    }

    #[must_use]
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn with_var_param(mut self, param: Param) -> Self {
        self.var_param = Some(param);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Declare that the result is never null. Unknown results produced by
    /// the engine then carry the not-null refinement.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn var_param(&self) -> Option<&Param> {
        self.var_param.as_ref()
    }

    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    /// The declared result type, if it does not depend on the arguments.
    pub fn static_return_type(&self) -> Option<&Type> {
        match &self.ret {
            ReturnType::Static(ty) => Some(ty),
            ReturnType::Dynamic(_) => None,
        }
    }

    /// The parameter that receives argument `index`.
    pub fn param_for(&self, index: usize) -> Option<&Param> {
        self.params.get(index).or(self.var_param.as_ref())
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", p.name, p.ty)?;
        }
        if let Some(p) = &self.var_param {
            if !self.params.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "{}...: {}", p.name, p.ty)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests;
