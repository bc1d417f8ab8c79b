//! Function table: the name to signature registry hosts consult.

use hfn_function::{undefined_function, CallContext, FuncError, Function};
use hfn_value::Value;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{aggregate, cidr, collections, conversion, env, marks, numeric, sets, strings};

/// Every function in the standard table, sorted.
pub const FUNCTION_NAMES: &[&str] = &[
    "abs",
    "alltrue",
    "anytrue",
    "ceil",
    "chomp",
    "chunklist",
    "cidrcontains",
    "cidrhost",
    "cidrnetmask",
    "cidrsubnet",
    "cidrsubnets",
    "coalesce",
    "coalescelist",
    "compact",
    "compliment",
    "concat",
    "contains",
    "distinct",
    "element",
    "endswith",
    "env",
    "flatten",
    "floor",
    "indent",
    "index",
    "issensitive",
    "join",
    "keys",
    "length",
    "log",
    "lookup",
    "lower",
    "matchkeys",
    "max",
    "merge",
    "min",
    "nonsensitive",
    "parseint",
    "pow",
    "range",
    "regex",
    "regex_replace",
    "regexall",
    "replace",
    "reverse",
    "sensitive",
    "setintersection",
    "setsubtract",
    "setsymmetricdifference",
    "setunion",
    "signum",
    "slice",
    "sort",
    "split",
    "startswith",
    "strcontains",
    "strrev",
    "substr",
    "sum",
    "title",
    "tobool",
    "tolist",
    "tomap",
    "tonumber",
    "toset",
    "tostring",
    "transpose",
    "trim",
    "trimprefix",
    "trimspace",
    "trimsuffix",
    "upper",
    "values",
    "zipmap",
];

/// Functions by name.
///
/// Tables are plain values: hosts start from [`FunctionTable::standard`]
/// and remove what they must not expose, or build their own from
/// [`FunctionTable::empty`].
#[derive(Clone, Debug, Default)]
pub struct FunctionTable {
    functions: FxHashMap<&'static str, Function>,
}

impl FunctionTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every function this crate provides.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        aggregate::register(&mut table);
        cidr::register(&mut table);
        collections::register(&mut table);
        conversion::register(&mut table);
        env::register(&mut table);
        marks::register(&mut table);
        numeric::register(&mut table);
        sets::register(&mut table);
        strings::register(&mut table);
        table
    }

    /// Register `function` under its own name, returning any function it
    /// replaces.
    pub fn insert(&mut self, function: Function) -> Option<Function> {
        trace!(name = function.name(), "registering function");
        self.functions.insert(function.name(), function)
    }

    /// The table without `name`.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.functions.remove(name);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Call the function registered as `name`.
    pub fn call(&self, ctx: &CallContext, name: &str, args: Vec<Value>) -> Result<Value, FuncError> {
        self.get(name)
            .ok_or_else(|| undefined_function(name))?
            .call(ctx, args)
    }

    /// Registered names in lexical order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
