//! Parameter descriptors.

use bitflags::bitflags;
use hfn_value::Type;

bitflags! {
    /// Which argument states a parameter accepts as-is.
    ///
    /// Anything not allowed is handled by the call engine before the
    /// function body runs: unknown arguments short-circuit the call to an
    /// unknown result, null arguments are rejected, marks are stripped and
    /// re-applied to the result, and arguments whose type is still dynamic
    /// defer the call.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Allow: u8 {
        const UNKNOWN = 1 << 0;
        const NULL = 1 << 1;
        const MARKED = 1 << 2;
        const DYNAMIC_TYPE = 1 << 3;
    }
}

/// One named, typed parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub ty: Type,
    pub allow: Allow,
    pub description: &'static str,
}

impl Param {
    /// A parameter that accepts only known, non-null, unmarked arguments.
    pub fn new(name: &'static str, ty: Type) -> Self {
        Param {
            name,
            ty,
            allow: Allow::empty(),
            description: "",
        }
    }

    #[must_use]
    pub fn allowing(mut self, allow: Allow) -> Self {
        self.allow |= allow;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    #[inline]
    pub fn allows(&self, allow: Allow) -> bool {
        self.allow.contains(allow)
    }
}
