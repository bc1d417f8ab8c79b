//! The type lattice.
//!
//! The lattice is intentionally small and closed: three primitives, three
//! collection kinds, two structural kinds, and `Dynamic`. Every match over
//! `Type` in the workspace is exhaustive.

use std::collections::BTreeMap;
use std::fmt;

/// Static type of a value.
///
/// `Dynamic` is a placeholder meaning "determine from the actual argument
/// when available". It appears as a parameter type, as the element type of
/// an empty collection literal, and as the type of a not-yet-typed unknown.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    // Primitives
    String,
    Number,
    Bool,

    // Collections (homogeneous)
    List(Box<Type>),
    Set(Box<Type>),
    Map(Box<Type>),

    // Structural (heterogeneous)
    Tuple(Vec<Type>),
    Object(BTreeMap<String, Type>),

    Dynamic,
}

impl Type {
    #[inline]
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    #[inline]
    pub fn set(elem: Type) -> Self {
        Type::Set(Box::new(elem))
    }

    #[inline]
    pub fn map(elem: Type) -> Self {
        Type::Map(Box::new(elem))
    }

    #[inline]
    pub fn tuple(elems: Vec<Type>) -> Self {
        Type::Tuple(elems)
    }

    /// Build an object type from `(name, type)` pairs.
    pub fn object<K: Into<String>>(attrs: impl IntoIterator<Item = (K, Type)>) -> Self {
        Type::Object(attrs.into_iter().map(|(k, t)| (k.into(), t)).collect())
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::String | Type::Number | Type::Bool)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Type::List(_))
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Type::Set(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Type::Map(_))
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Type::Tuple(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Type::Object(_))
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Type::Dynamic)
    }

    /// List, set or map.
    pub fn is_collection(&self) -> bool {
        matches!(self, Type::List(_) | Type::Set(_) | Type::Map(_))
    }

    /// Whether values of this type expose elements for iteration.
    pub fn can_iterate_elements(&self) -> bool {
        match self {
            Type::List(_) | Type::Set(_) | Type::Map(_) | Type::Tuple(_) | Type::Object(_) => true,
            Type::String | Type::Number | Type::Bool | Type::Dynamic => false,
        }
    }

    /// Element type of a list, set or map.
    pub fn element_type(&self) -> Option<&Type> {
        match self {
            Type::List(e) | Type::Set(e) | Type::Map(e) => Some(e),
            _ => None,
        }
    }

    /// Whether `Dynamic` appears anywhere inside this type.
    pub fn has_dynamic(&self) -> bool {
        match self {
            Type::Dynamic => true,
            Type::String | Type::Number | Type::Bool => false,
            Type::List(e) | Type::Set(e) | Type::Map(e) => e.has_dynamic(),
            Type::Tuple(es) => es.iter().any(Type::has_dynamic),
            Type::Object(attrs) => attrs.values().any(Type::has_dynamic),
        }
    }

    /// Short human-readable name, used in error messages.
    pub fn friendly_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::String => write!(f, "string"),
            Type::Number => write!(f, "number"),
            Type::Bool => write!(f, "bool"),
            Type::List(e) => write!(f, "list of {e}"),
            Type::Set(e) => write!(f, "set of {e}"),
            Type::Map(e) => write!(f, "map of {e}"),
            Type::Tuple(_) => write!(f, "tuple"),
            Type::Object(_) => write!(f, "object"),
            Type::Dynamic => write!(f, "dynamic"),
        }
    }
}
