//! Value conversion between types.
//!
//! Conversions here are the permissive ("unsafe") kind: they may fail at
//! runtime depending on the value, e.g. a string converts to a number only
//! if it holds decimal text. Null and unknown values convert to null and
//! unknown of the target type, provided the types are convertible at all.
//! Marks are preserved at every level.

use std::collections::BTreeMap;
use std::fmt;

use crate::ty::Type;
use crate::unify::unify_unsafe;
use crate::value::{format_number, Content, Repr, Value};

/// One step of the path from the converted value to the failing element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathStep {
    Index(usize),
    Key(String),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Index(i) => write!(f, "[{i}]"),
            PathStep::Key(k) => write!(f, "[{k:?}]"),
        }
    }
}

/// Why a conversion failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("{to} required, but have {from}")]
    Incompatible { from: Type, to: Type },
    #[error("a number is required")]
    InvalidNumber,
    #[error("a bool is required")]
    InvalidBool,
    #[error("a tuple of {expected} elements is required, but have {got}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("attribute {0:?} is required")]
    MissingAttribute(String),
    #[error("unsupported attribute {0:?}")]
    UnexpectedAttribute(String),
    #[error("all elements must have a consistent type")]
    NoCommonType,
}

/// A conversion failure and the path at which it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionError {
    pub path: Vec<PathStep>,
    pub kind: ConversionErrorKind,
}

impl ConversionError {
    #[cold]
    pub fn new(kind: ConversionErrorKind) -> Self {
        ConversionError {
            path: Vec::new(),
            kind,
        }
    }

    /// Prefix the path with an element index.
    #[must_use]
    pub fn within_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathStep::Index(index));
        self
    }

    /// Prefix the path with a map key or attribute name.
    #[must_use]
    pub fn within_key(mut self, key: &str) -> Self {
        self.path.insert(0, PathStep::Key(key.to_owned()));
        self
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.kind);
        }
        for step in &self.path {
            write!(f, "{step}")?;
        }
        write!(f, ": {}", self.kind)
    }
}

impl std::error::Error for ConversionError {}

#[cold]
fn incompatible(from: &Type, to: &Type) -> ConversionError {
    ConversionError::new(ConversionErrorKind::Incompatible {
        from: from.clone(),
        to: to.clone(),
    })
}

/// The type a value of `from` would have after conversion to `to`, or
/// `None` if no value of `from` can convert.
///
/// `Dynamic` inside `to` is resolved from `from`.
pub fn conversion_type(from: &Type, to: &Type) -> Option<Type> {
    if to.is_dynamic() {
        return Some(from.clone());
    }
    if from.is_dynamic() || from == to {
        return Some(to.clone());
    }
    match (from, to) {
        (Type::Number | Type::Bool, Type::String) | (Type::String, Type::Number | Type::Bool) => {
            Some(to.clone())
        }
        (Type::List(f) | Type::Set(f), Type::List(e)) => conversion_type(f, e).map(Type::list),
        (Type::List(f) | Type::Set(f), Type::Set(e)) => conversion_type(f, e).map(Type::set),
        (Type::Tuple(fs), Type::List(e)) => seq_elem_type(fs, e).map(Type::list),
        (Type::Tuple(fs), Type::Set(e)) => seq_elem_type(fs, e).map(Type::set),
        (Type::Map(f), Type::Map(e)) => conversion_type(f, e).map(Type::map),
        (Type::Object(attrs), Type::Map(e)) => {
            let fs: Vec<Type> = attrs.values().cloned().collect();
            seq_elem_type(&fs, e).map(Type::map)
        }
        (Type::Tuple(fs), Type::Tuple(ts)) if fs.len() == ts.len() => fs
            .iter()
            .zip(ts)
            .map(|(f, t)| conversion_type(f, t))
            .collect::<Option<Vec<_>>>()
            .map(Type::Tuple),
        (Type::List(f) | Type::Set(f), Type::Tuple(ts)) => ts
            .iter()
            .map(|t| conversion_type(f, t))
            .collect::<Option<Vec<_>>>()
            .map(Type::Tuple),
        (Type::Object(fa), Type::Object(ta)) => ta
            .iter()
            .map(|(k, t)| Some((k.clone(), conversion_type(fa.get(k)?, t)?)))
            .collect::<Option<BTreeMap<_, _>>>()
            .map(Type::Object),
        (Type::Map(f), Type::Object(ta)) => ta
            .iter()
            .map(|(k, t)| Some((k.clone(), conversion_type(f, t)?)))
            .collect::<Option<BTreeMap<_, _>>>()
            .map(Type::Object),
        _ => None,
    }
}

/// Element type for a homogeneous collection built from heterogeneous
/// element types.
fn seq_elem_type(fs: &[Type], e: &Type) -> Option<Type> {
    if e.is_dynamic() {
        if fs.is_empty() {
            return Some(Type::Dynamic);
        }
        return unify_unsafe(fs);
    }
    fs.iter()
        .all(|f| conversion_type(f, e).is_some())
        .then(|| e.clone())
}

/// Convert `value` to `ty`.
pub fn convert(value: &Value, ty: &Type) -> Result<Value, ConversionError> {
    if ty.is_dynamic() || value.ty() == ty {
        return Ok(value.clone());
    }
    let target = conversion_type(value.ty(), ty).ok_or_else(|| incompatible(value.ty(), ty))?;
    let converted = match value.repr() {
        Repr::Null(_) => Value::null(target),
        Repr::Unknown { not_null, .. } => {
            let unknown = Value::unknown(target);
            if *not_null {
                unknown.refine_not_null()
            } else {
                unknown
            }
        }
        Repr::Known(from, content) => convert_known(from, content, &target)?,
    };
    Ok(converted.with_marks(value.marks()))
}

fn convert_known(from: &Type, content: &Content, to: &Type) -> Result<Value, ConversionError> {
    match (content, to) {
        (Content::Number(n), Type::String) => Ok(Value::string(format_number(*n))),
        (Content::Bool(b), Type::String) => Ok(Value::string(b.to_string())),
        (Content::String(s), Type::Number) => parse_number(s).map(Value::number),
        (Content::String(s), Type::Bool) => match s.as_str() {
            "true" => Ok(Value::bool(true)),
            "false" => Ok(Value::bool(false)),
            _ => Err(ConversionError::new(ConversionErrorKind::InvalidBool)),
        },
        (Content::String(s), Type::String) => Ok(Value::string(s.as_str())),
        (Content::Number(n), Type::Number) => Ok(Value::number(*n)),
        (Content::Bool(b), Type::Bool) => Ok(Value::bool(*b)),

        (Content::List(es) | Content::Set(es) | Content::Tuple(es), Type::List(e)) => {
            Ok(Value::list((**e).clone(), convert_seq(es, e)?))
        }
        (Content::List(es) | Content::Set(es) | Content::Tuple(es), Type::Set(e)) => {
            Ok(Value::set((**e).clone(), convert_seq(es, e)?))
        }
        (Content::List(es) | Content::Set(es) | Content::Tuple(es), Type::Tuple(ts)) => {
            if es.len() != ts.len() {
                return Err(ConversionError::new(ConversionErrorKind::LengthMismatch {
                    expected: ts.len(),
                    got: es.len(),
                }));
            }
            let elems = es
                .iter()
                .zip(ts)
                .enumerate()
                .map(|(i, (v, t))| convert(v, t).map_err(|err| err.within_index(i)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::tuple(elems))
        }
        (Content::Map(es) | Content::Object(es), Type::Map(e)) => {
            let entries = es
                .iter()
                .map(|(k, v)| Ok((k.clone(), convert(v, e).map_err(|err| err.within_key(k))?)))
                .collect::<Result<Vec<_>, ConversionError>>()?;
            Ok(Value::map((**e).clone(), entries))
        }
        (Content::Map(es) | Content::Object(es), Type::Object(attrs)) => {
            if matches!(content, Content::Map(_)) {
                if let Some(extra) = es.keys().find(|k| !attrs.contains_key(*k)) {
                    return Err(ConversionError::new(
                        ConversionErrorKind::UnexpectedAttribute(extra.clone()),
                    ));
                }
            }
            let entries = attrs
                .iter()
                .map(|(k, t)| {
                    let v = es.get(k).ok_or_else(|| {
                        ConversionError::new(ConversionErrorKind::MissingAttribute(k.clone()))
                    })?;
                    Ok((k.clone(), convert(v, t).map_err(|err| err.within_key(k))?))
                })
                .collect::<Result<Vec<_>, ConversionError>>()?;
            Ok(Value::object(entries))
        }
        _ => Err(incompatible(from, to)),
    }
}

fn convert_seq(es: &[Value], e: &Type) -> Result<Vec<Value>, ConversionError> {
    es.iter()
        .enumerate()
        .map(|(i, v)| convert(v, e).map_err(|err| err.within_index(i)))
        .collect()
}

/// Parse decimal number text. Non-finite spellings ("inf", "NaN") are
/// rejected.
fn parse_number(s: &str) -> Result<f64, ConversionError> {
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ConversionError::new(ConversionErrorKind::InvalidNumber)),
    }
}
