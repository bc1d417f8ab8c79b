//! Runtime values.
//!
//! A [`Value`] is one of three knowledge states, null, unknown or known,
//! paired with the set of [`Mark`]s attached to it. Every state carries its
//! [`Type`], so a function can always report the type of its result even
//! when the result itself is not yet known.
//!
//! # Construction
//!
//! Collection content lives behind [`Heap`], whose constructor is private to
//! this module. All values are therefore built through the factory methods
//! below, which keep content and declared type in agreement:
//!
//! ```text
//! let s = Value::string("hello");                          // OK
//! let l = Value::list(Type::Number, vec![Value::int(1)]);  // OK
//! let bad = Content::List(Heap::new(vec![]));              // ERROR: Heap::new is private
//! ```

mod heap;
pub mod set;

use std::collections::BTreeMap;
use std::fmt;

use crate::convert::{convert, ConversionError, ConversionErrorKind};
use crate::mark::{Mark, MarkSet};
use crate::ty::Type;
use crate::unify::unify_unsafe;

pub use heap::Heap;

/// The knowledge state of a value.
#[derive(Clone, Debug, PartialEq)]
pub enum Repr {
    /// A null of the given type.
    Null(Type),
    /// A value that will be known later. `not_null` records a refinement
    /// guaranteeing the eventual value is not null.
    Unknown { ty: Type, not_null: bool },
    /// A fully materialized value. Nested elements may still be unknown.
    Known(Type, Content),
}

/// Content of a known value. Its shape always matches the declared type.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    String(Heap<String>),
    Number(f64),
    Bool(bool),
    List(Heap<Vec<Value>>),
    /// Sorted and deduplicated; elements carry no marks.
    Set(Heap<Vec<Value>>),
    Map(Heap<BTreeMap<String, Value>>),
    Tuple(Heap<Vec<Value>>),
    Object(Heap<BTreeMap<String, Value>>),
}

/// A dynamically typed value with its marks.
///
/// `PartialEq` is raw structural equality (marks included). The value
/// model's own equality, which can be unknown, is [`Value::equals`].
#[derive(Clone, PartialEq)]
pub struct Value {
    repr: Repr,
    marks: MarkSet,
}

// Factories

impl Value {
    #[inline]
    fn from_repr(repr: Repr) -> Self {
        Value {
            repr,
            marks: MarkSet::new(),
        }
    }

    #[inline]
    fn known(ty: Type, content: Content) -> Self {
        Value::from_repr(Repr::Known(ty, content))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::known(Type::String, Content::String(Heap::new(s.into())))
    }

    #[inline]
    pub fn number(n: f64) -> Self {
        Value::known(Type::Number, Content::Number(n))
    }

    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn int(n: i64) -> Self {
        Value::number(n as f64)
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::known(Type::Bool, Content::Bool(b))
    }

    #[inline]
    pub fn null(ty: Type) -> Self {
        Value::from_repr(Repr::Null(ty))
    }

    #[inline]
    pub fn unknown(ty: Type) -> Self {
        Value::from_repr(Repr::Unknown {
            ty,
            not_null: false,
        })
    }

    /// An unknown whose type is not yet known either.
    #[inline]
    pub fn dynamic() -> Self {
        Value::unknown(Type::Dynamic)
    }

    /// A list whose elements are all of `elem_ty`.
    pub fn list(elem_ty: Type, elems: Vec<Value>) -> Self {
        debug_assert!(
            elem_ty.is_dynamic() || elems.iter().all(|e| e.ty() == &elem_ty),
            "list elements must match the declared element type"
        );
        Value::known(Type::list(elem_ty), Content::List(Heap::new(elems)))
    }

    /// An empty list of `elem_ty`.
    pub fn empty_list(elem_ty: Type) -> Self {
        Value::list(elem_ty, Vec::new())
    }

    /// A list of strings.
    pub fn string_list<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        Value::list(
            Type::String,
            items.into_iter().map(Value::string).collect(),
        )
    }

    /// A set of `elem_ty`.
    ///
    /// Elements are sorted and deduplicated. Marks found anywhere inside an
    /// element are removed from it and attached to the set itself.
    pub fn set(elem_ty: Type, elems: Vec<Value>) -> Self {
        let mut hoisted = MarkSet::new();
        let elems = elems
            .into_iter()
            .map(|e| {
                let (e, marks) = e.unmark_deep();
                hoisted.extend_from(&marks);
                e
            })
            .collect();
        let elems = set::normalize(elems);
        Value::known(Type::set(elem_ty), Content::Set(Heap::new(elems))).with_marks(&hoisted)
    }

    /// A map whose values are all of `elem_ty`.
    pub fn map<K: Into<String>>(elem_ty: Type, entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let entries: BTreeMap<String, Value> =
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::known(Type::map(elem_ty), Content::Map(Heap::new(entries)))
    }

    /// A tuple; its type is derived from the elements.
    pub fn tuple(elems: Vec<Value>) -> Self {
        let ty = Type::Tuple(elems.iter().map(|e| e.ty().clone()).collect());
        Value::known(ty, Content::Tuple(Heap::new(elems)))
    }

    /// An object; its type is derived from the attributes.
    pub fn object<K: Into<String>>(attrs: impl IntoIterator<Item = (K, Value)>) -> Self {
        let attrs: BTreeMap<String, Value> =
            attrs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let ty = Type::Object(attrs.iter().map(|(k, v)| (k.clone(), v.ty().clone())).collect());
        Value::known(ty, Content::Object(Heap::new(attrs)))
    }

    /// A list whose element type is unified from the elements.
    pub fn list_of(elems: Vec<Value>) -> Result<Self, ConversionError> {
        let elem_ty = unify_elements(&elems)?;
        let elems = convert_all(elems, &elem_ty)?;
        Ok(Value::list(elem_ty, elems))
    }

    /// A set whose element type is unified from the elements.
    pub fn set_of(elems: Vec<Value>) -> Result<Self, ConversionError> {
        let elem_ty = unify_elements(&elems)?;
        let elems = convert_all(elems, &elem_ty)?;
        Ok(Value::set(elem_ty, elems))
    }

    /// A map whose element type is unified from the entries.
    pub fn map_of(entries: BTreeMap<String, Value>) -> Result<Self, ConversionError> {
        let tys: Vec<Type> = entries.values().map(|v| v.ty().clone()).collect();
        let elem_ty = if tys.is_empty() {
            Type::Dynamic
        } else {
            unify_unsafe(&tys).ok_or_else(|| ConversionError::new(ConversionErrorKind::NoCommonType))?
        };
        let mut out = BTreeMap::new();
        for (k, v) in entries {
            let v = convert(&v, &elem_ty).map_err(|e| e.within_key(&k))?;
            out.insert(k, v);
        }
        Ok(Value::known(Type::map(elem_ty), Content::Map(Heap::new(out))))
    }
}

fn unify_elements(elems: &[Value]) -> Result<Type, ConversionError> {
    if elems.is_empty() {
        return Ok(Type::Dynamic);
    }
    let tys: Vec<Type> = elems.iter().map(|e| e.ty().clone()).collect();
    unify_unsafe(&tys).ok_or_else(|| ConversionError::new(ConversionErrorKind::NoCommonType))
}

fn convert_all(elems: Vec<Value>, ty: &Type) -> Result<Vec<Value>, ConversionError> {
    elems
        .iter()
        .enumerate()
        .map(|(i, e)| convert(e, ty).map_err(|err| err.within_index(i)))
        .collect()
}

// Accessors

impl Value {
    #[inline]
    pub fn repr(&self) -> &Repr {
        &self.repr
    }

    /// Declared type, whatever the knowledge state.
    pub fn ty(&self) -> &Type {
        match &self.repr {
            Repr::Null(ty) | Repr::Unknown { ty, .. } | Repr::Known(ty, _) => ty,
        }
    }

    /// `true` unless the value is unknown. Null counts as known.
    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self.repr, Repr::Unknown { .. })
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self.repr, Repr::Null(_))
    }

    /// Whether the value is unknown but guaranteed not to be null.
    pub fn is_refined_not_null(&self) -> bool {
        matches!(self.repr, Repr::Unknown { not_null: true, .. })
    }

    /// Known, and every nested element known, recursively.
    pub fn is_wholly_known(&self) -> bool {
        match &self.repr {
            Repr::Null(_) => true,
            Repr::Unknown { .. } => false,
            Repr::Known(_, content) => match content {
                Content::String(_) | Content::Number(_) | Content::Bool(_) => true,
                Content::List(es) | Content::Set(es) | Content::Tuple(es) => {
                    es.iter().all(Value::is_wholly_known)
                }
                Content::Map(es) | Content::Object(es) => es.values().all(Value::is_wholly_known),
            },
        }
    }

    pub fn content(&self) -> Option<&Content> {
        match &self.repr {
            Repr::Known(_, content) => Some(content),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.content() {
            Some(Content::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.content() {
            Some(Content::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// The number as an integer, if it is whole and in range.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn as_int(&self) -> Option<i64> {
        let n = self.as_number()?;
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            Some(n as i64)
        } else {
            None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.content() {
            Some(Content::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Elements of a known list, set or tuple, in iteration order.
    pub fn elements(&self) -> Option<&[Value]> {
        match self.content() {
            Some(Content::List(es) | Content::Set(es) | Content::Tuple(es)) => Some(es.as_slice()),
            _ => None,
        }
    }

    /// Entries of a known map or object, in key order.
    pub fn entries(&self) -> Option<&BTreeMap<String, Value>> {
        match self.content() {
            Some(Content::Map(es) | Content::Object(es)) => Some(es),
            _ => None,
        }
    }

    /// Number of elements or attributes of a known collection.
    pub fn element_count(&self) -> Option<usize> {
        self.elements()
            .map(<[Value]>::len)
            .or_else(|| self.entries().map(BTreeMap::len))
    }
}

// Marks

impl Value {
    #[inline]
    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    #[inline]
    pub fn is_marked(&self) -> bool {
        !self.marks.is_empty()
    }

    pub fn has_mark(&self, mark: &Mark) -> bool {
        self.marks.contains(mark)
    }

    #[must_use]
    pub fn mark(mut self, mark: Mark) -> Self {
        self.marks.insert(mark);
        self
    }

    #[must_use]
    pub fn with_marks(mut self, marks: &MarkSet) -> Self {
        self.marks.extend_from(marks);
        self
    }

    /// Remove one mark, keeping the others.
    #[must_use]
    pub fn without_mark(mut self, mark: &Mark) -> Self {
        self.marks.remove(mark);
        self
    }

    /// Strip the top-level marks, returning them separately.
    pub fn unmark(mut self) -> (Self, MarkSet) {
        let marks = std::mem::take(&mut self.marks);
        (self, marks)
    }

    /// Whether this value or anything nested in it is marked.
    pub fn contains_marks(&self) -> bool {
        if self.is_marked() {
            return true;
        }
        match self.content() {
            Some(Content::List(es) | Content::Set(es) | Content::Tuple(es)) => {
                es.iter().any(Value::contains_marks)
            }
            Some(Content::Map(es) | Content::Object(es)) => es.values().any(Value::contains_marks),
            _ => false,
        }
    }

    /// Strip every mark at any depth, returning their union.
    pub fn unmark_deep(self) -> (Self, MarkSet) {
        if !self.contains_marks() {
            return (self, MarkSet::new());
        }
        let (value, mut marks) = self.unmark();
        let repr = match value.repr {
            Repr::Known(ty, content) => {
                let content = match content {
                    Content::List(es) => Content::List(Heap::new(unmark_seq(es, &mut marks))),
                    Content::Set(es) => Content::Set(Heap::new(unmark_seq(es, &mut marks))),
                    Content::Tuple(es) => Content::Tuple(Heap::new(unmark_seq(es, &mut marks))),
                    Content::Map(es) => Content::Map(Heap::new(unmark_entries(es, &mut marks))),
                    Content::Object(es) => {
                        Content::Object(Heap::new(unmark_entries(es, &mut marks)))
                    }
                    primitive => primitive,
                };
                Repr::Known(ty, content)
            }
            other => other,
        };
        (Value::from_repr(repr), marks)
    }

    /// Record that an unknown will never resolve to null.
    #[must_use]
    pub fn refine_not_null(mut self) -> Self {
        if let Repr::Unknown { not_null, .. } = &mut self.repr {
            *not_null = true;
        }
        self
    }
}

fn unmark_seq(es: Heap<Vec<Value>>, marks: &mut MarkSet) -> Vec<Value> {
    Heap::into_inner(es)
        .into_iter()
        .map(|e| {
            let (e, m) = e.unmark_deep();
            marks.extend_from(&m);
            e
        })
        .collect()
}

fn unmark_entries(es: Heap<BTreeMap<String, Value>>, marks: &mut MarkSet) -> BTreeMap<String, Value> {
    Heap::into_inner(es)
        .into_iter()
        .map(|(k, v)| {
            let (v, m) = v.unmark_deep();
            marks.extend_from(&m);
            (k, v)
        })
        .collect()
}

/// Render a number the way it reads in source: whole numbers without a
/// fractional part.
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Null(ty) => write!(f, "Null({ty})")?,
            Repr::Unknown { ty, not_null } => {
                write!(f, "Unknown({ty}")?;
                if *not_null {
                    write!(f, ", not null")?;
                }
                write!(f, ")")?;
            }
            Repr::Known(_, content) => match content {
                Content::String(s) => write!(f, "String({:?})", &**s)?,
                Content::Number(n) => write!(f, "Number({n})")?,
                Content::Bool(b) => write!(f, "Bool({b})")?,
                Content::List(es) => write!(f, "List({:?})", &**es)?,
                Content::Set(es) => write!(f, "Set({:?})", &**es)?,
                Content::Tuple(es) => write!(f, "Tuple({:?})", &**es)?,
                Content::Map(es) => write!(f, "Map({:?})", &**es)?,
                Content::Object(es) => write!(f, "Object({:?})", &**es)?,
            },
        }
        if self.is_marked() {
            write!(f, " marked({})", self.marks)?;
        }
        Ok(())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_mark(&Mark::SENSITIVE) {
            return write!(f, "(sensitive value)");
        }
        match &self.repr {
            Repr::Null(_) => write!(f, "null"),
            Repr::Unknown { .. } => write!(f, "(unknown)"),
            Repr::Known(_, content) => match content {
                Content::String(s) => write!(f, "{:?}", &**s),
                Content::Number(n) => write!(f, "{}", format_number(*n)),
                Content::Bool(b) => write!(f, "{b}"),
                Content::List(es) | Content::Set(es) | Content::Tuple(es) => {
                    write!(f, "[")?;
                    for (i, e) in es.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{e}")?;
                    }
                    write!(f, "]")
                }
                Content::Map(es) | Content::Object(es) => {
                    write!(f, "{{")?;
                    for (i, (k, v)) in es.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{k:?}: {v}")?;
                    }
                    write!(f, "}}")
                }
            },
        }
    }
}
