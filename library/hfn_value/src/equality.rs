//! Tri-state equality.
//!
//! Comparing values whose content is not fully known cannot always produce a
//! definite answer, so [`Value::equals`] returns a `Bool` value that may be
//! unknown. A definite difference anywhere wins over unknown content
//! elsewhere: `[1, ?]` is knowably not equal to `[2, ?]`.

use std::collections::BTreeMap;

use crate::mark::MarkSet;
use crate::ty::Type;
use crate::value::{set, Content, Repr, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tri {
    True,
    False,
    Unknown,
}

impl Tri {
    fn from_bool(b: bool) -> Self {
        if b {
            Tri::True
        } else {
            Tri::False
        }
    }

    /// Conjunction where a definite `False` dominates.
    fn all(iter: impl IntoIterator<Item = Tri>) -> Tri {
        let mut saw_unknown = false;
        for t in iter {
            match t {
                Tri::False => return Tri::False,
                Tri::Unknown => saw_unknown = true,
                Tri::True => {}
            }
        }
        if saw_unknown {
            Tri::Unknown
        } else {
            Tri::True
        }
    }
}

impl Value {
    /// Equality under the value model: a known or unknown `Bool`, marked
    /// with the marks of both operands.
    pub fn equals(&self, other: &Value) -> Value {
        let result = match compare(self, other) {
            Tri::True => Value::bool(true),
            Tri::False => Value::bool(false),
            Tri::Unknown => Value::unknown(Type::Bool).refine_not_null(),
        };
        let mut marks = MarkSet::new();
        marks.extend_from(self.marks());
        marks.extend_from(other.marks());
        result.with_marks(&marks)
    }
}

fn compare(a: &Value, b: &Value) -> Tri {
    match (a.repr(), b.repr()) {
        (Repr::Unknown { .. }, Repr::Unknown { .. }) => Tri::Unknown,
        (Repr::Unknown { not_null, .. }, Repr::Null(_))
        | (Repr::Null(_), Repr::Unknown { not_null, .. }) => {
            if *not_null {
                Tri::False
            } else {
                Tri::Unknown
            }
        }
        (Repr::Unknown { .. }, _) | (_, Repr::Unknown { .. }) => Tri::Unknown,
        (Repr::Null(_), Repr::Null(_)) => Tri::True,
        (Repr::Null(_), _) | (_, Repr::Null(_)) => Tri::False,
        (Repr::Known(ta, ca), Repr::Known(tb, cb)) => {
            if ta.is_dynamic() || tb.is_dynamic() {
                return Tri::Unknown;
            }
            if ta != tb {
                return Tri::False;
            }
            compare_content(ca, cb)
        }
    }
}

#[allow(clippy::float_cmp)]
fn compare_content(a: &Content, b: &Content) -> Tri {
    match (a, b) {
        (Content::String(x), Content::String(y)) => Tri::from_bool(x == y),
        (Content::Number(x), Content::Number(y)) => Tri::from_bool(x == y),
        (Content::Bool(x), Content::Bool(y)) => Tri::from_bool(x == y),
        (Content::List(x), Content::List(y)) | (Content::Tuple(x), Content::Tuple(y)) => {
            if x.len() != y.len() {
                return Tri::False;
            }
            Tri::all(x.iter().zip(y.iter()).map(|(l, r)| compare(l, r)))
        }
        (Content::Set(x), Content::Set(y)) => {
            if !x.iter().all(Value::is_wholly_known) || !y.iter().all(Value::is_wholly_known) {
                return Tri::Unknown;
            }
            Tri::from_bool(x.len() == y.len() && x.iter().all(|e| set::contains(y, e)))
        }
        (Content::Map(x), Content::Map(y)) | (Content::Object(x), Content::Object(y)) => {
            compare_entries(x, y)
        }
        _ => Tri::False,
    }
}

fn compare_entries(x: &BTreeMap<String, Value>, y: &BTreeMap<String, Value>) -> Tri {
    if !x.keys().eq(y.keys()) {
        return Tri::False;
    }
    Tri::all(x.values().zip(y.values()).map(|(l, r)| compare(l, r)))
}

#[cfg(test)]
mod tests;
