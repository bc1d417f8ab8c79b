//! Set primitives over element slices.
//!
//! Set content is kept in a canonical order so that two sets with the same
//! members compare equal structurally. Known elements sort before nulls,
//! nulls before unknowns. Unknown elements are never merged: two unknowns
//! may turn out to be different values.

use std::cmp::Ordering;

use super::{Content, Repr, Value};

/// Canonical total order over values.
pub fn total_cmp(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v.repr() {
            Repr::Known(..) => 0,
            Repr::Null(_) => 1,
            Repr::Unknown { .. } => 2,
        }
    }

    rank(a)
        .cmp(&rank(b))
        .then_with(|| a.ty().cmp(b.ty()))
        .then_with(|| match (a.content(), b.content()) {
            (Some(x), Some(y)) => content_cmp(x, y),
            _ => Ordering::Equal,
        })
}

fn content_cmp(a: &Content, b: &Content) -> Ordering {
    match (a, b) {
        (Content::String(x), Content::String(y)) => x.as_str().cmp(y.as_str()),
        (Content::Number(x), Content::Number(y)) => x.total_cmp(y),
        (Content::Bool(x), Content::Bool(y)) => x.cmp(y),
        (Content::List(x), Content::List(y))
        | (Content::Set(x), Content::Set(y))
        | (Content::Tuple(x), Content::Tuple(y)) => seq_cmp(x, y),
        (Content::Map(x), Content::Map(y)) | (Content::Object(x), Content::Object(y)) => x
            .iter()
            .map(|(k, _)| k)
            .cmp(y.iter().map(|(k, _)| k))
            .then_with(|| {
                x.values()
                    .zip(y.values())
                    .map(|(l, r)| total_cmp(l, r))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            }),
        _ => variant_index(a).cmp(&variant_index(b)),
    }
}

fn seq_cmp(x: &[Value], y: &[Value]) -> Ordering {
    x.iter()
        .zip(y)
        .map(|(l, r)| total_cmp(l, r))
        .find(|o| o.is_ne())
        .unwrap_or_else(|| x.len().cmp(&y.len()))
}

fn variant_index(c: &Content) -> u8 {
    match c {
        Content::String(_) => 0,
        Content::Number(_) => 1,
        Content::Bool(_) => 2,
        Content::List(_) => 3,
        Content::Set(_) => 4,
        Content::Map(_) => 5,
        Content::Tuple(_) => 6,
        Content::Object(_) => 7,
    }
}

/// Sort into canonical order and drop duplicate known elements.
pub(crate) fn normalize(mut elems: Vec<Value>) -> Vec<Value> {
    elems.sort_by(total_cmp);
    elems.dedup_by(|later, earlier| later.is_known() && later == earlier);
    elems
}

/// Membership by structural equality. Unknown elements never match.
pub fn contains(elems: &[Value], v: &Value) -> bool {
    v.is_known() && elems.iter().any(|e| e == v)
}

pub fn union(a: &[Value], b: &[Value]) -> Vec<Value> {
    normalize(a.iter().chain(b).cloned().collect())
}

pub fn intersection(a: &[Value], b: &[Value]) -> Vec<Value> {
    a.iter().filter(|e| contains(b, e)).cloned().collect()
}

pub fn subtract(a: &[Value], b: &[Value]) -> Vec<Value> {
    a.iter().filter(|e| !contains(b, e)).cloned().collect()
}

pub fn symmetric_difference(a: &[Value], b: &[Value]) -> Vec<Value> {
    normalize(subtract(a, b).into_iter().chain(subtract(b, a)).collect())
}
