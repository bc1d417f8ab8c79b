//! Unsafe type unification.
//!
//! Finds the most general type that every input type can be converted to,
//! allowing conversions that may fail for some values (number to string and
//! back, for instance).

use std::collections::BTreeMap;

use crate::ty::Type;

/// Unify `types`, or `None` if no common type exists (or `types` is empty).
pub fn unify_unsafe(types: &[Type]) -> Option<Type> {
    let first = types.first()?;
    if types.iter().any(Type::is_dynamic) {
        return Some(Type::Dynamic);
    }
    if types.iter().all(|t| t == first) {
        return Some(first.clone());
    }
    if types.iter().all(Type::is_primitive) {
        return Some(Type::String);
    }
    if types
        .iter()
        .all(|t| matches!(t, Type::List(_) | Type::Set(_) | Type::Tuple(_)))
    {
        return unify_sequences(types);
    }
    if types.iter().all(|t| matches!(t, Type::Map(_) | Type::Object(_))) {
        return unify_mappings(types);
    }
    None
}

fn unify_sequences(types: &[Type]) -> Option<Type> {
    // Same-length tuples stay tuples.
    if let Some(Type::Tuple(first)) = types.first() {
        let same_tuples = types
            .iter()
            .all(|t| matches!(t, Type::Tuple(es) if es.len() == first.len()));
        if same_tuples {
            let elems = (0..first.len())
                .map(|i| {
                    let column: Vec<Type> = types
                        .iter()
                        .filter_map(|t| match t {
                            Type::Tuple(es) => es.get(i).cloned(),
                            _ => None,
                        })
                        .collect();
                    unify_unsafe(&column)
                })
                .collect::<Option<Vec<_>>>()?;
            return Some(Type::Tuple(elems));
        }
    }

    let mut elems = Vec::new();
    for t in types {
        match t {
            Type::List(e) | Type::Set(e) => elems.push((**e).clone()),
            Type::Tuple(es) => elems.extend(es.iter().cloned()),
            _ => return None,
        }
    }
    let elem = unify_or_dynamic(&elems)?;

    let any_list = types.iter().any(Type::is_list);
    let any_set = types.iter().any(Type::is_set);
    if any_set && !any_list {
        Some(Type::set(elem))
    } else {
        Some(Type::list(elem))
    }
}

fn unify_mappings(types: &[Type]) -> Option<Type> {
    if let Some(Type::Object(first)) = types.first() {
        let same_objects = types.iter().all(
            |t| matches!(t, Type::Object(attrs) if attrs.keys().eq(first.keys())),
        );
        if same_objects {
            let attrs = first
                .keys()
                .map(|k| {
                    let column: Vec<Type> = types
                        .iter()
                        .filter_map(|t| match t {
                            Type::Object(attrs) => attrs.get(k).cloned(),
                            _ => None,
                        })
                        .collect();
                    Some((k.clone(), unify_unsafe(&column)?))
                })
                .collect::<Option<BTreeMap<_, _>>>()?;
            return Some(Type::Object(attrs));
        }
    }

    let mut elems = Vec::new();
    for t in types {
        match t {
            Type::Map(e) => elems.push((**e).clone()),
            Type::Object(attrs) => elems.extend(attrs.values().cloned()),
            _ => return None,
        }
    }
    unify_or_dynamic(&elems).map(Type::map)
}

fn unify_or_dynamic(types: &[Type]) -> Option<Type> {
    if types.is_empty() {
        Some(Type::Dynamic)
    } else {
        unify_unsafe(types)
    }
}
