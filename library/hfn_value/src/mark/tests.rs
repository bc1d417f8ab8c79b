use super::*;
use pretty_assertions::assert_eq;

#[test]
fn sensitive_constant_matches_named_mark() {
    assert_eq!(Mark::SENSITIVE, Mark::new("sensitive"));
    assert_eq!(Mark::SENSITIVE.name(), "sensitive");
}

#[test]
fn insert_is_idempotent_and_sorted() {
    let mut set = MarkSet::new();
    assert!(set.insert(Mark::new("b")));
    assert!(set.insert(Mark::new("a")));
    assert!(!set.insert(Mark::new("b")));
    assert_eq!(set.len(), 2);
    let names: Vec<&str> = set.iter().map(Mark::name).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn remove_only_named_mark() {
    let mut set: MarkSet = [Mark::SENSITIVE, Mark::new("pii")].into_iter().collect();
    assert!(set.remove(&Mark::SENSITIVE));
    assert!(!set.remove(&Mark::SENSITIVE));
    assert!(set.contains(&Mark::new("pii")));
    assert_eq!(set.len(), 1);
}

#[test]
fn extend_unions() {
    let mut left = MarkSet::single(Mark::new("a"));
    let right: MarkSet = [Mark::new("a"), Mark::new("c")].into_iter().collect();
    left.extend_from(&right);
    assert_eq!(left.to_string(), "a, c");
}
