//! Marks: opaque taint tokens carried alongside a value.
//!
//! A mark never changes what a value *is*, only how results derived from it
//! are annotated. The only mark the library itself defines is
//! [`Mark::SENSITIVE`]; hosts may introduce their own with [`Mark::new`].

use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// An opaque mark token, compared by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mark(Cow<'static, str>);

impl Mark {
    /// Marks a value as sensitive (e.g. a secret that must not be displayed).
    pub const SENSITIVE: Mark = Mark(Cow::Borrowed("sensitive"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Mark(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A set of marks.
///
/// Kept sorted and deduplicated. Almost every value carries zero or one
/// mark, so the storage is inline for the single-mark case.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MarkSet(SmallVec<[Mark; 1]>);

impl MarkSet {
    #[inline]
    pub fn new() -> Self {
        MarkSet(SmallVec::new())
    }

    /// A set holding exactly one mark.
    pub fn single(mark: Mark) -> Self {
        let mut set = MarkSet::new();
        set.insert(mark);
        set
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, mark: &Mark) -> bool {
        self.0.binary_search(mark).is_ok()
    }

    /// Insert a mark. Returns `false` if it was already present.
    pub fn insert(&mut self, mark: Mark) -> bool {
        match self.0.binary_search(&mark) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, mark);
                true
            }
        }
    }

    /// Remove a mark. Returns `false` if it was not present.
    pub fn remove(&mut self, mark: &Mark) -> bool {
        match self.0.binary_search(mark) {
            Ok(pos) => {
                self.0.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Add every mark of `other` to this set.
    pub fn extend_from(&mut self, other: &MarkSet) {
        for mark in other.iter() {
            self.insert(mark.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mark> {
        self.0.iter()
    }
}

impl FromIterator<Mark> for MarkSet {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> Self {
        let mut set = MarkSet::new();
        for mark in iter {
            set.insert(mark);
        }
        set
    }
}

impl<'a> IntoIterator for &'a MarkSet {
    type Item = &'a Mark;
    type IntoIter = std::slice::Iter<'a, Mark>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for MarkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, mark) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{mark}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
