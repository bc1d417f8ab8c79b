//! Shared immutable storage for value content.
//!
//! `Heap<T>` wraps `Arc<T>`. The constructor is `pub(super)`, so collection
//! content can only be allocated through `Value`'s factory methods, which
//! are responsible for keeping content and declared type in agreement.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted, immutable content of a known value.
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(super) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }
}

impl<T: Clone> Heap<T> {
    /// Take the content out, cloning only if it is shared.
    pub(super) fn into_inner(this: Self) -> T {
        Arc::try_unwrap(this.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl<T: ?Sized + Eq> Eq for Heap<T> {}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
