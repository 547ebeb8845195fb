//! Ordering strategies shared by `sort`, `max`, `min` and `groupby`.
//!
//! A key function cannot return a borrow of the item it inspects, so the
//! "identity key" default is expressed as its own strategy,
//! [`NaturalOrder`], rather than as a key function.

use std::cmp::Ordering;

/// Compares two items.
pub trait Comparator<T> {
    /// Orders `left` relative to `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

/// Orders items by their own `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Orders items by a derived key.
#[derive(Debug, Clone, Copy)]
pub struct ByKey<F> {
    key: F,
}

impl<F> ByKey<F> {
    /// Orders by `key(item)`.
    pub const fn new(key: F) -> Self {
        Self { key }
    }
}

impl<T, K, F> Comparator<T> for ByKey<F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.key)(left).cmp(&(self.key)(right))
    }
}
