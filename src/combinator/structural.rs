//! Structural units: flattening, ordering, grouping and permuting.
//!
//! Apart from [`traverse`], every unit in this module has to see the whole
//! input before it can yield its first item, so it materializes the input
//! when applied and hands back an iterator over the buffer.

use std::iter::Peekable;
use std::vec;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::order::{ByKey, Comparator, NaturalOrder};
use crate::unit::{PipeUnit, nullary_unit};
use crate::value::Value;

// =============================================================================
// traverse
// =============================================================================

nullary_unit! {
    /// Recursively flattens nested sequences into their leaves.
    ///
    /// Text and bytes are leaves and are never split into characters. A
    /// mapping contributes its keys, as iterating a dictionary does.
    /// Typed inputs are traversed item by item: `vec![1, 2]` yields `1` and
    /// `2` as [`Value`]s. A [`Value`] input that is not a container is a
    /// single leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    /// use pipette::value;
    ///
    /// let flat = value![[1, 2], [[[3], [[4]]], [5]]].pipe(traverse()).pipe(concat());
    /// assert_eq!(flat, "1, 2, 3, 4, 5");
    ///
    /// let words = value!["abc", ["de"]].pipe(traverse()).pipe(as_list());
    /// assert_eq!(words, vec![value!("abc"), value!("de")]);
    /// ```
    Traverse
}

impl PipeUnit<Value> for Traverse {
    type Output = Leaves<vec::IntoIter<Value>>;

    fn apply(&self, input: Value) -> Self::Output {
        let top_level = match input {
            Value::Sequence(items) => items.into_iter(),
            Value::Mapping(entries) => mapping_keys(entries),
            leaf => vec![leaf].into_iter(),
        };
        Leaves::new(top_level)
    }
}

impl<I> PipeUnit<I> for Traverse
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    type Output = Leaves<I::IntoIter>;

    fn apply(&self, input: I) -> Self::Output {
        Leaves::new(input.into_iter())
    }
}

/// Depth-first iterator over the leaves of nested values.
///
/// Produced by applying [`traverse`]. Pulls from its source one item at a
/// time, so infinite inputs are fine.
#[derive(Debug, Clone)]
pub struct Leaves<I> {
    source: I,
    stack: SmallVec<[vec::IntoIter<Value>; 8]>,
}

impl<I> Leaves<I> {
    fn new(source: I) -> Self {
        Self {
            source,
            stack: SmallVec::new(),
        }
    }
}

fn mapping_keys(entries: IndexMap<String, Value>) -> vec::IntoIter<Value> {
    entries
        .into_keys()
        .map(Value::Text)
        .collect::<Vec<_>>()
        .into_iter()
}

impl<I> Iterator for Leaves<I>
where
    I: Iterator,
    I::Item: Into<Value>,
{
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        loop {
            let element = match self.stack.last_mut() {
                Some(level) => match level.next() {
                    Some(element) => element,
                    None => {
                        self.stack.pop();
                        continue;
                    }
                },
                None => self.source.next()?.into(),
            };

            match element {
                Value::Sequence(items) => self.stack.push(items.into_iter()),
                Value::Mapping(entries) => self.stack.push(mapping_keys(entries)),
                leaf => return Some(leaf),
            }
        }
    }
}

// =============================================================================
// permutations
// =============================================================================

/// Yields orderings of the input. See [`permutations`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permute {
    length: Option<usize>,
}

/// Yields every ordering of the input's items, or of `length` of them when
/// set with [`Permute::length`].
///
/// Orderings come out in lexicographic order of position: an input that is
/// already sorted produces sorted orderings. Items are distinguished by
/// position, not value, so repeated items produce repeated orderings. A
/// `length` larger than the input yields nothing; a `length` of zero yields
/// one empty ordering.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let pairs = "abc".chars().pipe(permutations().length(2)).pipe(as_list());
/// assert_eq!(pairs.len(), 6);
/// assert_eq!(pairs[0], vec!['a', 'b']);
/// assert_eq!(pairs[5], vec!['c', 'b']);
/// ```
pub const fn permutations() -> Permute {
    Permute { length: None }
}

impl Permute {
    /// Sets how many items each ordering contains.
    #[must_use]
    pub const fn length(self, length: usize) -> Self {
        Self {
            length: Some(length),
        }
    }
}

impl<I> PipeUnit<I> for Permute
where
    I: IntoIterator,
    I::Item: Clone,
{
    type Output = Permutations<I::Item>;

    fn apply(&self, input: I) -> Self::Output {
        let pool: Vec<I::Item> = input.into_iter().collect();
        let length = self.length.unwrap_or(pool.len());
        Permutations::new(pool, length)
    }
}

/// Iterator over orderings of a materialized pool.
///
/// Produced by applying [`permutations`].
#[derive(Debug, Clone)]
pub struct Permutations<T> {
    pool: Vec<T>,
    indices: Vec<usize>,
    cycles: Vec<usize>,
    length: usize,
    started: bool,
    exhausted: bool,
}

impl<T: Clone> Permutations<T> {
    fn new(pool: Vec<T>, length: usize) -> Self {
        let size = pool.len();
        let exhausted = length > size;
        let cycles = if exhausted {
            Vec::new()
        } else {
            (size - length + 1..=size).rev().collect()
        };
        Self {
            indices: (0..size).collect(),
            pool,
            cycles,
            length,
            started: false,
            exhausted,
        }
    }

    fn current(&self) -> Vec<T> {
        self.indices[..self.length]
            .iter()
            .map(|&position| self.pool[position].clone())
            .collect()
    }
}

impl<T: Clone> Iterator for Permutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.current());
        }

        let size = self.pool.len();
        for position in (0..self.length).rev() {
            self.cycles[position] -= 1;
            if self.cycles[position] == 0 {
                self.indices[position..].rotate_left(1);
                self.cycles[position] = size - position;
            } else {
                let offset = self.cycles[position];
                self.indices.swap(position, size - offset);
                return Some(self.current());
            }
        }

        self.exhausted = true;
        None
    }
}

// =============================================================================
// sort / reverse
// =============================================================================

/// Sorts the input. See [`sort`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Sort<C> {
    comparator: C,
    descending: bool,
}

/// Yields the input's items in ascending natural order.
///
/// The sort is stable: items that compare equal keep their input order, in
/// both directions.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let sorted = vec![3, 1, 2].pipe(sort()).pipe(as_list());
/// assert_eq!(sorted, vec![1, 2, 3]);
///
/// let by_length = vec!["ccc", "a", "bb", "d"]
///     .pipe(sort().by_key(|word: &&str| word.len()).descending())
///     .pipe(concat());
/// assert_eq!(by_length, "ccc, bb, a, d");
/// ```
pub const fn sort() -> Sort<NaturalOrder> {
    Sort {
        comparator: NaturalOrder,
        descending: false,
    }
}

impl<C> Sort<C> {
    /// Orders by `key(item)` instead of the items themselves.
    pub fn by_key<T, K, F>(self, key: F) -> Sort<ByKey<F>>
    where
        F: Fn(&T) -> K,
        K: Ord,
    {
        Sort {
            comparator: ByKey::new(key),
            descending: self.descending,
        }
    }

    /// Sorts largest first.
    #[must_use]
    pub fn descending(self) -> Self {
        Self {
            descending: true,
            ..self
        }
    }
}

impl<I, C> PipeUnit<I> for Sort<C>
where
    I: IntoIterator,
    C: Comparator<I::Item>,
{
    type Output = vec::IntoIter<I::Item>;

    fn apply(&self, input: I) -> Self::Output {
        let mut items: Vec<I::Item> = input.into_iter().collect();
        if self.descending {
            items.sort_by(|left, right| self.comparator.compare(right, left));
        } else {
            items.sort_by(|left, right| self.comparator.compare(left, right));
        }
        items.into_iter()
    }
}

nullary_unit! {
    /// Yields the input's items last to first.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// let backwards = (1..=3).pipe(reverse()).pipe(concat());
    /// assert_eq!(backwards, "3, 2, 1");
    /// ```
    Reverse
}

impl<I: IntoIterator> PipeUnit<I> for Reverse {
    type Output = std::iter::Rev<vec::IntoIter<I::Item>>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().collect::<Vec<_>>().into_iter().rev()
    }
}

// =============================================================================
// groupby
// =============================================================================

/// Sorts by a key and groups equal keys. See [`groupby`].
#[derive(Debug, Clone, Copy)]
pub struct GroupBy<F> {
    key: F,
}

/// Sorts the input by `key`, then yields `(key, items)` for each run of
/// equal keys, in ascending key order.
///
/// Because the input is sorted first, every item with a given key lands in
/// the same group, wherever it appeared. Items within a group keep their
/// input order.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let parity = |value: &i32| if value % 2 == 0 { "even" } else { "odd" };
/// let groups = vec![1, 2, 3, 4, 5].pipe(groupby(parity)).pipe(as_list());
/// assert_eq!(groups, vec![("even", vec![2, 4]), ("odd", vec![1, 3, 5])]);
/// ```
#[doc(alias = "group_by")]
pub const fn groupby<T, K, F>(key: F) -> GroupBy<F>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    GroupBy { key }
}

impl<I, K, F> PipeUnit<I> for GroupBy<F>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> K,
    K: Ord,
{
    type Output = Groups<K, I::Item>;

    fn apply(&self, input: I) -> Self::Output {
        let mut keyed: Vec<(K, I::Item)> = input
            .into_iter()
            .map(|item| ((self.key)(&item), item))
            .collect();
        keyed.sort_by(|(left, _), (right, _)| left.cmp(right));
        Groups {
            sorted: keyed.into_iter().peekable(),
        }
    }
}

/// Iterator over `(key, items)` groups of a sorted buffer.
///
/// Produced by applying [`groupby`].
#[derive(Debug, Clone)]
pub struct Groups<K, T> {
    sorted: Peekable<vec::IntoIter<(K, T)>>,
}

impl<K: Ord, T> Iterator for Groups<K, T> {
    type Item = (K, Vec<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, first) = self.sorted.next()?;
        let mut members = vec![first];
        while let Some((_, item)) = self.sorted.next_if(|(next_key, _)| *next_key == key) {
            members.push(item);
        }
        Some((key, members))
    }
}
