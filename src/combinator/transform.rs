//! Lazy transform units.
//!
//! Every unit here turns its input into a lazy iterator and returns it
//! without pulling a single item. Work happens only when a downstream unit
//! (or the caller) iterates.

use std::iter;

use crate::error::{PipeError, PipeResult};
use crate::unit::{PipeUnit, nullary_unit};
use crate::value::Value;

// =============================================================================
// select / where_
// =============================================================================

/// Maps a function over every item. See [`select`].
#[derive(Debug, Clone, Copy)]
pub struct Select<F> {
    selector: F,
}

/// Maps `selector` over each item, preserving order and count.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let squares = vec![1, 2, 3].pipe(select(|value: i32| value * value)).pipe(concat());
/// assert_eq!(squares, "1, 4, 9");
/// ```
pub const fn select<T, O, F>(selector: F) -> Select<F>
where
    F: Fn(T) -> O + Clone,
{
    Select { selector }
}

impl<I, O, F> PipeUnit<I> for Select<F>
where
    I: IntoIterator,
    F: Fn(I::Item) -> O + Clone,
{
    type Output = iter::Map<I::IntoIter, F>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().map(self.selector.clone())
    }
}

/// Keeps the items matching a predicate. See [`where_`].
#[derive(Debug, Clone, Copy)]
pub struct Where<F> {
    predicate: F,
}

/// Yields the items for which `predicate` holds, preserving relative order.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let even = vec![1, 2, 3].pipe(where_(|value: &i32| value % 2 == 0)).pipe(as_list());
/// assert_eq!(even, vec![2]);
/// ```
#[doc(alias = "where")]
#[doc(alias = "filter")]
pub const fn where_<T, F>(predicate: F) -> Where<F>
where
    F: Fn(&T) -> bool + Clone,
{
    Where { predicate }
}

impl<I, F> PipeUnit<I> for Where<F>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> bool + Clone,
{
    type Output = iter::Filter<I::IntoIter, F>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().filter(self.predicate.clone())
    }
}

// =============================================================================
// take / skip
// =============================================================================

/// Yields at most the first `count` items. See [`take`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Take {
    count: usize,
}

/// Yields at most the first `count` items.
///
/// The source is never pulled again once `count` items have been produced,
/// so `take` is safe on infinite inputs.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let head = (1..).pipe(take(2)).pipe(concat());
/// assert_eq!(head, "1, 2");
/// ```
pub const fn take(count: usize) -> Take {
    Take { count }
}

impl<I: IntoIterator> PipeUnit<I> for Take {
    type Output = iter::Take<I::IntoIter>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().take(self.count)
    }
}

/// Discards the first `count` items. See [`skip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skip {
    count: usize,
}

/// Discards the first `count` items and yields the rest.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let rest = vec![1, 2, 3, 4, 5].pipe(skip(2)).pipe(concat());
/// assert_eq!(rest, "3, 4, 5");
/// ```
pub const fn skip(count: usize) -> Skip {
    Skip { count }
}

impl<I: IntoIterator> PipeUnit<I> for Skip {
    type Output = iter::Skip<I::IntoIter>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().skip(self.count)
    }
}

// =============================================================================
// take_while / skip_while
// =============================================================================

/// Yields items while a predicate holds. See [`take_while`].
#[derive(Debug, Clone, Copy)]
pub struct TakeWhile<F> {
    predicate: F,
}

/// Yields items while `predicate` holds and stops for good at the first
/// failure, even if later items would match again.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let prefix = vec![1, 2, 3, 4, 1].pipe(take_while(|value: &i32| *value < 3)).pipe(concat());
/// assert_eq!(prefix, "1, 2");
/// ```
pub const fn take_while<T, F>(predicate: F) -> TakeWhile<F>
where
    F: Fn(&T) -> bool + Clone,
{
    TakeWhile { predicate }
}

impl<I, F> PipeUnit<I> for TakeWhile<F>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> bool + Clone,
{
    type Output = iter::TakeWhile<I::IntoIter, F>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().take_while(self.predicate.clone())
    }
}

/// Discards items while a predicate holds. See [`skip_while`].
#[derive(Debug, Clone, Copy)]
pub struct SkipWhile<F> {
    predicate: F,
}

/// Discards items while `predicate` holds; once it fails, yields every
/// remaining item, including ones that would match.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let suffix = vec![1, 2, 3, 4, 1].pipe(skip_while(|value: &i32| *value < 3)).pipe(concat());
/// assert_eq!(suffix, "3, 4, 1");
/// ```
pub const fn skip_while<T, F>(predicate: F) -> SkipWhile<F>
where
    F: Fn(&T) -> bool + Clone,
{
    SkipWhile { predicate }
}

impl<I, F> PipeUnit<I> for SkipWhile<F>
where
    I: IntoIterator,
    F: Fn(&I::Item) -> bool + Clone,
{
    type Output = iter::SkipWhile<I::IntoIter, F>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().skip_while(self.predicate.clone())
    }
}

// =============================================================================
// chain_with / chain
// =============================================================================

/// Appends other sequences after the input. See [`chain_with`].
#[derive(Debug, Clone)]
pub struct ChainWith<J> {
    others: J,
}

/// Yields every item of the input, then every item of each sequence in
/// `others`, in order.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let all = vec![1, 2, 3].pipe(chain_with(vec![vec![4, 5], vec![6]])).pipe(concat());
/// assert_eq!(all, "1, 2, 3, 4, 5, 6");
/// ```
pub const fn chain_with<J>(others: J) -> ChainWith<J>
where
    J: IntoIterator + Clone,
    J::Item: IntoIterator,
{
    ChainWith { others }
}

impl<I, J> PipeUnit<I> for ChainWith<J>
where
    I: IntoIterator,
    J: IntoIterator + Clone,
    J::Item: IntoIterator<Item = I::Item>,
{
    type Output = iter::Chain<I::IntoIter, iter::Flatten<J::IntoIter>>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().chain(self.others.clone().into_iter().flatten())
    }
}

nullary_unit! {
    /// Concatenates a sequence of sequences. See [`chain`].
    ///
    /// For typed input the compiler guarantees every item is iterable. For
    /// [`Value`] input the check happens while iterating: the first item that
    /// is not a sequence yields a [`PipeError::Shape`] and ends the
    /// iteration. Use [`traverse`](crate::combinator::traverse) for mixed
    /// nesting.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    /// use pipette::value;
    ///
    /// let flat = vec![vec![1, 2], vec![3, 4], vec![5]].pipe(chain()).pipe(concat());
    /// assert_eq!(flat, "1, 2, 3, 4, 5");
    ///
    /// let mut mixed = value![1, 2, [3]].pipe(chain());
    /// assert!(mixed.next().unwrap().is_err());
    /// assert!(mixed.next().is_none());
    /// ```
    Chain
}

impl<I> PipeUnit<I> for Chain
where
    I: IntoIterator,
    I::Item: IntoIterator,
{
    type Output = iter::Flatten<I::IntoIter>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().flatten()
    }
}

impl PipeUnit<Value> for Chain {
    type Output = ValueChain;

    fn apply(&self, input: Value) -> ValueChain {
        match input {
            Value::Sequence(items) => ValueChain {
                sequences: Some(items.into_iter()),
                current: None,
                failure: None,
            },
            other => ValueChain {
                sequences: None,
                current: None,
                failure: Some(PipeError::shape("chain", "a sequence", other.shape())),
            },
        }
    }
}

/// Lazy concatenation of the sequences inside a [`Value`].
///
/// Produced by applying [`chain`] to a `Value`.
#[derive(Debug)]
pub struct ValueChain {
    sequences: Option<std::vec::IntoIter<Value>>,
    current: Option<std::vec::IntoIter<Value>>,
    failure: Option<PipeError>,
}

impl Iterator for ValueChain {
    type Item = PipeResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(failure) = self.failure.take() {
            return Some(Err(failure));
        }
        loop {
            if let Some(item) = self.current.as_mut().and_then(Iterator::next) {
                return Some(Ok(item));
            }
            self.current = None;

            match self.sequences.as_mut()?.next() {
                Some(Value::Sequence(items)) => self.current = Some(items.into_iter()),
                Some(other) => {
                    self.sequences = None;
                    return Some(Err(PipeError::shape(
                        "chain",
                        "a sequence of sequences",
                        other.shape(),
                    )));
                }
                None => {
                    self.sequences = None;
                    return None;
                }
            }
        }
    }
}

// =============================================================================
// islice / izip
// =============================================================================

/// Positional slicing. See [`islice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Islice {
    start: usize,
    stop: Option<usize>,
    step: usize,
}

/// Yields the items at positions `start, start + step, ...` below `stop`.
///
/// A `stop` of `None` runs to the end of the input. Items past `stop` are
/// never pulled.
///
/// # Errors
///
/// Returns [`PipeError::Argument`] when `step` is zero.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let odd_positions = (1..=9).pipe(islice(2, Some(8), 2)?).pipe(concat());
/// assert_eq!(odd_positions, "3, 5, 7");
/// # Ok::<(), pipette::PipeError>(())
/// ```
pub fn islice(start: usize, stop: Option<usize>, step: usize) -> PipeResult<Islice> {
    if step == 0 {
        return Err(PipeError::argument("islice", "step must be at least 1"));
    }
    Ok(Islice { start, stop, step })
}

impl<I: IntoIterator> PipeUnit<I> for Islice {
    type Output = iter::StepBy<iter::Take<iter::Skip<I::IntoIter>>>;

    fn apply(&self, input: I) -> Self::Output {
        let length = self
            .stop
            .map_or(usize::MAX, |stop| stop.saturating_sub(self.start));
        input
            .into_iter()
            .skip(self.start)
            .take(length)
            .step_by(self.step)
    }
}

/// Pairs items positionally with another sequence. See [`izip`].
#[derive(Debug, Clone)]
pub struct Izip<J> {
    other: J,
}

/// Yields `(item, other_item)` pairs, stopping at the shorter sequence.
///
/// Zip more than two sequences by chaining: `izip(b)` followed by `izip(c)`
/// yields `((a, b), c)`.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let pairs = vec![1, 2, 3].pipe(izip(vec![9, 8])).pipe(as_list());
/// assert_eq!(pairs, vec![(1, 9), (2, 8)]);
/// ```
pub const fn izip<J>(other: J) -> Izip<J>
where
    J: IntoIterator + Clone,
{
    Izip { other }
}

impl<I, J> PipeUnit<I> for Izip<J>
where
    I: IntoIterator,
    J: IntoIterator + Clone,
{
    type Output = iter::Zip<I::IntoIter, J::IntoIter>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().zip(self.other.clone())
    }
}
