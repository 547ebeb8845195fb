//! Eager terminal units (reducers).
//!
//! A reducer consumes its whole input exactly once, or up to the point where
//! the answer is known for the short-circuiting ones ([`any`], [`all`],
//! [`first`], [`index`]), and returns a plain value.
//!
//! Reducers that have no answer for some inputs return [`PipeResult`]:
//!
//! | Unit | Fails with |
//! |---|---|
//! | [`first`], [`max`], [`min`], [`aggregate`] | [`PipeError::EmptySequence`] |
//! | [`average`] | [`PipeError::DivisionByZero`] |
//! | [`index`] | [`PipeError::NotFound`] |

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::iter;

use crate::error::{PipeError, PipeResult};
use crate::order::{ByKey, Comparator, NaturalOrder};
use crate::unit::{PipeUnit, nullary_unit};
use crate::value::Value;

// =============================================================================
// count / length / sum / average
// =============================================================================

nullary_unit! {
    /// Counts items by iterating the whole input.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// assert_eq!((1..=10).pipe(where_(|value: &i32| value % 3 == 0)).pipe(count()), 3);
    /// ```
    Count
}

impl<I: IntoIterator> PipeUnit<I> for Count {
    type Output = usize;

    fn apply(&self, input: I) -> usize {
        input.into_iter().count()
    }
}

nullary_unit! {
    /// Reports the size of an input that knows its size, without iterating.
    ///
    /// Applied to a [`Value`], reports the number of items of a sequence,
    /// entries of a mapping, characters of text or bytes of binary data.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    /// use pipette::value;
    ///
    /// assert_eq!(vec![1, 2, 3].pipe(length()), 3);
    /// assert_eq!(value!("héllo").pipe(length())?, 5);
    /// # Ok::<(), pipette::PipeError>(())
    /// ```
    Length
}

impl<I> PipeUnit<I> for Length
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
{
    type Output = usize;

    fn apply(&self, input: I) -> usize {
        input.into_iter().len()
    }
}

impl PipeUnit<Value> for Length {
    type Output = PipeResult<usize>;

    fn apply(&self, input: Value) -> PipeResult<usize> {
        match input {
            Value::Sequence(items) => Ok(items.len()),
            Value::Mapping(entries) => Ok(entries.len()),
            Value::Text(text) => Ok(text.chars().count()),
            Value::Bytes(bytes) => Ok(bytes.len()),
            scalar => Err(PipeError::shape("length", "a sized value", scalar.shape())),
        }
    }
}

nullary_unit! {
    /// Adds all items together.
    ///
    /// An empty input sums to the additive identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// let euler1 = (1..1000)
    ///     .pipe(where_(|value: &u32| value % 3 == 0 || value % 5 == 0))
    ///     .pipe(sum());
    /// assert_eq!(euler1, 233_168);
    /// ```
    #[doc(alias = "add")]
    Sum
}

impl<I> PipeUnit<I> for Sum
where
    I: IntoIterator,
    I::Item: iter::Sum<I::Item>,
{
    type Output = I::Item;

    fn apply(&self, input: I) -> I::Item {
        input.into_iter().sum()
    }
}

/// Numeric items that [`average`] can work with.
pub trait AsFloat {
    /// Converts the item to `f64`, rounding where the type is wider than the
    /// mantissa.
    fn as_float(self) -> f64;
}

macro_rules! impl_as_float {
    ($($numeric:ty),* $(,)?) => {
        $(
            impl AsFloat for $numeric {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                #[inline]
                fn as_float(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_as_float!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<T: AsFloat + Copy> AsFloat for &T {
    #[inline]
    fn as_float(self) -> f64 {
        (*self).as_float()
    }
}

nullary_unit! {
    /// Arithmetic mean of the items, as `f64`.
    ///
    /// Fails with [`PipeError::DivisionByZero`] on an empty input; guard
    /// beforehand when emptiness is possible.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// assert_eq!(vec![1, 2, 3, 4].pipe(average())?, 2.5);
    /// assert!(Vec::<i32>::new().pipe(average()).is_err());
    /// # Ok::<(), pipette::PipeError>(())
    /// ```
    Average
}

impl<I> PipeUnit<I> for Average
where
    I: IntoIterator,
    I::Item: AsFloat,
{
    type Output = PipeResult<f64>;

    #[allow(clippy::cast_precision_loss)]
    fn apply(&self, input: I) -> PipeResult<f64> {
        let (total, count) = input
            .into_iter()
            .fold((0.0_f64, 0_usize), |(total, count), item| {
                (total + item.as_float(), count + 1)
            });
        if count == 0 {
            return Err(PipeError::DivisionByZero {
                operation: "average",
            });
        }
        Ok(total / count as f64)
    }
}

// =============================================================================
// first / any / all
// =============================================================================

nullary_unit! {
    /// The first item. Pulls exactly one item from the input.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// assert_eq!((7..).pipe(first())?, 7);
    /// # Ok::<(), pipette::PipeError>(())
    /// ```
    First
}

impl<I: IntoIterator> PipeUnit<I> for First {
    type Output = PipeResult<I::Item>;

    fn apply(&self, input: I) -> Self::Output {
        input
            .into_iter()
            .next()
            .ok_or(PipeError::empty("first"))
    }
}

/// Tests whether some item satisfies a predicate. See [`any`].
#[derive(Debug, Clone, Copy)]
pub struct Any<F> {
    predicate: F,
}

/// `true` when `predicate` holds for at least one item. Stops at the first
/// match; an empty input gives `false`.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// assert!((1..).pipe(any(|value: i32| value > 5)));
/// ```
pub const fn any<T, F>(predicate: F) -> Any<F>
where
    F: Fn(T) -> bool,
{
    Any { predicate }
}

impl<I, F> PipeUnit<I> for Any<F>
where
    I: IntoIterator,
    F: Fn(I::Item) -> bool,
{
    type Output = bool;

    fn apply(&self, input: I) -> bool {
        input.into_iter().any(&self.predicate)
    }
}

/// Tests whether every item satisfies a predicate. See [`all`].
#[derive(Debug, Clone, Copy)]
pub struct All<F> {
    predicate: F,
}

/// `true` when `predicate` holds for every item. Stops at the first
/// failure; an empty input gives `true`.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// assert!(!(1..).pipe(all(|value: i32| value < 5)));
/// assert!(Vec::<i32>::new().pipe(all(|value: i32| value < 0)));
/// ```
pub const fn all<T, F>(predicate: F) -> All<F>
where
    F: Fn(T) -> bool,
{
    All { predicate }
}

impl<I, F> PipeUnit<I> for All<F>
where
    I: IntoIterator,
    F: Fn(I::Item) -> bool,
{
    type Output = bool;

    fn apply(&self, input: I) -> bool {
        input.into_iter().all(&self.predicate)
    }
}

// =============================================================================
// max / min
// =============================================================================

/// Keeps the first item that no later item beats in the `wanted` direction.
fn extremum<I, C>(
    input: I,
    comparator: &C,
    wanted: Ordering,
    operation: &'static str,
) -> PipeResult<I::Item>
where
    I: IntoIterator,
    C: Comparator<I::Item>,
{
    let mut items = input.into_iter();
    let seed = items.next().ok_or(PipeError::empty(operation))?;
    Ok(items.fold(seed, |best, candidate| {
        if comparator.compare(&candidate, &best) == wanted {
            candidate
        } else {
            best
        }
    }))
}

/// Largest item. See [`max`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Max<C> {
    comparator: C,
}

/// The largest item, or the largest by key with [`Max::by_key`].
///
/// Ties go to the earliest item.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// assert_eq!(vec![3, 9, 2].pipe(max())?, 9);
///
/// let longest = vec!["ab", "cd", "e"].pipe(max().by_key(|word: &&str| word.len()))?;
/// assert_eq!(longest, "ab");
/// # Ok::<(), pipette::PipeError>(())
/// ```
pub const fn max() -> Max<NaturalOrder> {
    Max {
        comparator: NaturalOrder,
    }
}

impl<C> Max<C> {
    /// Compares `key(item)` instead of the items themselves.
    pub fn by_key<T, K, F>(self, key: F) -> Max<ByKey<F>>
    where
        F: Fn(&T) -> K,
        K: Ord,
    {
        Max {
            comparator: ByKey::new(key),
        }
    }
}

impl<I, C> PipeUnit<I> for Max<C>
where
    I: IntoIterator,
    C: Comparator<I::Item>,
{
    type Output = PipeResult<I::Item>;

    fn apply(&self, input: I) -> Self::Output {
        extremum(input, &self.comparator, Ordering::Greater, "max")
    }
}

/// Smallest item. See [`min`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Min<C> {
    comparator: C,
}

/// The smallest item, or the smallest by key with [`Min::by_key`].
///
/// Ties go to the earliest item.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let shortest = vec!["ab", "c", "d"].pipe(min().by_key(|word: &&str| word.len()))?;
/// assert_eq!(shortest, "c");
/// # Ok::<(), pipette::PipeError>(())
/// ```
pub const fn min() -> Min<NaturalOrder> {
    Min {
        comparator: NaturalOrder,
    }
}

impl<C> Min<C> {
    /// Compares `key(item)` instead of the items themselves.
    pub fn by_key<T, K, F>(self, key: F) -> Min<ByKey<F>>
    where
        F: Fn(&T) -> K,
        K: Ord,
    {
        Min {
            comparator: ByKey::new(key),
        }
    }
}

impl<I, C> PipeUnit<I> for Min<C>
where
    I: IntoIterator,
    C: Comparator<I::Item>,
{
    type Output = PipeResult<I::Item>;

    fn apply(&self, input: I) -> Self::Output {
        extremum(input, &self.comparator, Ordering::Less, "min")
    }
}

// =============================================================================
// aggregate
// =============================================================================

/// Left fold seeded with the first item. See [`aggregate`].
#[derive(Debug, Clone, Copy)]
pub struct Aggregate<F> {
    function: F,
}

/// Left fold of the items with `function(accumulator, item)`.
///
/// Without an initializer the first item seeds the accumulator and an empty
/// input fails with [`PipeError::EmptySequence`]. With
/// [`Aggregate::initializer`] the fold starts from the given value, may
/// change type, and an empty input yields the initializer.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let factorial = (1..10).pipe(aggregate(|product: i32, value: i32| product * value))?;
/// assert_eq!(factorial, 362_880);
///
/// let word = vec!['a', 'b'].pipe(
///     aggregate(|mut text: String, letter: char| {
///         text.push(letter);
///         text
///     })
///     .initializer(String::from(">")),
/// );
/// assert_eq!(word, ">ab");
/// # Ok::<(), pipette::PipeError>(())
/// ```
#[doc(alias = "reduce")]
#[doc(alias = "fold")]
pub const fn aggregate<F>(function: F) -> Aggregate<F> {
    Aggregate { function }
}

impl<F> Aggregate<F> {
    /// Starts the fold from `initial` instead of the first item.
    pub fn initializer<Z>(self, initial: Z) -> AggregateFrom<F, Z> {
        AggregateFrom {
            function: self.function,
            initial,
        }
    }
}

impl<I, F> PipeUnit<I> for Aggregate<F>
where
    I: IntoIterator,
    F: Fn(I::Item, I::Item) -> I::Item,
{
    type Output = PipeResult<I::Item>;

    fn apply(&self, input: I) -> Self::Output {
        let mut items = input.into_iter();
        let seed = items.next().ok_or(PipeError::empty("aggregate"))?;
        Ok(items.fold(seed, &self.function))
    }
}

/// Left fold from an explicit initial value. See [`Aggregate::initializer`].
#[derive(Debug, Clone, Copy)]
pub struct AggregateFrom<F, Z> {
    function: F,
    initial: Z,
}

impl<I, F, Z> PipeUnit<I> for AggregateFrom<F, Z>
where
    I: IntoIterator,
    F: Fn(Z, I::Item) -> Z,
    Z: Clone,
{
    type Output = Z;

    fn apply(&self, input: I) -> Z {
        input
            .into_iter()
            .fold(self.initial.clone(), &self.function)
    }
}

// =============================================================================
// index / tail
// =============================================================================

/// Position lookup. See [`index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index<T> {
    value: T,
    start: usize,
    stop: Option<usize>,
}

/// Position of the first item equal to `value`.
///
/// The search can be narrowed to positions `start..stop` with
/// [`Index::start`] and [`Index::stop`]; the returned position still counts
/// from the beginning of the input. Fails with [`PipeError::NotFound`] when
/// no item in range matches.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let letters = vec!['a', 'b', 'a', 'c'];
/// assert_eq!(letters.clone().pipe(index('a'))?, 0);
/// assert_eq!(letters.clone().pipe(index('a').start(1))?, 2);
/// assert!(letters.pipe(index('a').start(1).stop(2)).is_err());
/// # Ok::<(), pipette::PipeError>(())
/// ```
pub const fn index<T>(value: T) -> Index<T> {
    Index {
        value,
        start: 0,
        stop: None,
    }
}

impl<T> Index<T> {
    /// First position searched.
    #[must_use]
    pub fn start(self, start: usize) -> Self {
        Self { start, ..self }
    }

    /// Position where the search stops, exclusive.
    ///
    /// A stop of `0` means "no stop": the search runs to the end of the
    /// input, like leaving the stop unset.
    #[must_use]
    pub fn stop(self, stop: usize) -> Self {
        Self {
            stop: Some(stop),
            ..self
        }
    }
}

impl<I, T> PipeUnit<I> for Index<T>
where
    I: IntoIterator,
    I::Item: PartialEq<T>,
{
    type Output = PipeResult<usize>;

    fn apply(&self, input: I) -> Self::Output {
        let window = self
            .stop
            .filter(|&stop| stop != 0)
            .map_or(usize::MAX, |stop| stop.saturating_sub(self.start));
        input
            .into_iter()
            .skip(self.start)
            .take(window)
            .position(|item| item == self.value)
            .map(|offset| self.start + offset)
            .ok_or(PipeError::NotFound { operation: "index" })
    }
}

/// Last items of the input. See [`tail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tail {
    count: usize,
}

/// Collects the last `count` items.
///
/// The whole input is consumed but never more than `count` items are held
/// at once: each new item pushes out the oldest.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// assert_eq!((1..=10).pipe(tail(3)), vec![8, 9, 10]);
/// assert_eq!(vec![1, 2].pipe(tail(5)), vec![1, 2]);
/// ```
pub const fn tail(count: usize) -> Tail {
    Tail { count }
}

impl<I: IntoIterator> PipeUnit<I> for Tail {
    type Output = Vec<I::Item>;

    fn apply(&self, input: I) -> Self::Output {
        let mut window = VecDeque::new();
        for item in input {
            window.push_back(item);
            if window.len() > self.count {
                window.pop_front();
            }
        }
        window.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Pipeable;
    use crate::value::Shape;
    use rstest::rstest;

    #[test]
    fn test_count_empty() {
        assert_eq!(Vec::<i32>::new().pipe(count()), 0);
    }

    #[test]
    fn test_length_of_scalar_value_fails() {
        let error = Value::Int(3).pipe(length()).unwrap_err();
        assert!(matches!(
            error,
            PipeError::Shape {
                found: Shape::Scalar,
                ..
            }
        ));
    }

    #[test]
    fn test_sum_of_floats() {
        let total: f64 = vec![0.5, 0.25].pipe(sum());
        assert!((total - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_of_references() {
        let numbers = [2_u8, 4, 9];
        assert_eq!(numbers.iter().pipe(average()).unwrap(), 5.0);
    }

    #[test]
    fn test_average_empty_is_division_by_zero() {
        let error = std::iter::empty::<f64>().pipe(average()).unwrap_err();
        assert!(matches!(error, PipeError::DivisionByZero { .. }));
        assert!(error.is_empty_input());
    }

    #[test]
    fn test_first_pulls_one_item() {
        let pulled = std::cell::Cell::new(0);
        let source = (0..).inspect(|_| pulled.set(pulled.get() + 1));
        assert_eq!(source.pipe(first()).unwrap(), 0);
        assert_eq!(pulled.get(), 1);
    }

    #[rstest]
    #[case(vec![], false, true)]
    #[case(vec![1, 3], false, false)]
    #[case(vec![2, 4], true, true)]
    #[case(vec![1, 2], true, false)]
    fn test_quantifiers(
        #[case] numbers: Vec<i32>,
        #[case] any_even: bool,
        #[case] all_even: bool,
    ) {
        let is_even = |value: i32| value % 2 == 0;
        assert_eq!(numbers.clone().pipe(any(is_even)), any_even);
        assert_eq!(numbers.pipe(all(is_even)), all_even);
    }

    #[test]
    fn test_max_ties_keep_first() {
        let pairs = vec![(1, 'a'), (3, 'b'), (3, 'c'), (0, 'd')];
        let best = pairs
            .clone()
            .pipe(max().by_key(|pair: &(i32, char)| pair.0))
            .unwrap();
        assert_eq!(best, (3, 'b'));
        let worst = pairs
            .pipe(min().by_key(|pair: &(i32, char)| pair.0 / 10))
            .unwrap();
        assert_eq!(worst, (1, 'a'));
    }

    #[test]
    fn test_max_min_empty() {
        assert!(Vec::<i32>::new().pipe(max()).unwrap_err().is_empty_input());
        assert!(Vec::<i32>::new().pipe(min()).unwrap_err().is_empty_input());
    }

    #[test]
    fn test_aggregate_single_item_skips_function() {
        let result = vec![5]
            .pipe(aggregate(|_: i32, _: i32| -> i32 { unreachable!() }))
            .unwrap();
        assert_eq!(result, 5);
    }

    #[test]
    fn test_aggregate_empty_without_initializer() {
        let result = Vec::<i32>::new().pipe(aggregate(|left: i32, right: i32| left + right));
        assert!(matches!(result, Err(PipeError::EmptySequence { .. })));
    }

    #[test]
    fn test_aggregate_empty_with_initializer() {
        let unit = aggregate(|left: i32, right: i32| left + right).initializer(42);
        assert_eq!(Vec::<i32>::new().pipe(&unit), 42);
        assert_eq!(vec![1, 2].pipe(&unit), 45);
    }

    #[test]
    fn test_index_not_found() {
        let error = vec![1, 2, 3].pipe(index(4)).unwrap_err();
        assert!(matches!(error, PipeError::NotFound { operation: "index" }));
    }

    #[test]
    fn test_index_compares_across_types() {
        let words = vec![String::from("a"), String::from("b")];
        assert_eq!(words.pipe(index("b")).unwrap(), 1);
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(1, vec![5])]
    #[case(4, vec![2, 3, 4, 5])]
    #[case(9, vec![1, 2, 3, 4, 5])]
    fn test_tail(#[case] count: usize, #[case] expected: Vec<i32>) {
        assert_eq!((1..=5).pipe(tail(count)), expected);
    }
}
