//! Converters: materialize, stringify and reshape whole inputs.

use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Range, RangeInclusive};

use indexmap::IndexMap;

use crate::error::{PipeError, PipeResult};
use crate::unit::{PipeUnit, nullary_unit};
use crate::value::{Arguments, Shape, Value};

// =============================================================================
// as_list / as_tuple / as_dict
// =============================================================================

nullary_unit! {
    /// Collects the input into a `Vec`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// assert_eq!((1..4).pipe(as_list()), vec![1, 2, 3]);
    /// ```
    #[doc(alias = "to_list")]
    AsList
}

impl<I: IntoIterator> PipeUnit<I> for AsList {
    type Output = Vec<I::Item>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().collect()
    }
}

nullary_unit! {
    /// Collects the input into a fixed-size boxed slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// let frozen = "ab".chars().pipe(as_tuple());
    /// assert_eq!(&*frozen, &['a', 'b']);
    /// ```
    #[doc(alias = "to_tuple")]
    AsTuple
}

impl<I: IntoIterator> PipeUnit<I> for AsTuple {
    type Output = Box<[I::Item]>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().collect()
    }
}

nullary_unit! {
    /// Collects key-value pairs into an insertion-ordered map.
    ///
    /// A repeated key keeps its first position and its last value. Applied to
    /// a [`Value`], every item must be a two-item sequence with a text key;
    /// anything else fails with [`PipeError::Shape`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    /// use pipette::value;
    ///
    /// let map = vec![("a", 1), ("b", 2), ("a", 3)].pipe(as_dict());
    /// assert_eq!(map.into_iter().collect::<Vec<_>>(), vec![("a", 3), ("b", 2)]);
    ///
    /// let mapping = value![["x", 1], ["y", [2]]].pipe(as_dict())?;
    /// assert_eq!(mapping.to_string(), "{'x': 1, 'y': [2]}");
    /// # Ok::<(), pipette::PipeError>(())
    /// ```
    #[doc(alias = "to_dict")]
    AsDict
}

impl<I, K, V> PipeUnit<I> for AsDict
where
    I: IntoIterator<Item = (K, V)>,
    K: Hash + Eq,
{
    type Output = IndexMap<K, V>;

    fn apply(&self, input: I) -> Self::Output {
        input.into_iter().collect()
    }
}

impl PipeUnit<Value> for AsDict {
    type Output = PipeResult<Value>;

    fn apply(&self, input: Value) -> Self::Output {
        let items = match input {
            Value::Sequence(items) => items,
            other => {
                return Err(PipeError::shape(
                    "as_dict",
                    "a sequence of pairs",
                    other.shape(),
                ));
            }
        };
        items
            .into_iter()
            .map(|item| match item {
                Value::Sequence(pair) => match <[Value; 2]>::try_from(pair) {
                    Ok([Value::Text(key), value]) => Ok((key, value)),
                    Ok([key, _]) => Err(PipeError::shape("as_dict", "a text key", key.shape())),
                    Err(_) => Err(PipeError::shape(
                        "as_dict",
                        "a key-value pair",
                        Shape::Sequence,
                    )),
                },
                other => Err(PipeError::shape("as_dict", "a key-value pair", other.shape())),
            })
            .collect::<PipeResult<IndexMap<_, _>>>()
            .map(Value::Mapping)
    }
}

// =============================================================================
// concat / to_text / stringify
// =============================================================================

/// Joins stringified items. See [`concat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concat {
    separator: String,
}

/// Stringifies every item with `Display` and joins them with `", "`, or
/// with the separator given to [`Concat::separator`].
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// assert_eq!((1..=4).pipe(concat()), "1, 2, 3, 4");
/// assert_eq!((1..=4).pipe(concat().separator("#")), "1#2#3#4");
/// assert_eq!(Vec::<i32>::new().pipe(concat()), "");
/// ```
#[doc(alias = "join")]
pub fn concat() -> Concat {
    Concat {
        separator: String::from(", "),
    }
}

impl Concat {
    /// Replaces the separator.
    #[must_use]
    pub fn separator(self, separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl<I> PipeUnit<I> for Concat
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    type Output = String;

    fn apply(&self, input: I) -> String {
        let mut joined = String::new();
        for (position, item) in input.into_iter().enumerate() {
            if position > 0 {
                joined.push_str(&self.separator);
            }
            joined.push_str(&item.to_string());
        }
        joined
    }
}

nullary_unit! {
    /// Stringifies the whole input with `Display`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    /// use pipette::value;
    ///
    /// assert_eq!(3.5_f64.pipe(to_text()), "3.5");
    /// assert_eq!(value![1, "a"].pipe(to_text()), "[1, 'a']");
    /// ```
    #[doc(alias = "str")]
    ToText
}

impl<T: fmt::Display> PipeUnit<T> for ToText {
    type Output = String;

    fn apply(&self, input: T) -> String {
        input.to_string()
    }
}

nullary_unit! {
    /// Stringifies a [`Value`] one level deep.
    ///
    /// A sequence becomes a sequence of texts, one per item; anything else
    /// becomes a single text.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    /// use pipette::value;
    ///
    /// assert_eq!(value![1, [2]].pipe(stringify()), value!["1", "[2]"]);
    /// assert_eq!(value!(true).pipe(stringify()), value!("True"));
    /// ```
    Stringify
}

impl PipeUnit<Value> for Stringify {
    type Output = Value;

    fn apply(&self, input: Value) -> Value {
        match input {
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| Value::Text(item.to_string()))
                .collect(),
            Value::Text(text) => Value::Text(text),
            other => Value::Text(other.to_string()),
        }
    }
}

// =============================================================================
// map
// =============================================================================

/// A collection that can be rebuilt around items of another type.
///
/// Ranges and arrays rebuild into a `Vec`; every other implementor rebuilds
/// into the same kind of collection.
pub trait Rebuild<Item> {
    /// The collection holding the new items.
    type Output: FromIterator<Item>;
}

impl<T, B> Rebuild<B> for Vec<T> {
    type Output = Vec<B>;
}

impl<T, B> Rebuild<B> for Box<[T]> {
    type Output = Box<[B]>;
}

impl<T, B, const N: usize> Rebuild<B> for [T; N] {
    type Output = Vec<B>;
}

impl<T, B> Rebuild<B> for Range<T> {
    type Output = Vec<B>;
}

impl<T, B> Rebuild<B> for RangeInclusive<T> {
    type Output = Vec<B>;
}

impl<T, B> Rebuild<B> for VecDeque<T> {
    type Output = VecDeque<B>;
}

impl<T, B> Rebuild<B> for LinkedList<T> {
    type Output = LinkedList<B>;
}

impl<T, B: Ord> Rebuild<B> for BinaryHeap<T> {
    type Output = BinaryHeap<B>;
}

impl<T, B: Ord> Rebuild<B> for BTreeSet<T> {
    type Output = BTreeSet<B>;
}

impl<T, S, B: Eq + Hash> Rebuild<B> for HashSet<T, S> {
    type Output = HashSet<B>;
}

impl<K, V, L: Ord, W> Rebuild<(L, W)> for BTreeMap<K, V> {
    type Output = BTreeMap<L, W>;
}

impl<K, V, S, L: Eq + Hash, W> Rebuild<(L, W)> for HashMap<K, V, S> {
    type Output = HashMap<L, W>;
}

impl<K, V, S, L: Eq + Hash, W> Rebuild<(L, W)> for IndexMap<K, V, S> {
    type Output = IndexMap<L, W>;
}

/// Applies a function to every item, keeping the container. See [`map`].
#[derive(Debug, Clone, Copy)]
pub struct Map<F> {
    function: F,
}

/// Applies `function` to every item and collects the results into the same
/// kind of container the input came in.
///
/// Unlike [`select`](crate::combinator::select), `map` is eager. Ranges and
/// arrays come back as a `Vec`. Over a [`Value`] sequence it returns a new
/// sequence; any other shape fails with [`PipeError::Shape`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use pipette::prelude::*;
///
/// let doubled = vec![1, 2, 3].pipe(map(|value: i32| value * 2));
/// assert_eq!(doubled, vec![2, 4, 6]);
///
/// let lengths = BTreeSet::from(["a", "bb", "cc"]).pipe(map(str::len));
/// assert_eq!(lengths, BTreeSet::from([1, 2]));
///
/// assert_eq!((1..=3).pipe(map(|value: i32| value * value)), vec![1, 4, 9]);
/// ```
#[doc(alias = "pmap")]
pub const fn map<T, U, F>(function: F) -> Map<F>
where
    F: Fn(T) -> U,
{
    Map { function }
}

impl<C, F, B> PipeUnit<C> for Map<F>
where
    C: IntoIterator + Rebuild<B>,
    F: Fn(C::Item) -> B,
{
    type Output = <C as Rebuild<B>>::Output;

    fn apply(&self, input: C) -> Self::Output {
        input.into_iter().map(&self.function).collect()
    }
}

impl<F> PipeUnit<Value> for Map<F>
where
    F: Fn(Value) -> Value,
{
    type Output = PipeResult<Value>;

    fn apply(&self, input: Value) -> Self::Output {
        match input {
            Value::Sequence(items) => Ok(items.into_iter().map(&self.function).collect()),
            other => Err(PipeError::shape("map", "a sequence", other.shape())),
        }
    }
}

// =============================================================================
// to_type
// =============================================================================

/// Whole-input conversion. See [`to_type`].
pub struct ToType<T> {
    target: PhantomData<fn() -> T>,
}

/// Converts the whole input, not each item, into `T` with [`TryFrom`].
///
/// Failures surface as [`PipeError::Conversion`] carrying the underlying
/// error's message.
///
/// # Examples
///
/// ```
/// use std::collections::BinaryHeap;
/// use pipette::prelude::*;
/// use pipette::value;
///
/// let heap = vec![3, 1, 2].pipe(to_type::<BinaryHeap<i32>>())?;
/// assert_eq!(heap.peek(), Some(&3));
///
/// assert_eq!(value!(7).pipe(to_type::<i64>())?, 7);
/// assert!(value!("seven").pipe(to_type::<i64>()).is_err());
/// # Ok::<(), pipette::PipeError>(())
/// ```
#[doc(alias = "as_type")]
pub const fn to_type<T>() -> ToType<T> {
    ToType {
        target: PhantomData,
    }
}

impl<T> Clone for ToType<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ToType<T> {}

impl<T> Default for ToType<T> {
    fn default() -> Self {
        to_type()
    }
}

impl<T> fmt::Debug for ToType<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("ToType")
            .field(&std::any::type_name::<T>())
            .finish()
    }
}

impl<I, T> PipeUnit<I> for ToType<T>
where
    T: TryFrom<I>,
    T::Error: fmt::Display,
{
    type Output = PipeResult<T>;

    fn apply(&self, input: I) -> Self::Output {
        T::try_from(input).map_err(|error| PipeError::Conversion(error.to_string()))
    }
}

// =============================================================================
// run_with / t
// =============================================================================

/// Calls a function with a value spread as arguments. See [`run_with`].
#[derive(Debug, Clone, Copy)]
pub struct RunWith<F> {
    function: F,
}

/// Calls `function` with the input spread into [`Arguments`].
///
/// A mapping becomes keyword arguments, a sequence becomes positional
/// arguments, and any other value is passed as the only positional
/// argument.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
/// use pipette::value;
/// use pipette::value::Arguments;
///
/// let span = |arguments: Arguments| arguments.positional().len();
/// assert_eq!(value![1, 10, 2].pipe(run_with(span)), 3);
/// assert_eq!(value!("word").pipe(run_with(span)), 1);
/// ```
pub const fn run_with<R, F>(function: F) -> RunWith<F>
where
    F: Fn(Arguments) -> R,
{
    RunWith { function }
}

impl<R, F> PipeUnit<Value> for RunWith<F>
where
    F: Fn(Arguments) -> R,
{
    type Output = R;

    fn apply(&self, input: Value) -> R {
        (self.function)(Arguments::spread(input))
    }
}

/// Appends one item. See [`t`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cons<Y> {
    item: Y,
}

/// Appends `item` to a sequence input, or pairs a non-sequence input with
/// it as `[input, item]`.
///
/// Text, bytes and mappings are not sequences here and get paired.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
/// use pipette::value;
///
/// assert_eq!(vec![1, 2].pipe(t(3)), vec![1, 2, 3]);
/// assert_eq!(value![1, 2].pipe(t(3)), value![1, 2, 3]);
/// assert_eq!(value!("ab").pipe(t("c")), value!["ab", "c"]);
/// ```
#[doc(alias = "cons")]
#[doc(alias = "append")]
pub const fn t<Y>(item: Y) -> Cons<Y> {
    Cons { item }
}

impl<Y: Clone> PipeUnit<Vec<Y>> for Cons<Y> {
    type Output = Vec<Y>;

    fn apply(&self, mut input: Vec<Y>) -> Vec<Y> {
        input.push(self.item.clone());
        input
    }
}

impl<Y> PipeUnit<Value> for Cons<Y>
where
    Y: Into<Value> + Clone,
{
    type Output = Value;

    fn apply(&self, input: Value) -> Value {
        let item = self.item.clone().into();
        match input {
            Value::Sequence(mut items) => {
                items.push(item);
                Value::Sequence(items)
            }
            other => Value::Sequence(vec![other, item]),
        }
    }
}

// =============================================================================
// strip / lstrip / rstrip / passed
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Both,
    Start,
    End,
}

/// Trims text. See [`strip`], [`lstrip`] and [`rstrip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    chars: Option<String>,
    side: Side,
}

/// Removes leading and trailing whitespace, or the characters given to
/// [`Strip::chars`].
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// assert_eq!("  abc   ".pipe(strip()), "abc");
/// assert_eq!(".,[abc] ] ".pipe(strip().chars(".,[] ")), "abc");
/// ```
pub const fn strip() -> Strip {
    Strip {
        chars: None,
        side: Side::Both,
    }
}

/// Removes leading whitespace, or the characters given to [`Strip::chars`].
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// assert_eq!(".,[abc] ] ".pipe(lstrip().chars(".,[] ")), "abc] ] ");
/// ```
pub const fn lstrip() -> Strip {
    Strip {
        chars: None,
        side: Side::Start,
    }
}

/// Removes trailing whitespace, or the characters given to [`Strip::chars`].
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// assert_eq!(".,[abc] ] ".pipe(rstrip().chars(".,[] ")), ".,[abc");
/// ```
pub const fn rstrip() -> Strip {
    Strip {
        chars: None,
        side: Side::End,
    }
}

impl Strip {
    /// Strips any of `chars` instead of whitespace.
    #[must_use]
    pub fn chars(self, chars: impl Into<String>) -> Self {
        Self {
            chars: Some(chars.into()),
            ..self
        }
    }
}

impl<T: AsRef<str>> PipeUnit<T> for Strip {
    type Output = String;

    fn apply(&self, input: T) -> String {
        let text = input.as_ref();
        let stripped = match &self.chars {
            None => match self.side {
                Side::Both => text.trim(),
                Side::Start => text.trim_start(),
                Side::End => text.trim_end(),
            },
            Some(set) => {
                let in_set = |character: char| set.contains(character);
                match self.side {
                    Side::Both => text.trim_matches(in_set),
                    Side::Start => text.trim_start_matches(in_set),
                    Side::End => text.trim_end_matches(in_set),
                }
            }
        };
        stripped.to_owned()
    }
}

nullary_unit! {
    /// Discards its input.
    ///
    /// Useful at the end of a pipeline run only for its side effects.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipette::prelude::*;
    ///
    /// let () = "something".pipe(passed());
    /// ```
    Passed
}

impl<T> PipeUnit<T> for Passed {
    type Output = ();

    fn apply(&self, _input: T) -> Self::Output {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Pipeable;
    use crate::value;
    use rstest::rstest;

    #[test]
    fn test_map_boxed_slice_stays_boxed() {
        let boxed: Box<[i32]> = vec![1, 2].into_boxed_slice();
        let negated: Box<[i32]> = boxed.pipe(map(|value: i32| -value));
        assert_eq!(&*negated, &[-1, -2]);
    }

    #[test]
    fn test_map_array_becomes_vec() {
        assert_eq!([1, 2, 3].pipe(map(|value: i32| value > 1)), vec![false, true, true]);
    }

    #[test]
    fn test_map_unit_is_reusable() {
        let increment = map(|value: i32| value + 1);
        assert_eq!(vec![1].pipe(&increment), vec![2]);
        assert_eq!((0..2).pipe(&increment), vec![1, 2]);
    }

    #[test]
    fn test_as_dict_value_requires_sequence() {
        let error = value!(3).pipe(as_dict()).unwrap_err();
        assert!(matches!(
            error,
            PipeError::Shape {
                operation: "as_dict",
                found: Shape::Scalar,
                ..
            }
        ));
    }

    #[rstest]
    #[case(value![[1, 2]], Shape::Scalar)]
    #[case(value![[["a", 1, 2]]], Shape::Sequence)]
    #[case(value!["ab"], Shape::Text)]
    fn test_as_dict_value_rejects_non_pairs(#[case] input: Value, #[case] found: Shape) {
        match input.pipe(as_dict()) {
            Err(PipeError::Shape { found: actual, .. }) => assert_eq!(actual, found),
            other => panic!("expected a shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_as_dict_value_last_value_wins() {
        let mapping = value![["k", 1], ["k", 2]].pipe(as_dict()).unwrap();
        assert_eq!(mapping.to_string(), "{'k': 2}");
    }

    #[test]
    fn test_concat_single_item_has_no_separator() {
        assert_eq!(vec!["only"].pipe(concat().separator("--")), "only");
    }

    #[test]
    fn test_to_type_infallible_conversion() {
        let deque = vec![1, 2].pipe(to_type::<std::collections::VecDeque<i32>>());
        assert_eq!(deque.unwrap().len(), 2);
    }

    #[test]
    fn test_to_type_failure_is_conversion_error() {
        let error = value![1].pipe(to_type::<bool>()).unwrap_err();
        assert!(matches!(error, PipeError::Conversion(_)));
    }

    #[test]
    fn test_run_with_mapping_spreads_keywords() {
        let mapping = value![[["name", "pipe"]]].pipe(as_dict()).unwrap();
        let name = mapping.pipe(run_with(|arguments: Arguments| {
            arguments.named("name").map(ToString::to_string)
        }));
        assert_eq!(name.as_deref(), Some("pipe"));
    }

    #[test]
    fn test_cons_pairs_mapping() {
        let mapping = value![[["k", 1]]].pipe(as_dict()).unwrap();
        let paired = mapping.clone().pipe(t(2));
        assert_eq!(paired, Value::Sequence(vec![mapping, Value::Int(2)]));
    }

    #[test]
    fn test_cons_is_reusable() {
        let append_zero = t(0);
        assert_eq!(vec![1].pipe(&append_zero), vec![1, 0]);
        assert_eq!(Vec::new().pipe(&append_zero), vec![0]);
    }

    #[rstest]
    #[case(strip(), "  abc   ", "abc")]
    #[case(lstrip(), "  abc   ", "abc   ")]
    #[case(rstrip(), "  abc   ", "  abc")]
    #[case(strip().chars("x"), "xxaxbxx", "axb")]
    #[case(strip().chars(""), "  abc ", "  abc ")]
    fn test_strip(#[case] unit: Strip, #[case] input: &str, #[case] expected: &str) {
        assert_eq!(input.pipe(&unit), expected);
        assert_eq!(String::from(input).pipe(&unit), expected);
    }
}
