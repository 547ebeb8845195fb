//! Dynamically shaped values.
//!
//! Most units in this crate are generic over the items they process, and the
//! compiler checks that a pipeline fits together. A handful of units need to
//! inspect the *shape* of what flows through them instead: [`traverse`]
//! flattens nested sequences of any depth, [`run_with`] spreads a sequence
//! into positional arguments, [`t`] appends to a container or pairs up a
//! scalar. Those units work on [`Value`].
//!
//! The shape of a value is decided once, by [`Value::shape`], and every
//! shape-sensitive unit dispatches on the resulting [`Shape`].
//!
//! [`traverse`]: crate::combinator::traverse
//! [`run_with`]: crate::combinator::run_with
//! [`t`]: crate::combinator::t
//!
//! # Examples
//!
//! ```rust
//! use pipette::value;
//! use pipette::value::{Shape, Value};
//!
//! let nested = value![[1, 2], "text", [[3.5]]];
//! assert_eq!(nested.shape(), Shape::Sequence);
//! assert_eq!(nested.to_string(), "[[1, 2], 'text', [[3.5]]]");
//! ```

mod arguments;

pub use arguments::Arguments;

use std::cmp::Ordering;
use std::fmt::{self, Write as _};

use indexmap::IndexMap;

use crate::error::PipeError;

/// The capability class of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `Null`, booleans and numbers.
    Scalar,
    /// Text and byte strings. Never decomposed into characters.
    Text,
    /// An ordered sequence of values.
    Sequence,
    /// Named entries.
    Mapping,
}

impl fmt::Display for Shape {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scalar => "scalar",
            Self::Text => "text",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        };
        formatter.write_str(name)
    }
}

/// A dynamically shaped item.
///
/// `Value` has a total order so that it can be sorted, grouped and used with
/// `max`/`min`. Integers and floats compare numerically with each other;
/// otherwise values of different variants are ordered by variant.
///
/// Its `Display` output mirrors the conventional textual rendering of a
/// script value: text prints bare at the top level and quoted inside
/// containers.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// The absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// UTF-8 text.
    Text(String),
    /// An ordered sequence of values.
    Sequence(Vec<Self>),
    /// Named entries in insertion order.
    Mapping(IndexMap<String, Self>),
    /// Raw bytes, for example a chunk read from a socket.
    Bytes(Vec<u8>),
}

impl Value {
    /// Classifies the value.
    pub const fn shape(&self) -> Shape {
        match self {
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) => Shape::Scalar,
            Self::Text(_) | Self::Bytes(_) => Shape::Text,
            Self::Sequence(_) => Shape::Sequence,
            Self::Mapping(_) => Shape::Mapping,
        }
    }

    /// Returns `true` for sequences and mappings.
    pub const fn is_container(&self) -> bool {
        matches!(self.shape(), Shape::Sequence | Shape::Mapping)
    }

    /// Returns the text if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the items if this is a `Sequence` value.
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the numeric content as a float.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(number) => Some(*number as f64),
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Renders the value as raw bytes for transmission.
    ///
    /// Text is encoded as UTF-8, bytes are passed through, everything else is
    /// rendered with `Display`.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.as_bytes().to_vec(),
            Self::Bytes(bytes) => bytes.clone(),
            other => other.to_string().into_bytes(),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
            Self::Bytes(_) => 4,
            Self::Sequence(_) => 5,
            Self::Mapping(_) => 6,
        }
    }

    fn write_repr(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write_quoted(formatter, text),
            other => write!(formatter, "{other}"),
        }
    }
}

/// Quotes text the way a script prints strings inside containers: single
/// quotes, unless the text holds a single quote and no double quote.
fn write_quoted(formatter: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };
    formatter.write_char(quote)?;
    for character in text.chars() {
        match character {
            '\\' => formatter.write_str("\\\\")?,
            '\n' => formatter.write_str("\\n")?,
            '\r' => formatter.write_str("\\r")?,
            '\t' => formatter.write_str("\\t")?,
            other if other == quote => {
                formatter.write_char('\\')?;
                formatter.write_char(other)?;
            }
            other => formatter.write_char(other)?,
        }
    }
    formatter.write_char(quote)
}

/// Shortest round-trip rendering with a signed, two-digit exponent
/// (`1e+20`, `1e-05`) and a trailing `.0` on whole numbers.
fn write_float(formatter: &mut fmt::Formatter<'_>, number: f64) -> fmt::Result {
    if number.is_nan() {
        return formatter.write_str("nan");
    }
    if number.is_infinite() {
        return formatter.write_str(if number > 0.0 { "inf" } else { "-inf" });
    }
    let rendered = format!("{number:?}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent
                .strip_prefix('-')
                .map_or(('+', exponent), |digits| ('-', digits));
            write!(formatter, "{mantissa}e{sign}{digits:0>2}")
        }
        None => formatter.write_str(&rendered),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("None"),
            Self::Bool(true) => formatter.write_str("True"),
            Self::Bool(false) => formatter.write_str("False"),
            Self::Int(number) => write!(formatter, "{number}"),
            Self::Float(number) => write_float(formatter, *number),
            Self::Text(text) => formatter.write_str(text),
            Self::Bytes(bytes) => write!(formatter, "b'{}'", bytes.escape_ascii()),
            Self::Sequence(items) => {
                formatter.write_str("[")?;
                for (position, item) in items.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    item.write_repr(formatter)?;
                }
                formatter.write_str("]")
            }
            Self::Mapping(entries) => {
                formatter.write_str("{")?;
                for (position, (key, item)) in entries.iter().enumerate() {
                    if position > 0 {
                        formatter.write_str(", ")?;
                    }
                    write_quoted(formatter, key)?;
                    formatter.write_str(": ")?;
                    item.write_repr(formatter)?;
                }
                formatter.write_str("}")
            }
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Int(left), Self::Int(right)) => left.cmp(right),
            (Self::Float(left), Self::Float(right)) => compare_floats(*left, *right),
            (Self::Int(left), Self::Float(right)) => compare_int_to_float(*left, *right),
            (Self::Float(left), Self::Int(right)) => compare_int_to_float(*right, *left).reverse(),
            (Self::Text(left), Self::Text(right)) => left.cmp(right),
            (Self::Bytes(left), Self::Bytes(right)) => left.cmp(right),
            (Self::Sequence(left), Self::Sequence(right)) => left.cmp(right),
            (Self::Mapping(left), Self::Mapping(right)) => left.iter().cmp(right.iter()),
            (left, right) => left.rank().cmp(&right.rank()),
        }
    }
}

/// Numeric order on floats: `-0.0` equals `0.0`, NaN sits above every
/// number (below, when its sign bit is set).
fn compare_floats(left: f64, right: f64) -> Ordering {
    match (left.is_nan(), right.is_nan()) {
        (false, false) => left.partial_cmp(&right).unwrap_or(Ordering::Equal),
        (true, true) => left.total_cmp(&right),
        (true, false) => nan_position(left),
        (false, true) => nan_position(right).reverse(),
    }
}

const fn nan_position(nan: f64) -> Ordering {
    if nan.is_sign_negative() {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Exact comparison of an integer with a float. The integer is never cast
/// to `f64`; the float's integral part is compared as an `i64` and its
/// fraction breaks ties.
fn compare_int_to_float(integer: i64, float: f64) -> Ordering {
    // 2^63, exactly representable.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return nan_position(float).reverse();
    }
    let whole = float.trunc();
    if whole >= BOUND {
        return Ordering::Less;
    }
    if whole < -BOUND {
        return Ordering::Greater;
    }
    #[allow(clippy::cast_possible_truncation)]
    let truncated = whole as i64;
    integer.cmp(&truncated).then_with(|| {
        let fraction = float - whole;
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

// =============================================================================
// Conversions into Value
// =============================================================================

macro_rules! impl_from_integer {
    ($($integer:ty),* $(,)?) => {
        $(
            impl From<$integer> for Value {
                fn from(number: $integer) -> Self {
                    Self::Int(i64::from(number))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

// Wider integers stay exact while they fit in `i64` and fall back to the
// nearest float otherwise.
macro_rules! impl_from_wide_integer {
    ($($integer:ty),* $(,)?) => {
        $(
            impl From<$integer> for Value {
                #[allow(clippy::cast_precision_loss)]
                fn from(number: $integer) -> Self {
                    i64::try_from(number).map_or(Self::Float(number as f64), Self::Int)
                }
            }
        )*
    };
}

impl_from_wide_integer!(u64, usize, isize, i128, u128);

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Float(number)
    }
}

impl From<f32> for Value {
    fn from(number: f32) -> Self {
        Self::Float(f64::from(number))
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<char> for Value {
    fn from(character: char) -> Self {
        Self::Text(character.to_string())
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl From<IndexMap<String, Self>> for Value {
    fn from(entries: IndexMap<String, Self>) -> Self {
        Self::Mapping(entries)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iterable: I) -> Self {
        Self::Sequence(iterable.into_iter().collect())
    }
}

// =============================================================================
// Conversions out of Value
// =============================================================================

impl TryFrom<Value> for i64 {
    type Error = PipeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(number) => Ok(number),
            Value::Bool(flag) => Ok(Self::from(flag)),
            other => Err(PipeError::shape("to_type", "an integer", other.shape())),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = PipeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value
            .as_f64()
            .ok_or_else(|| PipeError::shape("to_type", "a number", value.shape()))
    }
}

impl TryFrom<Value> for bool {
    type Error = PipeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(flag) => Ok(flag),
            other => Err(PipeError::shape("to_type", "a boolean", other.shape())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = PipeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(text) => Ok(text),
            other => Err(PipeError::shape("to_type", "text", other.shape())),
        }
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = PipeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Sequence(items) => Ok(items),
            other => Err(PipeError::shape("to_type", "a sequence", other.shape())),
        }
    }
}

/// Builds a [`Value`] from a nested literal.
///
/// Bracketed groups and comma separated lists become sequences, a single
/// element goes through `Value::from` (so `value![1]` is the integer and
/// `value![[1]]` the one-item sequence). Negative numbers need parentheses:
/// `value![(-1), 2]`.
///
/// The outer brackets of the invocation are not a sequence of their own:
/// `value![["k", 1]]` is the two-item sequence `['k', 1]`, and a sequence
/// holding that single pair is written `value![[["k", 1]]]`. With two or
/// more top-level elements no extra nesting is needed.
///
/// # Examples
///
/// ```rust
/// use pipette::value;
/// use pipette::value::Value;
///
/// let nested = value![[1, 2], [[[3], [[4]]], [5]]];
/// assert_eq!(nested.to_string(), "[[1, 2], [[[3], [[4]]], [5]]]");
/// assert_eq!(value!("text"), Value::Text("text".to_owned()));
/// assert_eq!(value![["k", 1]].to_string(), "['k', 1]");
/// assert_eq!(value![[["k", 1]]].to_string(), "[['k', 1]]");
/// ```
#[macro_export]
macro_rules! value {
    ([ $($element:tt),* $(,)? ]) => {
        $crate::value::Value::Sequence(::std::vec![ $( $crate::value!($element) ),* ])
    };
    ($single:expr) => {
        $crate::value::Value::from($single)
    };
    ($($element:tt),+ $(,)?) => {
        $crate::value::Value::Sequence(::std::vec![ $( $crate::value!($element) ),+ ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::Null, Shape::Scalar)]
    #[case(Value::Int(1), Shape::Scalar)]
    #[case(Value::Text("a".into()), Shape::Text)]
    #[case(Value::Bytes(vec![1]), Shape::Text)]
    #[case(Value::Sequence(vec![]), Shape::Sequence)]
    #[case(Value::Mapping(IndexMap::new()), Shape::Mapping)]
    fn test_shape(#[case] value: Value, #[case] expected: Shape) {
        assert_eq!(value.shape(), expected);
    }

    #[rstest]
    #[case(Value::Null, "None")]
    #[case(Value::Bool(true), "True")]
    #[case(Value::Float(3.5), "3.5")]
    #[case(Value::Float(10.0), "10.0")]
    #[case(Value::Text("it's".into()), "it's")]
    #[case(value![1, "a"], "[1, 'a']")]
    fn test_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    #[case(Value::Float(1e20), "1e+20")]
    #[case(Value::Float(1.5e-7), "1.5e-07")]
    #[case(Value::Float(1e16), "1e+16")]
    #[case(Value::Float(1e15), "1000000000000000.0")]
    #[case(Value::Float(0.0001), "0.0001")]
    #[case(Value::Float(-2.5e100), "-2.5e+100")]
    #[case(Value::Float(f64::INFINITY), "inf")]
    #[case(Value::Float(f64::NAN), "nan")]
    fn test_float_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    #[case("plain", "['plain']")]
    #[case("it's", "[\"it's\"]")]
    #[case("say \"hi\"", "['say \"hi\"']")]
    #[case("both ' and \"", "['both \\' and \"']")]
    #[case("tab\there", "['tab\\there']")]
    #[case("back\\slash", "['back\\\\slash']")]
    fn test_text_quoted_inside_containers(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(value![[text]].to_string(), expected);
    }

    #[test]
    fn test_mapping_display() {
        let mut entries = IndexMap::new();
        entries.insert("a".to_owned(), Value::Int(1));
        entries.insert("b".to_owned(), Value::from("x"));
        assert_eq!(Value::Mapping(entries).to_string(), "{'a': 1, 'b': 'x'}");
    }

    #[test]
    fn test_numeric_cross_comparison() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert!(Value::Int(1) < Value::Float(1.5));
        assert!(Value::Float(2.5) > Value::Int(2));
    }

    #[test]
    fn test_large_integers_compare_exactly_against_floats() {
        let exact = 1_i64 << 53;
        let float = Value::Float(9_007_199_254_740_992.0);
        assert_eq!(Value::Int(exact), float);
        assert!(float < Value::Int(exact + 1));
        assert!(Value::Int(exact - 1) < float);
        assert!(Value::Int(i64::MAX) < Value::Float(9_223_372_036_854_775_808.0));
        assert!(Value::Int(i64::MIN) == Value::Float(-9_223_372_036_854_775_808.0));
    }

    #[rstest]
    #[case(Value::Int(2), Value::Float(2.5))]
    #[case(Value::Float(-2.5), Value::Int(-2))]
    #[case(Value::Int(i64::MAX), Value::Float(f64::INFINITY))]
    #[case(Value::Float(f64::NEG_INFINITY), Value::Int(i64::MIN))]
    #[case(Value::Int(i64::MAX), Value::Float(f64::NAN))]
    #[case(Value::Float(1e300), Value::Float(f64::NAN))]
    fn test_numeric_order(#[case] smaller: Value, #[case] larger: Value) {
        assert!(smaller < larger);
        assert!(larger > smaller);
    }

    #[test]
    fn test_signed_zero_is_one_value() {
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));
        assert_eq!(Value::Float(-0.0), Value::Int(0));
    }

    #[test]
    fn test_variant_rank_orders_mixed_values() {
        assert!(Value::Null < Value::Int(0));
        assert!(Value::Int(100) < Value::from("a"));
        assert!(Value::from("z") < value![[1]]);
    }

    #[test]
    fn test_try_from_failures_report_shape() {
        let error = i64::try_from(Value::from("x")).unwrap_err();
        assert!(matches!(
            error,
            PipeError::Shape {
                found: Shape::Text,
                ..
            }
        ));
    }

    #[test]
    fn test_from_iterator_builds_sequence() {
        let value: Value = (1..=3).map(Value::from).collect();
        assert_eq!(value, value![1, 2, 3]);
    }

    #[rstest]
    #[case(Value::from(7_u64), Value::Int(7))]
    #[case(Value::from(7_usize), Value::Int(7))]
    #[case(Value::from(-7_isize), Value::Int(-7))]
    #[case(Value::from(-7_i128), Value::Int(-7))]
    #[case(Value::from(u64::MAX), Value::Float(18_446_744_073_709_551_615.0))]
    fn test_wide_integer_conversion(#[case] converted: Value, #[case] expected: Value) {
        assert_eq!(converted, expected);
    }

    #[test]
    fn test_out_of_range_integer_becomes_float() {
        assert!(matches!(Value::from(u64::MAX), Value::Float(_)));
        assert!(matches!(Value::from(i128::MIN), Value::Float(_)));
        assert!(matches!(Value::from(u128::from(u64::MAX) >> 1), Value::Int(i64::MAX)));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(4)), Value::Int(4));
    }
}
