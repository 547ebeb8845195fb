//! The `pipe!` macro for left-to-right unit application.
//!
//! This module provides the [`pipe!`] macro which feeds a value through a
//! series of pipe units, following the data flow style of programming.

/// Pipes a value through a series of pipe units from left to right.
///
/// `pipe!(x, a, b, c)` is equivalent to `x.pipe(a).pipe(b).pipe(c)`.
///
/// Each intermediate result, lazy iterator or eager value, becomes the input
/// of the next unit. Nothing is reordered.
///
/// # Syntax
///
/// - `pipe!(x)` - Returns `x` unchanged
/// - `pipe!(x, a)` - Returns `a` applied to `x`
/// - `pipe!(x, a, b, ...)` - Applies `a`, then `b`, and so on
///
/// # Examples
///
/// ## Euler problem 2
///
/// ```
/// use pipette::pipe;
/// use pipette::prelude::*;
///
/// let fibonacci = std::iter::successors(Some((1_u64, 2_u64)), |&(a, b)| Some((b, a + b)))
///     .map(|(a, _)| a);
///
/// let total = pipe!(
///     fibonacci,
///     where_(|value: &u64| value % 2 == 0),
///     take_while(|value: &u64| *value < 4_000_000),
///     sum(),
/// );
/// assert_eq!(total, 4_613_732);
/// ```
///
/// ## Mixing lazy and eager units
///
/// ```
/// use pipette::pipe;
/// use pipette::prelude::*;
///
/// let text = pipe!(vec![1, 2, 3], select(|value: i32| value * value), concat());
/// assert_eq!(text, "1, 4, 9");
/// ```
#[macro_export]
macro_rules! pipe {
    // Value only: return as is
    ($value:expr $(,)?) => {
        $value
    };

    // Single unit: apply it
    ($value:expr, $unit:expr $(,)?) => {
        $crate::unit::apply($value, $unit)
    };

    // Multiple units: apply left to right recursively
    ($value:expr, $unit:expr, $($remaining_units:expr),+ $(,)?) => {
        $crate::pipe!($crate::unit::apply($value, $unit), $($remaining_units),+)
    };
}
