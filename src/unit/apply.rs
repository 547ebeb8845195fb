//! Left-to-right application of pipe units.

use super::pipe::PipeUnit;

/// Applies `unit` to `input`.
///
/// `apply(input, unit)` evaluates the input first and then hands it to the
/// unit's transformation. Nothing else happens in between: no type checks,
/// no forced iteration of lazy results.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let total = apply(apply(vec![1, 2, 3], select(|value: i32| value * 10)), sum());
/// assert_eq!(total, 60);
/// ```
#[inline]
pub fn apply<Input, U>(input: Input, unit: U) -> U::Output
where
    U: PipeUnit<Input>,
{
    unit.apply(input)
}

/// Method-call syntax for applying pipe units.
///
/// Implemented for every sized type, so any value can start a pipeline.
/// Chains read in data-flow order and associate left to right:
/// `input.pipe(a).pipe(b)` is `b(a(input))`.
///
/// # Examples
///
/// ```
/// use pipette::prelude::*;
///
/// let text = vec![1, 2, 3, 4]
///     .pipe(where_(|value: &i32| value % 2 == 0))
///     .pipe(concat().separator("#"));
/// assert_eq!(text, "2#4");
/// ```
pub trait Pipeable: Sized {
    /// Feeds `self` to `unit`.
    #[inline]
    fn pipe<U>(self, unit: U) -> U::Output
    where
        U: PipeUnit<Self>,
    {
        unit.apply(self)
    }
}

impl<T> Pipeable for T {}
