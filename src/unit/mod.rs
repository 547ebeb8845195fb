//! Pipe units and their application.
//!
//! This module provides the composition mechanism every combinator in the
//! crate is built on.
//!
//! # Overview
//!
//! - [`PipeUnit`]: a transformation applied to an incoming value
//! - [`Pipe`]: a unit wrapping a plain function, see [`unit`]
//! - [`Curried`]: a parameterized unit with its parameters captured, see
//!   [`parameterized`] and [`Pipe::curry`]
//! - [`Pipeable::pipe`] and [`apply`]: left-to-right application
//! - [`pipe!`](crate::pipe!): applies a whole chain of units at once
//! - [`identity`]: the identity function, the default key of ordering units
//!
//! # Unit-as-value and unit-as-factory
//!
//! Some units need nothing but their input and are used as values
//! (`sum()`, `count()`). Others are built by a factory that captures
//! parameters first (`take(3)`, `concat().separator("#")`). Both produce
//! ordinary values implementing [`PipeUnit`], so they are interchangeable
//! wherever a unit is expected.
//!
//! # Laws
//!
//! - **Application**: `x.pipe(unit(f)) == f(x)`
//! - **Currying**: `x.pipe(parameterized(f).curry(a)) == f(x, &a)`
//! - **Left-to-right**: `x.pipe(a).pipe(b) == pipe!(x, a, b) == apply(apply(x, a), b)`
//!
//! # Examples
//!
//! ```
//! use pipette::prelude::*;
//!
//! let euler6 = {
//!     let square = |value: u64| value * value;
//!     let square_of_sum = square((1..=100_u64).pipe(sum()));
//!     let sum_of_squares = (1..=100_u64).pipe(select(square)).pipe(sum());
//!     square_of_sum - sum_of_squares
//! };
//! assert_eq!(euler6, 25_164_150);
//! ```

mod apply;
mod pipe;
mod pipe_macro;

pub use apply::{Pipeable, apply};
pub use pipe::{Curried, Pipe, PipeUnit, parameterized, unit};

/// Returns the value unchanged.
///
/// # Examples
///
/// ```
/// use pipette::unit::identity;
///
/// assert_eq!(identity(42), 42);
/// assert_eq!(identity("hello"), "hello");
/// ```
#[inline]
pub fn identity<T>(value: T) -> T {
    value
}

/// Declares a unit that needs no parameters, together with its
/// snake_case factory function.
macro_rules! nullary_unit {
    ($(#[$meta:meta])* $name:ident) => {
        ::paste::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            #[doc = "Creates the [`" $name "`] unit."]
            #[inline]
            pub const fn [<$name:snake>]() -> $name {
                $name
            }
        }
    };
}

pub(crate) use nullary_unit;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_with_unit() {
        assert_eq!(identity(()), ());
    }

    #[test]
    fn test_identity_as_unit() {
        let same = unit(identity::<Vec<i32>>);
        assert_eq!(vec![1, 2].pipe(same), vec![1, 2]);
    }
}
