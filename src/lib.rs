//! # pipette
//!
//! Composable pipe units for shell-style sequence processing.
//!
//! ## Overview
//!
//! A *pipe unit* is a transformation applied to an incoming value. Units are
//! chained left to right with [`Pipeable::pipe`] (or [`pipe!`]), so a
//! pipeline reads in data-flow order:
//!
//! - **Unit core**: [`PipeUnit`], [`Pipe`], currying with [`Curried`], and
//!   the `#[pipe_unit]` attribute for turning plain functions into units
//! - **Lazy transforms**: `select`, `where_`, `take`, `skip`, `chain`,
//!   `traverse`, `islice`, `izip`, `permutations`, `sort`, `groupby`, ...
//! - **Reducers**: `count`, `sum`, `average`, `first`, `max`, `min`,
//!   `aggregate`, `index`, `tail`, ...
//! - **Converters**: `as_list`, `as_dict`, `concat`, `map`, `to_type`, `run_with`,
//!   `t`, `strip`, ...
//! - **Sinks**: console (`stdout`, `lineout`, `tee`), files (`to_file`) and
//!   TCP (`netcat`, `netwrite`)
//! - **Dynamic values**: [`Value`] for units whose behavior depends on the
//!   shape of their input
//!
//! Lazy units return iterators and pull nothing until a downstream unit (or
//! the caller) iterates. Fallible units return [`PipeResult`].
//!
//! ## Feature Flags
//!
//! - `derive`: the `#[pipe_unit]` attribute (default)
//! - `console`: console sinks (default)
//! - `file`: the file sink (default)
//! - `net`: TCP sinks (default)
//! - `serde`: `Serialize`/`Deserialize` for [`Value`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use pipette::prelude::*;
//!
//! let even_squares = (1..)
//!     .pipe(select(|value: u32| value * value))
//!     .pipe(where_(|square: &u32| square % 2 == 0))
//!     .pipe(take(3))
//!     .pipe(concat());
//! assert_eq!(even_squares, "4, 16, 36");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the unit core, every built-in unit and the error types.
///
/// # Usage
///
/// ```rust
/// use pipette::prelude::*;
/// ```
pub mod prelude {
    pub use crate::combinator::*;
    pub use crate::error::{PipeError, PipeResult};
    pub use crate::sink::*;
    pub use crate::unit::*;
    pub use crate::value::Value;

    #[cfg(feature = "derive")]
    pub use crate::pipe_unit;
}

pub mod combinator;
pub mod error;
pub mod order;
pub mod sink;
pub mod unit;
pub mod value;

pub use error::{PipeError, PipeResult};
pub use unit::{Curried, Pipe, PipeUnit, Pipeable, apply, parameterized, unit};
pub use value::Value;

/// Turns a function of an input and parameters into a unit factory.
///
/// `fn name(input: In, first: A, second: B) -> Out` becomes
/// `fn name(first: A, second: B) -> Pipe<impl Fn(In) -> Out>`. Parameters
/// must be `Clone`, since the unit can be applied many times.
///
/// # Examples
///
/// ```rust
/// use pipette::prelude::*;
///
/// #[pipe_unit]
/// fn scale(values: Vec<i32>, factor: i32) -> Vec<i32> {
///     values.into_iter().map(|value| value * factor).collect()
/// }
///
/// assert_eq!(vec![1, 2].pipe(scale(3)), vec![3, 6]);
/// ```
#[cfg(feature = "derive")]
pub use pipette_derive::pipe_unit;
