//! Procedural macros for pipette.
//!
//! This crate provides the [`macro@pipe_unit`] attribute, which turns a plain
//! function of an input and some parameters into a unit factory.
//!
//! Use it through the `pipette` crate (feature `derive`, on by default):
//! the generated code refers to `::pipette`.
//!
//! # Example
//!
//! ```rust,ignore
//! use pipette::prelude::*;
//!
//! #[pipe_unit]
//! fn repeat(text: String, times: usize) -> String {
//!     text.repeat(times)
//! }
//!
//! // Generated signature:
//! // fn repeat(times: usize) -> pipette::Pipe<impl Fn(String) -> String>
//!
//! assert_eq!(String::from("ab").pipe(repeat(2)), "abab");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod pipe_unit;

use proc_macro::TokenStream;

/// Turns `fn name(input: In, p1: A, ...) -> Out` into a factory
/// `fn name(p1: A, ...) -> ::pipette::Pipe<impl Fn(In) -> Out>`.
///
/// The first parameter is the unit's input; the remaining ones become the
/// factory's parameters. They are captured by the returned unit and cloned
/// on every application, so they must implement `Clone`.
///
/// # Rejected Forms
///
/// - methods (a `self` receiver)
/// - `async fn`
/// - functions without an input parameter
/// - `impl Trait` in parameter types
/// - any arguments to the attribute itself
///
/// # Example
///
/// ```rust,ignore
/// use pipette::prelude::*;
///
/// #[pipe_unit]
/// fn clamp_all(values: Vec<i32>, low: i32, high: i32) -> Vec<i32> {
///     values.into_iter().map(|value| value.clamp(low, high)).collect()
/// }
///
/// let clamp = clamp_all(0, 10);
/// assert_eq!(vec![-5, 5, 15].pipe(&clamp), vec![0, 5, 10]);
/// assert_eq!(vec![42].pipe(&clamp), vec![10]);
/// ```
#[proc_macro_attribute]
pub fn pipe_unit(attribute: TokenStream, item: TokenStream) -> TokenStream {
    pipe_unit::pipe_unit_impl(attribute, item)
}
