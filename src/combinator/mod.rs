//! The built-in pipe units.
//!
//! Units are grouped by role:
//!
//! - [`transform`]: lazy, one item at a time (`select`, `where_`, `take`,
//!   `skip`, `take_while`, `skip_while`, `chain`, `chain_with`, `islice`,
//!   `izip`)
//! - [`structural`]: flattening and reordering (`traverse`, `permutations`,
//!   `sort`, `reverse`, `groupby`)
//! - [`reduce`]: eager reducers (`count`, `length`, `sum`, `average`,
//!   `first`, `any`, `all`, `max`, `min`, `aggregate`, `index`, `tail`)
//! - [`convert`]: whole-input conversions (`as_list`, `as_tuple`, `as_dict`,
//!   `concat`, `to_text`, `stringify`, `map`, `to_type`, `run_with`, `t`, `strip`,
//!   `lstrip`, `rstrip`, `passed`)
//!
//! # Examples
//!
//! ```
//! use pipette::prelude::*;
//!
//! let report = (1..=9)
//!     .pipe(groupby(|value: &i32| if value % 2 == 0 { "Even" } else { "Odd" }))
//!     .pipe(select(|(_, members): (&str, Vec<i32>)| members.pipe(concat())))
//!     .pipe(as_list());
//! assert_eq!(report, vec!["2, 4, 6, 8", "1, 3, 5, 7, 9"]);
//! ```

pub mod convert;
pub mod reduce;
pub mod structural;
pub mod transform;

pub use convert::*;
pub use reduce::*;
pub use structural::*;
pub use transform::*;

// Parameterless units are plain values that can be shared freely.
static_assertions::assert_impl_all!(Count: Copy, Send, Sync);
static_assertions::assert_impl_all!(Traverse: Copy, Send, Sync);
static_assertions::assert_impl_all!(AsList: Copy, Send, Sync);

// Units with a separate `Value` impl next to a generic `IntoIterator` impl
// rely on `Value` never being iterable itself.
static_assertions::assert_not_impl_any!(crate::value::Value: IntoIterator, Iterator);
