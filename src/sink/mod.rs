//! Units whose purpose is a side effect: console, file and network output.
//!
//! Every sink is behind a cargo feature, all enabled by default:
//!
//! | Feature | Units |
//! |---|---|
//! | `console` | [`stdout`], [`lineout`], [`tee`] |
//! | `file` | [`to_file`] |
//! | `net` | [`netcat`], [`netwrite`] |
//!
//! File and network sinks log through `tracing`; the library never installs
//! a subscriber.

#[cfg(feature = "console")]
pub mod console;

#[cfg(feature = "file")]
pub mod file;

#[cfg(feature = "net")]
pub mod net;

#[cfg(feature = "console")]
pub use console::*;

#[cfg(feature = "file")]
pub use file::*;

#[cfg(feature = "net")]
pub use net::*;
