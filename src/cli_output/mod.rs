//! Line-based output for the debate-feed binary.
//!
//! Formatting returns strings so it can be tested; the `print_*` wrappers
//! write them to stdout.

mod feed;

pub use feed::*;
