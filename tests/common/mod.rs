//! Common test utilities for integration tests.
//!
//! Fixtures build realistic debate transcripts and encode them as the
//! backend would send them on the wire.

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;
