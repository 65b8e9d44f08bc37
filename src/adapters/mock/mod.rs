//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with scripted (chunked, failing or stalled) responses

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
