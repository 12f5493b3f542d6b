//! Transport layer for the DANDI SDK.

pub mod http;

pub use http::HttpTransport;
