//! HTTP transport for the Scan2Card API.

pub mod headers;
pub mod http;

pub use http::HttpTransport;
