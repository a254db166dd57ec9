//! Stable adapter over an HTTP client library.
//!
//! # Overview
//! `HttpAdapter` offers GET/DELETE (query parameters) and POST/PUT/PATCH
//! (request body) and delegates the actual I/O to a `Transport`. It shapes
//! every outbound request the same way and reports every failure as one of
//! five `AdapterError` kinds, whatever the transport underneath.
//!
//! # Design
//! - The adapter holds only its transport and a timeout; calls share no state.
//! - Request shaping (`query`, `options`) and failure classification
//!   (`classify`) are pure functions, testable without a network.
//! - `Transport` is the I/O seam. `UreqTransport` is the bundled binding;
//!   it maps `ureq` failures into `TransportError` once, at the boundary.
//! - The transport never retries. Retry policy belongs to callers.

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod options;
pub mod query;
pub mod transport;
pub mod types;

pub use classify::classify;
pub use client::HttpAdapter;
pub use config::{AdapterConfig, ConfigError, DEFAULT_TIMEOUT_MILLIS, TIMEOUT_ENV};
pub use error::{
    AdapterError, HttpGenericError, HttpRequestError, HttpStatusCodeError, HttpTimeoutError, ParseError,
    TransportError, BASE_REQUEST_ERROR,
};
pub use http::{
    AdapterResponse, FullResponse, HeaderValue, Headers, HttpMethod, HttpRequest, HttpResponse, RawHeaders, RequestBody,
};
pub use options::{ArrayFormat, BodyEncoding, ContentType, RequestOptions, ResponseType, TransportOptions};
pub use query::{append_query, build_query_string};
pub use transport::{Transport, UreqTransport};
pub use types::{QueryParams, QueryValue, Scalar};
