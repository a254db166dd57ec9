//! Error types for the HTTP adapter.
//!
//! # Design
//! Two layers. `TransportError` is the transport's own failure vocabulary,
//! mapped once at the transport boundary into a closed enum. `AdapterError`
//! is what callers see: exactly five kinds, each carrying only the fields
//! meaningful to it. `classify` (in `classify.rs`) turns the former into the
//! latter.
//!
//! Connection-level failures keep the transport's kind name in
//! `TransportError::Request::name`. Only the base name
//! (`BASE_REQUEST_ERROR`) counts as a plain connection failure; every more
//! specific name lands in `AdapterError::Generic`, so new upstream failure
//! kinds never widen the caller-visible taxonomy.

use serde_json::Value;
use thiserror::Error;

use crate::http::{Headers, HttpRequest, RawHeaders};

/// Kind name of the transport's undecorated connection failure.
pub const BASE_REQUEST_ERROR: &str = "RequestError";

/// A failure reported by the transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a status outside 2xx.
    #[error("{message}")]
    Status {
        message: String,
        status: u16,
        body: Value,
        headers: RawHeaders,
    },

    /// The response arrived but its body could not be decoded.
    #[error("{message}")]
    Parse { message: String, body: String },

    /// The transport's dedicated deadline signal fired.
    #[error("{message}")]
    Timeout { message: String },

    /// Connection-level failure, tagged with the transport's kind name.
    #[error("{name}: {message}")]
    Request {
        name: String,
        message: String,
        timed_out: bool,
    },

    /// Anything the transport could not place in the categories above.
    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TransportError {
    /// A connection failure of the base kind.
    pub fn connection(message: impl Into<String>) -> Self {
        TransportError::Request {
            name: BASE_REQUEST_ERROR.to_string(),
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn other(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        TransportError::Other {
            message: source.to_string(),
            source: Box::new(source),
        }
    }

    /// The message as reported by the transport.
    pub fn message(&self) -> &str {
        match self {
            TransportError::Status { message, .. }
            | TransportError::Parse { message, .. }
            | TransportError::Timeout { message }
            | TransportError::Request { message, .. }
            | TransportError::Other { message, .. } => message,
        }
    }
}

/// Errors returned by every `HttpAdapter` verb.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    StatusCode(#[from] HttpStatusCodeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Timeout(#[from] HttpTimeoutError),

    #[error(transparent)]
    Request(#[from] HttpRequestError),

    #[error(transparent)]
    Generic(#[from] HttpGenericError),
}

impl AdapterError {
    pub fn kind(&self) -> &'static str {
        match self {
            AdapterError::StatusCode(_) => "HttpStatusCodeError",
            AdapterError::Parse(_) => "ParseError",
            AdapterError::Timeout(_) => "HttpTimeoutError",
            AdapterError::Request(_) => "HttpRequestError",
            AdapterError::Generic(_) => "HttpGenericError",
        }
    }

    /// Status code, for status-code errors only.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AdapterError::StatusCode(err) => Some(err.status_code),
            _ => None,
        }
    }
}

/// The server answered with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct HttpStatusCodeError {
    pub message: String,
    pub status_code: u16,
    pub body: Value,
    pub headers: Headers,
}

impl HttpStatusCodeError {
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn is_bad_request(&self) -> bool {
        self.status_code == 400
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status_code == 401
    }

    pub fn is_forbidden(&self) -> bool {
        self.status_code == 403
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    pub fn is_too_many_requests(&self) -> bool {
        self.status_code == 429
    }

    /// 500 only; other 5xx codes have their own predicates.
    pub fn is_server_error(&self) -> bool {
        self.status_code == 500
    }

    pub fn is_bad_gateway(&self) -> bool {
        self.status_code == 502
    }

    pub fn is_service_unavailable(&self) -> bool {
        self.status_code == 503
    }

    pub fn is_gateway_timeout(&self) -> bool {
        self.status_code == 504
    }
}

/// The response body could not be decoded into the requested shape.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub response_body: String,
}

/// The call exceeded its deadline.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct HttpTimeoutError {
    pub message: String,
}

/// A network-level failure; `request` describes what was being sent.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct HttpRequestError {
    pub message: String,
    pub request: HttpRequest,
}

/// Any failure outside the other four kinds. The transport's failure is
/// kept for diagnostics only.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpGenericError {
    pub message: String,
    #[source]
    pub original_error: Box<TransportError>,
}
