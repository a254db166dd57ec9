//! Mapping of transport failures onto `AdapterError`.
//!
//! Rules are tried in order and the first match wins:
//!
//! 1. non-2xx status → `StatusCode`
//! 2. body decode failure → `Parse`
//! 3. dedicated timeout, or base `RequestError` flagged as timed out → `Timeout`
//! 4. base `RequestError` → `Request`
//! 5. everything else → `Generic`

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{
    AdapterError, HttpGenericError, HttpRequestError, HttpStatusCodeError, HttpTimeoutError,
    ParseError, TransportError, BASE_REQUEST_ERROR,
};
use crate::http::HttpRequest;
use crate::options::strip_absent_headers;

/// Decode failures embed the request URL as ` in <url>` or ` in "<url>"`.
static URL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\sin\s+["']?https?://"#).expect("valid regex"));

/// Classify `error`, raised while executing `request`, into an adapter error.
pub fn classify(error: TransportError, request: &HttpRequest) -> AdapterError {
    match error {
        TransportError::Status {
            message,
            status,
            body,
            headers,
        } => HttpStatusCodeError {
            message,
            status_code: status,
            body,
            headers: strip_absent_headers(headers),
        }
        .into(),
        TransportError::Parse { message, body } => ParseError {
            message: strip_url_suffix(&message).to_string(),
            response_body: body,
        }
        .into(),
        TransportError::Timeout { message } => HttpTimeoutError { message }.into(),
        TransportError::Request {
            name,
            message,
            timed_out,
        } if name == BASE_REQUEST_ERROR => {
            if timed_out {
                HttpTimeoutError { message }.into()
            } else {
                HttpRequestError {
                    message,
                    request: describe(request),
                }
                .into()
            }
        }
        other => HttpGenericError {
            message: other.message().to_string(),
            original_error: Box::new(other),
        }
        .into(),
    }
}

/// Text preceding the first ` in http(s)://` (optionally quoted) marker.
pub fn strip_url_suffix(message: &str) -> &str {
    match URL_SUFFIX.find(message) {
        Some(found) => &message[..found.start()],
        None => message,
    }
}

fn describe(request: &HttpRequest) -> HttpRequest {
    HttpRequest {
        body: if request.method.carries_body() {
            request.body.clone()
        } else {
            None
        },
        ..request.clone()
    }
}
