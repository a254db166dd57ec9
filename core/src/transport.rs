//! The transport collaborator: the seam where actual HTTP I/O happens.
//!
//! # Design
//! `Transport` is the whole contract the adapter relies on: execute one
//! request with the given options, never retry, decode the body as asked,
//! and report failures as `TransportError`. `UreqTransport` binds that
//! contract to `ureq`; tests substitute a fake.

use std::io;

use serde_json::Value;
use tracing::trace;
use ureq::http::{HeaderMap, Response};
use ureq::{Agent, Body, RequestBuilder};

use crate::error::{TransportError, BASE_REQUEST_ERROR};
use crate::http::{HeaderValue, Headers, HttpMethod, HttpRequest, HttpResponse, RawHeaders, RequestBody};
use crate::options::{ResponseType, TransportOptions};

/// Executes a single HTTP round-trip.
pub trait Transport {
    fn send(&self, request: &HttpRequest, options: &TransportOptions) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest, options: &TransportOptions) -> Result<HttpResponse, TransportError> {
        (**self).send(request, options)
    }
}

/// Decode a response body according to `response_type`.
///
/// Text mode and zero-length bodies never fail. A JSON decode failure reports
/// the request URL in its message, quoted, as the body text is unrelated
/// to the URL.
pub fn decode_body(text: &str, response_type: ResponseType, url: &str) -> Result<Value, TransportError> {
    match response_type {
        ResponseType::Text => Ok(Value::String(text.to_string())),
        ResponseType::Json if text.is_empty() => Ok(Value::String(text.to_string())),
        ResponseType::Json => serde_json::from_str(text).map_err(|err| TransportError::Parse {
            message: format!("{err} in \"{url}\""),
            body: text.to_string(),
        }),
    }
}

/// `Transport` backed by `ureq`.
///
/// An agent is built per call so each call gets the deadline from its
/// options. Non-2xx statuses are read as data and reported as
/// `TransportError::Status`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }

    fn agent(&self, options: &TransportOptions) -> Agent {
        let config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(options.timeout()))
            .build();
        Agent::new_with_config(config)
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest, options: &TransportOptions) -> Result<HttpResponse, TransportError> {
        let agent = self.agent(options);
        let url = request.url.as_str();
        let body = request.body.as_ref();
        let caller_content_type = has_content_type(&options.headers);

        let result = match request.method {
            HttpMethod::Get => with_headers(agent.get(url), &options.headers).call(),
            HttpMethod::Delete => with_headers(agent.delete(url), &options.headers).call(),
            HttpMethod::Post => send_body(with_headers(agent.post(url), &options.headers), body, caller_content_type),
            HttpMethod::Put => send_body(with_headers(agent.put(url), &options.headers), body, caller_content_type),
            HttpMethod::Patch => send_body(with_headers(agent.patch(url), &options.headers), body, caller_content_type),
        };
        let mut response = result.map_err(|err| map_error(err, options))?;

        let status = response.status();
        let headers = collect_headers(response.headers());
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|err| map_error(err, options))?;
        trace!(status = status.as_u16(), bytes = text.len(), "response received");

        if !status.is_success() {
            let body = decode_body(&text, options.response_type, url).unwrap_or(Value::String(text));
            return Err(TransportError::Status {
                message: format!(
                    "Response code {} ({})",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
                status: status.as_u16(),
                body,
                headers,
            });
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            body: decode_body(&text, options.response_type, url)?,
            headers,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &Headers) -> RequestBuilder<B> {
    for (name, value) in headers {
        for value in value.values() {
            builder = builder.header(name.as_str(), value);
        }
    }
    builder
}

fn has_content_type(headers: &Headers) -> bool {
    headers.keys().any(|name| name.eq_ignore_ascii_case("content-type"))
}

/// A content type set by the caller wins over the one implied by the body.
fn send_body(
    builder: RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&RequestBody>,
    caller_content_type: bool,
) -> Result<Response<Body>, ureq::Error> {
    match body {
        Some(body) if caller_content_type => builder.send(body.encode().as_bytes()),
        Some(body) => builder
            .header("content-type", body.content_type())
            .send(body.encode().as_bytes()),
        None => builder.send_empty(),
    }
}

/// Header values that are not valid UTF-8 are reported as absent.
fn collect_headers(map: &HeaderMap) -> RawHeaders {
    let mut headers = RawHeaders::new();
    for name in map.keys() {
        let values: Option<Vec<String>> = map
            .get_all(name)
            .iter()
            .map(|value| value.to_str().ok().map(str::to_string))
            .collect();
        let value = values.map(|mut values| {
            if values.len() == 1 {
                HeaderValue::Single(values.remove(0))
            } else {
                HeaderValue::Multiple(values)
            }
        });
        headers.insert(name.as_str().to_string(), value);
    }
    headers
}

fn map_error(err: ureq::Error, options: &TransportOptions) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout {
            message: format!("Timeout of {}ms exceeded", options.timeout_millis),
        },
        ureq::Error::Io(err) => TransportError::Request {
            name: BASE_REQUEST_ERROR.to_string(),
            timed_out: err.kind() == io::ErrorKind::TimedOut,
            message: err.to_string(),
        },
        err @ (ureq::Error::ConnectionFailed | ureq::Error::HostNotFound) => {
            TransportError::connection(err.to_string())
        }
        ureq::Error::TooManyRedirects => TransportError::Request {
            name: "MaxRedirectsError".to_string(),
            message: "Redirected too many times".to_string(),
            timed_out: false,
        },
        other => TransportError::other(other),
    }
}
