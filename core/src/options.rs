//! Per-call request options and the transport options derived from them.
//!
//! # Design
//! Callers describe what they want in `RequestOptions`; the adapter turns
//! that into a `TransportOptions` record for the transport, and projects
//! the transport's response back into the shape the caller asked for.
//! Everything here is a pure function of its inputs.
//!
//! The transport never retries and always reports headers together with
//! the body, so the adapter can decide the projection after the fact.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{AdapterResponse, FullResponse, Headers, HttpResponse, RawHeaders, RequestBody};

/// How a sequence-valued query parameter is flattened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFormat {
    /// `a[]=1&a[]=2`
    #[default]
    Brackets,
    /// `a[0]=1&a[1]=2`
    Indices,
    /// `a=1&a=2`
    Repeat,
    /// `a=1,2`
    Comma,
}

/// Request body encoding requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Json,
    Form,
}

/// Body encoding the transport is asked to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    Form,
}

impl BodyEncoding {
    pub fn wrap(self, payload: Value) -> RequestBody {
        match self {
            BodyEncoding::Json => RequestBody::Json(payload),
            BodyEncoding::Form => RequestBody::Form(payload),
        }
    }
}

/// How the transport decodes the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Json,
    Text,
}

/// Options a caller may set on a single call. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestOptions {
    #[serde(rename = "parseJSON")]
    pub parse_json: bool,
    pub resolve_full_response: bool,
    /// Only meaningful for `get` and `delete`.
    pub array_format: ArrayFormat,
    /// Only meaningful for `post`, `put` and `patch`.
    pub content_type: ContentType,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            parse_json: true,
            resolve_full_response: false,
            array_format: ArrayFormat::default(),
            content_type: ContentType::default(),
        }
    }
}

impl RequestOptions {
    pub fn with_parse_json(mut self, parse_json: bool) -> Self {
        self.parse_json = parse_json;
        self
    }

    pub fn with_full_response(mut self, resolve_full_response: bool) -> Self {
        self.resolve_full_response = resolve_full_response;
        self
    }

    pub fn with_array_format(mut self, array_format: ArrayFormat) -> Self {
        self.array_format = array_format;
        self
    }

    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }
}

/// Options handed to the transport alongside an `HttpRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    pub headers: Headers,
    pub response_type: ResponseType,
    pub timeout_millis: u64,
    /// Always `false`: headers are needed for full-response projection.
    pub resolve_body_only: bool,
    /// Always `0`: retrying is the caller's business.
    pub retry: u32,
}

impl TransportOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

pub fn build_transport_options(headers: &Headers, parse_json: bool, timeout_millis: u64) -> TransportOptions {
    TransportOptions {
        headers: headers.clone(),
        response_type: if parse_json {
            ResponseType::Json
        } else {
            ResponseType::Text
        },
        timeout_millis,
        resolve_body_only: false,
        retry: 0,
    }
}

pub fn select_body_encoding(content_type: ContentType) -> BodyEncoding {
    match content_type {
        ContentType::Json => BodyEncoding::Json,
        ContentType::Form => BodyEncoding::Form,
    }
}

/// Reduce a transport response to the body, or body plus headers.
pub fn project_response(response: HttpResponse, resolve_full_response: bool) -> AdapterResponse {
    if resolve_full_response {
        AdapterResponse::Full(FullResponse {
            body: response.body,
            headers: strip_absent_headers(response.headers),
        })
    } else {
        AdapterResponse::Body(response.body)
    }
}

/// Drop every header whose value is absent.
pub fn strip_absent_headers(headers: RawHeaders) -> Headers {
    headers
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect()
}
