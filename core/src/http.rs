//! HTTP request and response descriptions exchanged with the transport.
//!
//! # Design
//! These types describe requests and responses as plain data. The adapter
//! builds `HttpRequest` values and hands them to a `Transport`, which does
//! the actual I/O and returns an `HttpResponse` whose body has already been
//! decoded according to the requested `ResponseType`.
//!
//! The same `HttpRequest` doubles as the request description attached to
//! connection errors, so it only carries a body for verbs that send one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::form_urlencoded;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// POST, PUT and PATCH send a request body; GET and DELETE carry their
    /// arguments in the query string.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A header value: either a single string or one string per repeated line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    Single(String),
    Multiple(Vec<String>),
}

impl HeaderValue {
    /// Every value carried, in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            HeaderValue::Single(value) => vec![value.as_str()],
            HeaderValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(value: &str) -> Self {
        HeaderValue::Single(value.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(value: String) -> Self {
        HeaderValue::Single(value)
    }
}

impl From<Vec<String>> for HeaderValue {
    fn from(values: Vec<String>) -> Self {
        HeaderValue::Multiple(values)
    }
}

/// Header map as seen by callers. Never contains absent values.
pub type Headers = BTreeMap<String, HeaderValue>;

/// Header map as reported by a transport. `None` marks a header whose value
/// the transport could not represent.
pub type RawHeaders = BTreeMap<String, Option<HeaderValue>>;

/// Request payload together with the encoding chosen for it.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Form(Value),
}

impl RequestBody {
    pub fn payload(&self) -> &Value {
        match self {
            RequestBody::Json(value) | RequestBody::Form(value) => value,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => "application/json",
            RequestBody::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    /// Serialize the payload into the wire text for its content type.
    ///
    /// Form bodies take the payload's top-level keys; values are
    /// stringified on a best-effort basis (sequences comma-joined, nested
    /// objects as JSON text). A non-object form payload is sent as its
    /// plain string form.
    pub fn encode(&self) -> String {
        match self {
            RequestBody::Json(value) => value.to_string(),
            RequestBody::Form(Value::Object(fields)) => {
                let mut serializer = form_urlencoded::Serializer::new(String::new());
                for (key, value) in fields {
                    serializer.append_pair(key, &stringify(value));
                }
                serializer.finish()
            }
            RequestBody::Form(other) => stringify(other),
        }
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

/// An HTTP request described as plain data.
///
/// Built by `HttpAdapter::build_*` methods. `url` already includes the
/// serialized query string.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<RequestBody>,
}

/// A successful transport round-trip with its body already decoded.
///
/// Text-mode responses carry the raw text as a `Value::String`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: RawHeaders,
    pub body: Value,
}

/// Body together with the response headers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullResponse {
    pub body: Value,
    pub headers: Headers,
}

/// What a verb operation returns: the body alone, or body plus headers
/// when the caller asked for the full response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdapterResponse {
    Body(Value),
    Full(FullResponse),
}

impl AdapterResponse {
    pub fn body(&self) -> &Value {
        match self {
            AdapterResponse::Body(body) => body,
            AdapterResponse::Full(full) => &full.body,
        }
    }

    pub fn headers(&self) -> Option<&Headers> {
        match self {
            AdapterResponse::Body(_) => None,
            AdapterResponse::Full(full) => Some(&full.headers),
        }
    }

    pub fn into_body(self) -> Value {
        match self {
            AdapterResponse::Body(body) => body,
            AdapterResponse::Full(full) => full.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_post_put_patch_carry_a_body() {
        assert!(HttpMethod::Post.carries_body());
        assert!(HttpMethod::Put.carries_body());
        assert!(HttpMethod::Patch.carries_body());
        assert!(!HttpMethod::Get.carries_body());
        assert!(!HttpMethod::Delete.carries_body());
    }

    #[test]
    fn method_displays_uppercase() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(serde_json::to_value(HttpMethod::Delete).unwrap(), json!("DELETE"));
    }

    #[test]
    fn json_body_encodes_as_json_text() {
        let body = RequestBody::Json(json!({"bar": "foo"}));
        assert_eq!(body.content_type(), "application/json");
        assert_eq!(body.encode(), r#"{"bar":"foo"}"#);
    }

    #[test]
    fn form_body_encodes_top_level_fields() {
        let body = RequestBody::Form(json!({"bar": "foo bar", "n": 1, "list": [1, 2], "none": null}));
        assert_eq!(body.content_type(), "application/x-www-form-urlencoded");
        assert_eq!(body.encode(), "bar=foo+bar&list=1%2C2&n=1&none=");
    }

    #[test]
    fn form_body_stringifies_nested_objects() {
        let body = RequestBody::Form(json!({"inner": {"a": 1}}));
        assert_eq!(body.encode(), "inner=%7B%22a%22%3A1%7D");
    }

    #[test]
    fn header_value_deserializes_single_or_multiple() {
        let single: HeaderValue = serde_json::from_value(json!("a")).unwrap();
        let multiple: HeaderValue = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(single, HeaderValue::from("a"));
        assert_eq!(multiple.values(), vec!["a", "b"]);
    }

    #[test]
    fn full_response_serializes_as_body_and_headers() {
        let response = AdapterResponse::Full(FullResponse {
            body: json!({"x": 1}),
            headers: Headers::new(),
        });
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"body": {"x": 1}, "headers": {}})
        );
        assert_eq!(response.into_body(), json!({"x": 1}));
    }
}
