//! Local HTTP server used to exercise the adapter over real sockets.
//!
//! Routes:
//! - `/echo` (any method): reflects method, raw query, headers and body as JSON
//! - `/status/{code}` (any method): answers with `code` and a JSON body
//! - `/malformed`: 200 with a JSON content type and a body that is not JSON
//! - `/slow/{millis}`: waits `millis` before answering
//! - `/text`: plain-text body
//! - `/cookies`: two `set-cookie` headers on one response

use std::collections::BTreeMap;
use std::time::Duration;

use axum::{
    extract::{Path, RawQuery},
    http::{header, HeaderMap, Method, StatusCode},
    response::{AppendHeaders, IntoResponse},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::debug;

/// What `/echo` saw of the incoming request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub const MALFORMED_BODY: &str = "<html>not json</html>";

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/malformed", any(malformed))
        .route("/slow/{millis}", get(slow))
        .route("/text", get(text))
        .route("/cookies", get(cookies))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, RawQuery(query): RawQuery, headers: HeaderMap, body: String) -> impl IntoResponse {
    debug!(%method, ?query, "echo");
    let headers = headers
        .iter()
        .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
        .collect();
    let echo = Echo {
        method: method.to_string(),
        query,
        headers,
        body,
    };
    ([("x-echo", "yes")], Json(echo))
}

async fn status(Path(code): Path<u16>) -> impl IntoResponse {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    debug!(%status, "status");
    (status, Json(json!({ "code": status.as_u16() })))
}

async fn malformed() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], MALFORMED_BODY)
}

async fn slow(Path(millis): Path<u64>) -> Json<serde_json::Value> {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    Json(json!({ "slept": millis }))
}

async fn text() -> &'static str {
    "hello"
}

async fn cookies() -> impl IntoResponse {
    (
        AppendHeaders([(header::SET_COOKIE, "a=1"), (header::SET_COOKIE, "b=2")]),
        Json(json!({})),
    )
}
