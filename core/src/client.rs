//! The adapter: verb operations over a pluggable transport.
//!
//! # Design
//! `HttpAdapter` holds only its transport and the configured timeout and
//! carries no mutable state between calls. Every verb is split into a
//! `build_*` method that produces the `HttpRequest` and an execution step
//! that shapes the `TransportOptions`, hands both to the transport, and
//! either projects the response or classifies the failure. The `build_*`
//! methods are public so the exact outbound request can be inspected
//! without any I/O.

use serde_json::Value;
use tracing::{debug, warn};

use crate::classify::classify;
use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::http::{AdapterResponse, Headers, HttpMethod, HttpRequest};
use crate::options::{build_transport_options, project_response, select_body_encoding, RequestOptions, TransportOptions};
use crate::query::append_query;
use crate::transport::{Transport, UreqTransport};
use crate::types::QueryParams;

/// HTTP adapter exposing GET/DELETE (query parameters) and POST/PUT/PATCH
/// (request body) with a closed error vocabulary.
#[derive(Debug, Clone)]
pub struct HttpAdapter<T = UreqTransport> {
    transport: T,
    timeout_millis: u64,
}

impl HttpAdapter<UreqTransport> {
    /// Adapter over `ureq`.
    pub fn from_config(config: AdapterConfig) -> Self {
        Self::new(UreqTransport::new(), config)
    }
}

impl Default for HttpAdapter<UreqTransport> {
    fn default() -> Self {
        Self::from_config(AdapterConfig::default())
    }
}

impl<T: Transport> HttpAdapter<T> {
    pub fn new(transport: T, config: AdapterConfig) -> Self {
        Self {
            transport,
            timeout_millis: config.timeout_millis,
        }
    }

    pub fn timeout_millis(&self) -> u64 {
        self.timeout_millis
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_get(&self, url: &str, params: &QueryParams, headers: &Headers, options: &RequestOptions) -> HttpRequest {
        build_query_request(HttpMethod::Get, url, params, headers, options)
    }

    pub fn build_delete(
        &self,
        url: &str,
        params: &QueryParams,
        headers: &Headers,
        options: &RequestOptions,
    ) -> HttpRequest {
        build_query_request(HttpMethod::Delete, url, params, headers, options)
    }

    pub fn build_post(&self, url: &str, body: &Value, headers: &Headers, options: &RequestOptions) -> HttpRequest {
        build_body_request(HttpMethod::Post, url, body, headers, options)
    }

    pub fn build_put(&self, url: &str, body: &Value, headers: &Headers, options: &RequestOptions) -> HttpRequest {
        build_body_request(HttpMethod::Put, url, body, headers, options)
    }

    pub fn build_patch(&self, url: &str, body: &Value, headers: &Headers, options: &RequestOptions) -> HttpRequest {
        build_body_request(HttpMethod::Patch, url, body, headers, options)
    }

    /// Options handed to the transport for a call with `headers` and `options`.
    pub fn transport_options(&self, headers: &Headers, options: &RequestOptions) -> TransportOptions {
        build_transport_options(headers, options.parse_json, self.timeout_millis)
    }

    pub fn get(
        &self,
        url: &str,
        params: &QueryParams,
        headers: &Headers,
        options: &RequestOptions,
    ) -> Result<AdapterResponse, AdapterError> {
        let request = self.build_get(url, params, headers, options);
        self.execute(request, options)
    }

    pub fn delete(
        &self,
        url: &str,
        params: &QueryParams,
        headers: &Headers,
        options: &RequestOptions,
    ) -> Result<AdapterResponse, AdapterError> {
        let request = self.build_delete(url, params, headers, options);
        self.execute(request, options)
    }

    pub fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &Headers,
        options: &RequestOptions,
    ) -> Result<AdapterResponse, AdapterError> {
        let request = self.build_post(url, body, headers, options);
        self.execute(request, options)
    }

    pub fn put(
        &self,
        url: &str,
        body: &Value,
        headers: &Headers,
        options: &RequestOptions,
    ) -> Result<AdapterResponse, AdapterError> {
        let request = self.build_put(url, body, headers, options);
        self.execute(request, options)
    }

    pub fn patch(
        &self,
        url: &str,
        body: &Value,
        headers: &Headers,
        options: &RequestOptions,
    ) -> Result<AdapterResponse, AdapterError> {
        let request = self.build_patch(url, body, headers, options);
        self.execute(request, options)
    }

    #[tracing::instrument(skip_all, fields(method = %request.method, url = %request.url))]
    fn execute(&self, request: HttpRequest, options: &RequestOptions) -> Result<AdapterResponse, AdapterError> {
        let transport_options = self.transport_options(&request.headers, options);
        debug!(
            response_type = ?transport_options.response_type,
            timeout_millis = transport_options.timeout_millis,
            "sending request"
        );

        match self.transport.send(&request, &transport_options) {
            Ok(response) => {
                debug!(status = response.status, "request succeeded");
                Ok(project_response(response, options.resolve_full_response))
            }
            Err(err) => {
                let err = classify(err, &request);
                warn!(kind = err.kind(), status = ?err.status_code(), "request failed: {err}");
                Err(err)
            }
        }
    }
}

fn build_query_request(
    method: HttpMethod,
    url: &str,
    params: &QueryParams,
    headers: &Headers,
    options: &RequestOptions,
) -> HttpRequest {
    HttpRequest {
        method,
        url: append_query(url, params, options.array_format),
        headers: headers.clone(),
        body: None,
    }
}

fn build_body_request(
    method: HttpMethod,
    url: &str,
    body: &Value,
    headers: &Headers,
    options: &RequestOptions,
) -> HttpRequest {
    HttpRequest {
        method,
        url: url.to_string(),
        headers: headers.clone(),
        body: Some(select_body_encoding(options.content_type).wrap(body.clone())),
    }
}
