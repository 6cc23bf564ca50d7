//! Async REST adapter: URL construction, verb dispatch, and outcome mapping.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{toolkit, Error};

/// Default request timeout applied to the underlying HTTP client.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default API version segment appended to the base URL.
const DEFAULT_API_VERSION: &str = "v1";

/// Result of a dispatched request.
pub type RestResult = Result<RestResponse, Error>;

/// URL scheme for the adapter's base URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scheme {
    /// Plain HTTP. Useful for local development and test servers.
    Http,
    /// HTTPS. This is the default.
    #[default]
    Https,
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Scheme::Http => "http",
                Scheme::Https => "https",
            }
        )
    }
}

/// Async adapter for a single REST API.
///
/// Owns a configured `reqwest::Client` and a base URL of the form
/// `scheme://hostname/{api_version}[/{endpoint_prefix}]`. Verb methods return
/// a [`RequestBuilder`] that dispatches relative to that base. The adapter
/// performs no retries or caching; connection pooling, TLS, and protocol
/// details are delegated to `reqwest`.
#[derive(Debug)]
pub struct RestAdapter {
    client: reqwest::Client,
    base_url: Url,
}

impl RestAdapter {
    /// Adapter for `hostname` with default settings: HTTPS, API version
    /// `v1`, 30-second timeout, no auth.
    pub fn new(hostname: &str) -> Result<Self, Error> {
        Self::builder(hostname).build()
    }

    /// Starts a builder for `hostname`. The hostname may include a port.
    pub fn builder(hostname: &str) -> AdapterBuilder {
        AdapterBuilder {
            hostname: hostname.to_string(),
            scheme: Scheme::default(),
            api_version: DEFAULT_API_VERSION.to_string(),
            endpoint_prefix: None,
            api_key: None,
            azure_api: false,
            jwt_token: None,
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            verify_tls: true,
        }
    }

    /// The resolved base URL all endpoints are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET request. Expects a JSON payload by default.
    pub fn get(&self, endpoint: &str) -> RequestBuilder<'_> {
        self.request(Method::GET, endpoint)
    }

    /// POST request. Expects a text payload by default.
    pub fn post(&self, endpoint: &str) -> RequestBuilder<'_> {
        self.request(Method::POST, endpoint)
    }

    /// PUT request. Expects a text payload by default.
    pub fn put(&self, endpoint: &str) -> RequestBuilder<'_> {
        self.request(Method::PUT, endpoint)
    }

    /// PATCH request. Expects a text payload by default.
    pub fn patch(&self, endpoint: &str) -> RequestBuilder<'_> {
        self.request(Method::PATCH, endpoint)
    }

    /// DELETE request. Expects a text payload by default.
    pub fn delete(&self, endpoint: &str) -> RequestBuilder<'_> {
        self.request(Method::DELETE, endpoint)
    }

    /// Request with an arbitrary method. GET defaults to a JSON payload,
    /// every other method to text; override with
    /// [`RequestBuilder::expect_json`] or [`RequestBuilder::expect_text`].
    pub fn request(&self, method: Method, endpoint: &str) -> RequestBuilder<'_> {
        let expect = if method == Method::GET {
            Expect::Json
        } else {
            Expect::Text
        };
        RequestBuilder {
            adapter: self,
            method,
            endpoint: endpoint.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            timeout: None,
            graceful: false,
            expect,
        }
    }
}

/// Builder for [`RestAdapter`].
pub struct AdapterBuilder {
    hostname: String,
    scheme: Scheme,
    api_version: String,
    endpoint_prefix: Option<String>,
    api_key: Option<String>,
    azure_api: bool,
    jwt_token: Option<String>,
    headers: Vec<(String, String)>,
    timeout: Duration,
    verify_tls: bool,
}

impl AdapterBuilder {
    /// Sets the URL scheme. Defaults to HTTPS.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the API version segment (e.g. `"v2"`). Defaults to `"v1"`.
    pub fn with_api_version(mut self, api_version: &str) -> Self {
        self.api_version = api_version.to_string();
        self
    }

    /// Sets a path prefix appended after the version segment. May contain
    /// slashes (e.g. `"users/admin"`).
    pub fn with_endpoint_prefix(mut self, endpoint_prefix: &str) -> Self {
        self.endpoint_prefix = Some(endpoint_prefix.to_string());
        self
    }

    /// Sets an API key, sent as the `x-api-key` header on every request.
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Also sends the API key as `Ocp-Apim-Subscription-Key`, as Azure API
    /// Management expects.
    pub fn with_azure_api(mut self, azure_api: bool) -> Self {
        self.azure_api = azure_api;
        self
    }

    /// Sets a JWT, sent as `Authorization: Bearer <token>` on every request.
    pub fn with_jwt_token(mut self, jwt_token: &str) -> Self {
        self.jwt_token = Some(jwt_token.to_string());
        self
    }

    /// Adds a default header sent on every request.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets the client-wide request timeout. Defaults to 30 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables TLS certificate verification. Disabling delegates
    /// to `reqwest`'s `danger_accept_invalid_certs`.
    pub fn with_tls_verification(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Validates the configuration and builds the adapter.
    pub fn build(self) -> Result<RestAdapter, Error> {
        if self.hostname.is_empty() {
            return Err(Error::InvalidRequest("hostname cannot be empty".to_string()));
        }
        if self.api_version.is_empty() {
            return Err(Error::InvalidRequest(
                "api_version cannot be empty".to_string(),
            ));
        }

        let mut path_segments = vec![self.api_version.as_str()];
        if let Some(prefix) = self.endpoint_prefix.as_deref() {
            path_segments.push(prefix);
        }
        let base = format!(
            "{}://{}/{}",
            self.scheme,
            self.hostname,
            toolkit::join_endpoints(&path_segments)
        );
        let base_url = Url::parse(&base).map_err(|e| {
            tracing::error!("invalid base URL {:?}: {}", base, e);
            Error::InvalidRequest(format!("invalid base URL {base:?}: {e}"))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &self.api_key {
            let value = header_value(api_key)?;
            if self.azure_api {
                headers.insert("Ocp-Apim-Subscription-Key", value.clone());
            }
            headers.insert("x-api-key", value);
        }
        if let Some(jwt_token) = &self.jwt_token {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {jwt_token}"))?);
        }
        for (name, value) in &self.headers {
            headers.insert(header_name(name)?, header_value(value)?);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .danger_accept_invalid_certs(!self.verify_tls)
            .build()
            .map_err(|e| {
                tracing::error!("failed to build HTTP client: {}", e);
                Error::Request(e)
            })?;

        Ok(RestAdapter { client, base_url })
    }
}

/// Expected payload kind for a response body.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Expect {
    Json,
    Text,
}

/// A single request under construction. Created by the verb methods on
/// [`RestAdapter`], consumed by [`RequestBuilder::send`].
pub struct RequestBuilder<'a> {
    adapter: &'a RestAdapter,
    method: Method,
    endpoint: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<serde_json::Result<serde_json::Value>>,
    timeout: Option<Duration>,
    graceful: bool,
    expect: Expect,
}

impl RequestBuilder<'_> {
    /// Appends a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Sets the JSON request body. Serialization errors surface from
    /// [`send`](Self::send) as [`Error::InvalidRequest`].
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        self.body = Some(serde_json::to_value(body));
        self
    }

    /// Adds a header to this request only.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Overrides the adapter-wide timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// With `graceful` set, non-success statuses are returned as a normal
    /// [`RestResponse`] instead of [`Error::Status`].
    pub fn graceful(mut self, graceful: bool) -> Self {
        self.graceful = graceful;
        self
    }

    /// Expect a JSON payload; parse failures become [`Error::Response`].
    pub fn expect_json(mut self) -> Self {
        self.expect = Expect::Json;
        self
    }

    /// Expect a plain text payload.
    pub fn expect_text(mut self) -> Self {
        self.expect = Expect::Text;
        self
    }

    /// Dispatches the request and maps the outcome.
    ///
    /// Transport timeouts become [`Error::Timeout`], other transport
    /// failures [`Error::Request`]. A non-success status becomes
    /// [`Error::Status`] unless `graceful` is set. A payload expected to be
    /// JSON that fails to parse becomes [`Error::Response`].
    pub async fn send(self) -> RestResult {
        let body = match self.body {
            None => None,
            Some(Ok(value)) => Some(value),
            Some(Err(e)) => {
                return Err(Error::InvalidRequest(format!(
                    "failed to serialize request body: {e}"
                )))
            }
        };

        let joined = toolkit::join_endpoints(&[self.adapter.base_url.as_str(), &self.endpoint]);
        let mut url = Url::parse(&joined).map_err(|e| {
            tracing::error!("invalid request URL {:?}: {}", joined, e);
            Error::InvalidRequest(format!("invalid request URL {joined:?}: {e}"))
        })?;
        for (key, value) in &self.query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let mut request = self.adapter.client.request(self.method.clone(), url.clone());
        for (name, value) in &self.headers {
            request = request.header(header_name(name)?, header_value(value)?);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        tracing::debug!("{} {}", self.method, url);
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let message = status.canonical_reason().unwrap_or_default().to_string();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() && !self.graceful {
            let snippet = truncate_body(&text);
            tracing::error!("request failed with status {}: {}", status, snippet);
            return Err(Error::Status {
                status: status.as_u16(),
                message,
                body: snippet,
            });
        }

        let data = match self.expect {
            Expect::Json => {
                let value = serde_json::from_str(&text).map_err(|e| {
                    tracing::error!("bad JSON in response: {} | body: {}", e, truncate_body(&text));
                    Error::Response(e)
                })?;
                Payload::Json(value)
            }
            Expect::Text => Payload::Text(text),
        };

        Ok(RestResponse {
            status_code: status.as_u16(),
            message,
            data,
        })
    }
}

/// Normalized response: status code, reason phrase, and parsed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// HTTP reason phrase (e.g. `"OK"`, `"Not Found"`).
    pub message: String,
    /// Parsed payload.
    pub data: Payload,
}

/// Response payload, parsed according to the request's expectation.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Parsed JSON document.
    Json(serde_json::Value),
    /// Raw body text.
    Text(String),
}

impl RestResponse {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// The payload as JSON, if it was parsed as such.
    pub fn json(&self) -> Option<&serde_json::Value> {
        match &self.data {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    /// The payload as text, if it was kept as such.
    pub fn text(&self) -> Option<&str> {
        match &self.data {
            Payload::Json(_) => None,
            Payload::Text(text) => Some(text),
        }
    }

    /// Deserializes the payload into a typed model. Text payloads are parsed
    /// as JSON first.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, Error> {
        match &self.data {
            Payload::Json(value) => {
                serde_json::from_value(value.clone()).map_err(Error::Response)
            }
            Payload::Text(text) => serde_json::from_str(text).map_err(Error::Response),
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        tracing::error!("request timed out: {}", e);
        Error::Timeout(e)
    } else {
        tracing::error!("request failed: {}", e);
        Error::Request(e)
    }
}

fn header_name(name: &str) -> Result<HeaderName, Error> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::InvalidRequest(format!("invalid header name {name:?}: {e}")))
}

fn header_value(value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::InvalidRequest(format!("invalid header value: {e}")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_minimal() {
        let adapter = RestAdapter::new("api.example.com").unwrap();
        assert_eq!(adapter.base_url().as_str(), "https://api.example.com/v1");
    }

    #[test]
    fn base_url_with_version_scheme_and_prefix() {
        let adapter = RestAdapter::builder("api.example.com")
            .with_api_version("v2")
            .with_endpoint_prefix("users/admin")
            .with_scheme(Scheme::Http)
            .build()
            .unwrap();
        assert_eq!(
            adapter.base_url().as_str(),
            "http://api.example.com/v2/users/admin"
        );
    }

    #[test]
    fn base_url_with_prefix_only() {
        let adapter = RestAdapter::builder("api.example.com")
            .with_endpoint_prefix("users")
            .build()
            .unwrap();
        assert_eq!(adapter.base_url().as_str(), "https://api.example.com/v1/users");
    }

    #[test]
    fn empty_hostname_is_rejected() {
        let err = RestAdapter::new("").unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(err.to_string().contains("hostname cannot be empty"));
    }

    #[test]
    fn empty_api_version_is_rejected() {
        let err = RestAdapter::builder("api.example.com")
            .with_api_version("")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(err.to_string().contains("api_version cannot be empty"));
    }

    #[test]
    fn hostname_may_carry_a_port() {
        let adapter = RestAdapter::builder("localhost:8080")
            .with_scheme(Scheme::Http)
            .build()
            .unwrap();
        assert_eq!(adapter.base_url().as_str(), "http://localhost:8080/v1");
    }

    #[test]
    fn invalid_default_header_is_rejected() {
        let err = RestAdapter::builder("api.example.com")
            .with_header("bad header name", "value")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "测".repeat(1000);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() < body.len());
    }
}
