//! Chainable HTTP client for one-shot requests
//! Accumulates configuration, executes once, and keeps the outcome for the caller

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::network::context::Context;
use crate::network::error::{Error, Phase, Result};
use crate::network::method::Method;
use crate::network::request::Request;
use crate::network::response::TransportResponse;
use crate::network::transport::{ReqwestTransport, Transport};

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

const CONTENT_TYPE_JSON: &str = "application/json";

/// Initialization callback applied by the factories, in order.
pub type ClientOption<T = ReqwestTransport> = Box<dyn FnOnce(&mut HttpClient<T>)>;

/// Builder and executor for a single HTTP request.
///
/// Every `with_*`/`add_*` call overwrites or merges configuration and returns
/// the same builder, so calls compose in any order. Nothing is validated until
/// [`execute`](HttpClient::execute), which stores either the response payload
/// or an error; read them back with [`resp_bytes`](HttpClient::resp_bytes),
/// [`resp_map`](HttpClient::resp_map) or [`error`](HttpClient::error).
///
/// A builder is meant for one owner at a time. Clone a fully configured one
/// to run several requests concurrently.
#[derive(Debug, Clone)]
pub struct HttpClient<T = ReqwestTransport> {
    transport: T,
    method: String,
    is_https: bool,
    host: String,
    url: String,
    headers: HashMap<String, String>,
    url_params: HashMap<String, String>,
    // Serialization failures are only reported by `execute`.
    body: std::result::Result<Value, Arc<serde_json::Error>>,
    resp: Option<Vec<u8>>,
    err: Option<Error>,
}

impl HttpClient {
    /// Create an empty builder using the default reqwest transport
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::default())
    }

    /// Create a builder using the default transport, then apply `options`
    pub fn with_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ClientOption>,
    {
        Self::with_transport_and_options(ReqwestTransport::default(), options)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HttpClient<T> {
    /// Create an empty builder that dispatches through `transport`.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            method: String::new(),
            is_https: false,
            host: String::new(),
            url: String::new(),
            headers: HashMap::new(),
            url_params: HashMap::new(),
            body: Ok(Value::Null),
            resp: None,
            err: None,
        }
    }

    pub fn with_transport_and_options<I>(transport: T, options: I) -> Self
    where
        I: IntoIterator<Item = ClientOption<T>>,
    {
        let mut client = Self::with_transport(transport);
        for option in options {
            option(&mut client);
        }
        client
    }

    /// Set the method. Accepts a [`Method`] or any name; unsupported names
    /// are reported by [`execute`](HttpClient::execute).
    pub fn with_method(&mut self, method: impl AsRef<str>) -> &mut Self {
        self.method = method.as_ref().to_string();
        self
    }

    /// Set the host. A leading `https://` or `http://` is discarded at
    /// execution time; the scheme only comes from [`with_https`](Self::with_https).
    pub fn with_host(&mut self, host: impl Into<String>) -> &mut Self {
        self.host = host.into();
        self
    }

    /// Set the path to request on the host.
    pub fn with_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = url.into();
        self
    }

    /// Send the request over HTTPS.
    pub fn with_https(&mut self) -> &mut Self {
        self.is_https = true;
        self
    }

    /// Send the request over plain HTTP (the default).
    pub fn with_http(&mut self) -> &mut Self {
        self.is_https = false;
        self
    }

    /// Add a header, replacing any previous value for `key`.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Replace every header added so far with `headers`.
    pub fn with_headers(&mut self, headers: HashMap<String, String>) -> &mut Self {
        self.headers = headers;
        self
    }

    /// Set `Content-Type: application/json`.
    pub fn with_content_type_json(&mut self) -> &mut Self {
        self.add_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
    }

    /// Set the `Authorization` header to `auth_info`.
    pub fn with_authorization(&mut self, auth_info: impl Into<String>) -> &mut Self {
        self.add_header(HEADER_AUTHORIZATION, auth_info)
    }

    /// Add a query parameter, replacing any previous value for `key`.
    pub fn add_url_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.url_params.insert(key.into(), value.into());
        self
    }

    /// Replace every query parameter added so far with `params`.
    pub fn with_url_params(&mut self, params: HashMap<String, String>) -> &mut Self {
        self.url_params = params;
        self
    }

    /// Set the value sent as the JSON request body.
    pub fn with_body<B>(&mut self, body: &B) -> &mut Self
    where
        B: Serialize + ?Sized,
    {
        self.body = serde_json::to_value(body).map_err(Arc::new);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_https(&self) -> bool {
        self.is_https
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn url_params(&self) -> &HashMap<String, String> {
        &self.url_params
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The payload of the last execution, or its error.
    ///
    /// Before any execution this is an empty payload.
    pub fn resp_bytes(&self) -> Result<&[u8]> {
        if let Some(err) = &self.err {
            return Err(err.clone());
        }

        Ok(self.resp.as_deref().unwrap_or_default())
    }

    /// The payload of the last execution decoded as a JSON object.
    pub fn resp_map(&self) -> Result<Map<String, Value>> {
        self.resp_json()
    }

    /// The payload of the last execution decoded as `D`.
    pub fn resp_json<D>(&self) -> Result<D>
    where
        D: DeserializeOwned,
    {
        serde_json::from_slice(self.resp_bytes()?).map_err(|e| Error::Decode(Arc::new(e)))
    }

    /// The error of the last execution, if it failed.
    pub fn error(&self) -> Option<&Error> {
        self.err.as_ref()
    }

    /// Check the configuration, in order: method, host, path.
    fn validate(&self) -> Result<Method> {
        let method = self.method.parse::<Method>()?;

        if self.host.is_empty() {
            return Err(Error::HostEmpty);
        }

        if self.url.is_empty() {
            return Err(Error::UrlEmpty);
        }

        Ok(method)
    }

    /// Validate, normalize and assemble the request to send.
    fn build_request(&self) -> Result<Request> {
        let method = self.validate()?;

        // A host made only of a scheme prefix would let the path's first
        // segment be parsed as the host.
        let host = normalize_host(&self.host);
        if host.is_empty() {
            return Err(Error::transport(Phase::Construct, "no host in request URL"));
        }

        let scheme = if self.is_https { "https" } else { "http" };
        let url = format!("{}://{}{}", scheme, host, normalize_path(&self.url));
        log::debug!("🔗 Assembled URL: {}", url);

        let body = match &self.body {
            Ok(value) => serde_json::to_vec(value).map_err(|e| Error::Serialize(Arc::new(e)))?,
            Err(e) => return Err(Error::Serialize(Arc::clone(e))),
        };

        Ok(Request::new(method, &url)?
            .with_query(&self.url_params)
            .with_headers(&self.headers)?
            .with_body(body))
    }
}

impl<T: Transport> HttpClient<T> {
    /// Execute the configured request once.
    ///
    /// Clears the previous outcome, then stores the response payload on
    /// success or the error on failure. Never fails itself; check the outcome
    /// through the accessors. Any status other than `200 OK` is an error and
    /// its body is not read.
    pub async fn execute(&mut self, ctx: &Context) -> &mut Self {
        self.err = None;
        self.resp = None;

        let outcome = self.round_trip(ctx).await;
        match outcome {
            Ok(body) => self.resp = Some(body),
            Err(err) => {
                log::warn!("⚠️ Request failed: {}", err);
                self.err = Some(err);
            }
        }

        self
    }

    async fn round_trip(&self, ctx: &Context) -> Result<Vec<u8>> {
        let request = self.build_request()?;

        log::info!("🌐 {} request to: {}", request.method, request.url);

        let response = ctx
            .run(self.transport.send(request))
            .await?
            .map_err(|e| Error::transport(Phase::Send, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Status(status));
        }

        let body = ctx
            .run(response.bytes())
            .await?
            .map_err(|e| Error::transport(Phase::Read, e))?;

        log::info!("✅ Response received: {} bytes, status: {}", body.len(), status);

        Ok(body)
    }
}

/// Drop one `https://` or `http://` prefix.
fn normalize_host(host: &str) -> &str {
    host.strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host)
}

/// Exactly one leading `/`, no trailing `/`.
fn normalize_path(path: &str) -> String {
    let path = format!("/{}", path.trim_start_matches('/'));
    path.trim_end_matches('/').to_string()
}
