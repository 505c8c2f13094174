//! The HTTP transport requests are dispatched through.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;

use crate::network::error::{BoxError, Error, Phase, Result};
use crate::network::request::Request;
use crate::network::response::TransportResponse;

/// Sends one fully assembled request and returns the response head.
///
/// Implementations may pool or reuse connections as they see fit.
pub trait Transport: Send + Sync {
    /// The associated response type returned by this transport.
    type Response: TransportResponse;

    /// Dispatches `request` once.
    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = std::result::Result<Self::Response, BoxError>> + Send;
}

/// Configuration for the default transport
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub user_agent: String,
    pub max_redirects: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("fluent-http/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
        }
    }
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with custom configuration
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| Error::transport(Phase::Construct, e))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| Error::ClientBuild(Arc::new(e)))?;

        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    type Response = reqwest::Response;

    async fn send(&self, request: Request) -> std::result::Result<Self::Response, BoxError> {
        let Request {
            method,
            url,
            headers,
            body,
        } = request;

        let response = self
            .client
            .request(method, url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        Ok(response)
    }
}
