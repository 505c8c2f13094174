//! Transport-ready HTTP request

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::network::error::{Error, Phase, Result};
use crate::network::method::Method;

/// Represents a fully assembled HTTP request, as handed to a
/// [`Transport`](crate::Transport).
#[derive(Debug, Clone)]
pub struct Request {
    pub method: reqwest::Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Request {
    /// Create a request with no headers and an empty body.
    ///
    /// Fails in the construction phase if `url` does not parse.
    pub fn new(method: Method, url: &str) -> Result<Self> {
        let method = reqwest::Method::from(method);
        let url = Url::parse(url).map_err(|e| Error::transport(Phase::Construct, e))?;

        Ok(Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: Vec::new(),
        })
    }

    /// Append `params` to the query string, form-encoded, sorted by key.
    pub fn with_query(mut self, params: &HashMap<String, String>) -> Self {
        if params.is_empty() {
            return self;
        }

        let mut pairs: Vec<(&String, &String)> = params.iter().collect();
        pairs.sort();
        self.url.query_pairs_mut().extend_pairs(pairs);
        self
    }

    /// Set a header, replacing any previous value for the same name.
    pub fn with_header(mut self, key: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| Error::transport(Phase::Construct, e))?;
        let value =
            HeaderValue::from_str(value).map_err(|e| Error::transport(Phase::Construct, e))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Set every header of `headers`.
    pub fn with_headers(self, headers: &HashMap<String, String>) -> Result<Self> {
        headers
            .iter()
            .try_fold(self, |request, (key, value)| request.with_header(key, value))
    }

    /// Set the request body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }
}
