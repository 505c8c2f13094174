//! Chainable builder for issuing single HTTP requests.
//!
//! Configure a request through chained calls, execute it once, then read the
//! outcome back from the same builder:
//!
//! ```no_run
//! use fluent_http::{Context, HttpClient, Method};
//!
//! # async fn run() -> fluent_http::Result<()> {
//! let mut client = HttpClient::new();
//! let body = client
//!     .with_https()
//!     .with_host("example.com")
//!     .with_url("/search")
//!     .with_method(Method::GET)
//!     .add_url_param("q", "rust")
//!     .with_content_type_json()
//!     .execute(&Context::new())
//!     .await
//!     .resp_map()?;
//! # let _ = body;
//! # Ok(())
//! # }
//! ```
//!
//! Configuration is never validated while it is being set. Every check runs
//! when [`HttpClient::execute`] is called, and every failure is stored on the
//! builder rather than returned, so the chain always reaches the accessor.

pub mod network;

pub use network::{
    BoxError, ClientOption, Context, Error, HttpClient, Method, Phase, ReqwestTransport, Request,
    Result, Transport, TransportConfig, TransportResponse, HEADER_AUTHORIZATION,
    HEADER_CONTENT_TYPE,
};
