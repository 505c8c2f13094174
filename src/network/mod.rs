pub mod context;
pub mod error;
pub mod http_client;
pub mod method;
pub mod request;
pub mod response;
pub mod transport;

pub use context::Context;
pub use error::{BoxError, Error, Phase, Result};
pub use http_client::{ClientOption, HttpClient, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
pub use method::Method;
pub use request::Request;
pub use response::TransportResponse;
pub use transport::{ReqwestTransport, Transport, TransportConfig};
