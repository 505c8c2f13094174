//! HTTP response as seen by the executor

use std::future::Future;

use reqwest::StatusCode;

use crate::network::error::BoxError;

/// A response head whose body has not been read yet.
///
/// The executor checks [`status`](TransportResponse::status) first and only
/// reads the body of a `200 OK` response.
pub trait TransportResponse: Send {
    /// Returns the HTTP status code of the response.
    fn status(&self) -> StatusCode;

    /// Consumes the response and reads its whole body into memory.
    fn bytes(self) -> impl Future<Output = Result<Vec<u8>, BoxError>> + Send;
}

impl TransportResponse for reqwest::Response {
    fn status(&self) -> StatusCode {
        reqwest::Response::status(self)
    }

    async fn bytes(self) -> Result<Vec<u8>, BoxError> {
        let body = reqwest::Response::bytes(self).await?;
        Ok(body.to_vec())
    }
}
