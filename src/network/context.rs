//! Cancellation and deadline carried into a single execution.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::network::error::{Error, Result};

/// Context for one [`HttpClient::execute`](crate::HttpClient::execute) call.
///
/// Sending the request and reading its body both race against the
/// cancellation token and the optional deadline; whichever fires first
/// aborts the in-flight work.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Cooperative cancellation token.
    pub cancellation: CancellationToken,
    /// Point in time after which the execution is abandoned.
    pub deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default cancellation token with the provided one.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Abandon the execution at `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the deadline to `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Whether the cancellation token has fired.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Drive `fut` to completion unless the context fires first.
    ///
    /// Cancellation is checked ahead of the deadline, and both ahead of the
    /// future, so an already-cancelled context never polls `fut`.
    pub(crate) async fn run<F>(&self, fut: F) -> Result<F::Output>
    where
        F: Future,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(Error::Cancelled),
            _ = deadline => Err(Error::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }
}
