use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use thiserror::Error;

/// Boxed error returned by [`Transport`](crate::Transport) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The step of an execution during which a transport-level failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Turning the validated configuration into a sendable request.
    Construct,
    /// Dispatching the request and waiting for the response head.
    Send,
    /// Reading the response body.
    Read,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Construct => "request construction",
            Phase::Send => "send",
            Phase::Read => "read response",
        })
    }
}

/// An error that happened while validating, building, sending, or reading a
/// request, or while decoding its payload.
///
/// Errors are stored on the [`HttpClient`](crate::HttpClient) and handed out
/// by every accessor, hence `Clone`; underlying sources are shared.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The configured method is not one of the supported ones (or was never
    /// set, in which case the name is empty).
    #[error("method `{0}` has not been supported")]
    MethodNotSupported(String),

    /// No host was configured.
    #[error("host is empty")]
    HostEmpty,

    /// No path was configured.
    #[error("url can not be empty")]
    UrlEmpty,

    /// The body could not be serialized as JSON.
    #[error("failed to serialize request body")]
    Serialize(#[source] Arc<serde_json::Error>),

    /// A failure reported while building, sending, or reading a request.
    #[error("{phase} failed")]
    Transport {
        phase: Phase,
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The response status was anything but `200 OK`.
    #[error("response status code not 200, is {0}")]
    Status(StatusCode),

    /// The caller's context was cancelled before the execution completed.
    #[error("request cancelled")]
    Cancelled,

    /// The caller's context deadline passed before the execution completed.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The payload is not valid JSON for the requested shape.
    #[error("failed to decode response body")]
    Decode(#[source] Arc<serde_json::Error>),

    /// The default transport could not be built from its configuration.
    #[error("failed to build HTTP client")]
    ClientBuild(#[source] Arc<reqwest::Error>),
}

impl Error {
    pub(crate) fn transport<E>(phase: Phase, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Transport {
            phase,
            source: Arc::from(source.into()),
        }
    }

    /// Whether the error was raised before any I/O was attempted.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::MethodNotSupported(_) | Error::HostEmpty | Error::UrlEmpty
        )
    }

    /// The response status carried by [`Error::Status`].
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status(status) => Some(*status),
            _ => None,
        }
    }
}

/// A result which error type is always an [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;
