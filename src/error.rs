//! Error types for Dependency-Track API operations.

use std::fmt;

use thiserror::Error;

use crate::version::ServerVersion;

/// Errors that can occur during Dependency-Track API operations.
///
/// Every public operation fails with exactly one of these. The four kinds
/// that describe a request outcome are [`DtrackError::Version`],
/// [`DtrackError::Transport`], [`DtrackError::Http`] and
/// [`DtrackError::Decode`]; the rest are raised while configuring a client
/// or constructing a request, before anything is sent.
#[derive(Debug, Error)]
pub enum DtrackError {
    /// Configuration is missing or incomplete.
    #[error("Dependency-Track configuration required: {0}")]
    ConfigMissing(String),

    /// The connected server is too old for the requested operation.
    ///
    /// Raised before any endpoint-specific request is issued.
    #[error("operation requires server version {required} or newer, connected server is {actual}")]
    Version {
        required: ServerVersion,
        actual: ServerVersion,
    },

    /// Failure below the HTTP layer (connect, TLS, timeout, cancellation).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("Dependency-Track API error ({status}): {message}")]
    Http {
        kind: StatusKind,
        status: u16,
        message: String,
    },

    /// A successful response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request option rejected its input; nothing was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl DtrackError {
    /// The HTTP status, for errors returned by the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            DtrackError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The classified status kind, for errors returned by the server.
    pub fn kind(&self) -> Option<StatusKind> {
        match self {
            DtrackError::Http { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Whether the server reported the entity as missing.
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(StatusKind::NotFound)
    }

    /// Whether the request was aborted by its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, DtrackError::Transport(TransportError::Request(e)) if e.is_timeout())
    }

    /// Whether the request was aborted by a caller-supplied cancellation signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DtrackError::Transport(TransportError::Cancelled))
    }
}

impl From<reqwest::Error> for DtrackError {
    fn from(err: reqwest::Error) -> Self {
        DtrackError::Transport(TransportError::Request(err))
    }
}

/// Failures that happen before an HTTP status is available.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client failed to complete the exchange.
    #[error("{0}")]
    Request(#[source] reqwest::Error),

    /// The caller cancelled the request while it was in flight.
    #[error("request cancelled")]
    Cancelled,
}

/// Coarse classification of a non-2xx HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// 400
    BadRequest,
    /// 401 and 403
    Unauthorized,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// Any 5xx
    ServerError,
    /// Everything else
    Unknown,
}

impl StatusKind {
    /// Classify a raw status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => StatusKind::BadRequest,
            401 | 403 => StatusKind::Unauthorized,
            404 => StatusKind::NotFound,
            409 => StatusKind::Conflict,
            500..=599 => StatusKind::ServerError,
            _ => StatusKind::Unknown,
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusKind::BadRequest => "bad request",
            StatusKind::Unauthorized => "unauthorized",
            StatusKind::NotFound => "not found",
            StatusKind::Conflict => "conflict",
            StatusKind::ServerError => "server error",
            StatusKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Result type alias for Dependency-Track operations.
pub type Result<T> = core::result::Result<T, DtrackError>;
