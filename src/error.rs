use crate::bounded::BoxError;
use crate::transport::FailedRequest;

use std::fmt;

/// The error type returned by transports and request helpers.
///
/// Every failure is returned to the immediate caller. Nothing in this
/// crate retries or recovers.
#[derive(Debug)]
pub struct Error(ErrorKind);

#[derive(Debug)]
enum ErrorKind {
    Transport(BoxError),
    Rejected(FailedRequest),
    #[cfg(feature = "json")]
    Json(serde_json::Error),
    InvalidHeader(http::Error),
    InvalidUri(http::Error),
    Query(serde_urlencoded::de::Error),
    Body(BoxError),
    Overflow(usize),
}

impl Error {
    /// Create an error from a failure reported by a transport.
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Error(ErrorKind::Transport(err.into()))
    }

    pub(crate) fn body(err: impl Into<BoxError>) -> Self {
        Error(ErrorKind::Body(err.into()))
    }

    pub(crate) fn overflow(limit: usize) -> Self {
        Error(ErrorKind::Overflow(limit))
    }

    pub(crate) fn invalid_header(err: impl Into<http::Error>) -> Self {
        Error(ErrorKind::InvalidHeader(err.into()))
    }

    pub(crate) fn invalid_uri(err: impl Into<http::Error>) -> Self {
        Error(ErrorKind::InvalidUri(err.into()))
    }

    pub(crate) fn query(err: serde_urlencoded::de::Error) -> Self {
        Error(ErrorKind::Query(err))
    }

    /// Returns `true` if a response was rejected by a validated transport.
    pub fn is_rejected(&self) -> bool {
        matches!(self.0, ErrorKind::Rejected(_))
    }

    /// Returns the rejected request if this error was caused by one.
    pub fn rejected(&self) -> Option<&FailedRequest> {
        match &self.0 {
            ErrorKind::Rejected(failed) => Some(failed),
            _ => None,
        }
    }

    /// Recover the rejected request, or give the error back.
    pub fn into_rejected(self) -> Result<FailedRequest, Self> {
        match self.0 {
            ErrorKind::Rejected(failed) => Ok(failed),
            kind => Err(Error(kind)),
        }
    }

    /// Returns `true` if the error came from encoding JSON.
    #[cfg(feature = "json")]
    pub fn is_json(&self) -> bool {
        matches!(self.0, ErrorKind::Json(_))
    }

    /// Returns `true` if a body was larger than the configured limit.
    pub fn is_overflow(&self) -> bool {
        matches!(self.0, ErrorKind::Overflow(_))
    }

    /// Returns `true` if the injected transport failed.
    pub fn is_transport(&self) -> bool {
        matches!(self.0, ErrorKind::Transport(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ErrorKind::Transport(err) => write!(f, "transport error: {}", err),
            ErrorKind::Rejected(failed) => fmt::Display::fmt(failed, f),
            #[cfg(feature = "json")]
            ErrorKind::Json(err) => write!(f, "failed to serialize JSON: {}", err),
            ErrorKind::InvalidHeader(err) => write!(f, "invalid header: {}", err),
            ErrorKind::InvalidUri(err) => write!(f, "invalid uri: {}", err),
            ErrorKind::Query(err) => write!(f, "failed to parse query string: {}", err),
            ErrorKind::Body(err) => write!(f, "failed to read body: {}", err),
            ErrorKind::Overflow(limit) => write!(f, "body larger than limit of {} bytes", limit),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            ErrorKind::Transport(err) | ErrorKind::Body(err) => Some(&**err),
            #[cfg(feature = "json")]
            ErrorKind::Json(err) => Some(err),
            ErrorKind::InvalidHeader(err) | ErrorKind::InvalidUri(err) => Some(err),
            ErrorKind::Query(err) => Some(err),
            ErrorKind::Rejected(_) | ErrorKind::Overflow(_) => None,
        }
    }
}

impl From<FailedRequest> for Error {
    fn from(failed: FailedRequest) -> Self {
        Error(ErrorKind::Rejected(failed))
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error(ErrorKind::Json(err))
    }
}
