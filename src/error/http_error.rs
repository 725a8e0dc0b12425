//! Status-bearing error wrapper.

use thiserror::Error;

use super::api_error::ApiError;

/// Status code meaning "no response was received".
pub const UNKNOWN_STATUS: i32 = -1;

/// An [`ApiError`] bundled with the HTTP status code in effect when it was
/// observed.
///
/// The pipeline itself never constructs this type; it exists for callers
/// that want a single error object carrying both the status and the cause,
/// typically assembled inside an `on_exception` hook. When the failure
/// happened before any response arrived, the status is [`UNKNOWN_STATUS`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP error ({status}): {source}")]
pub struct HttpError {
    status: i32,
    #[source]
    source: ApiError,
}

impl HttpError {
    /// Creates a wrapper with a known status code.
    pub fn new(status: i32, source: ApiError) -> Self {
        Self { status, source }
    }

    /// Creates a wrapper for a failure observed before any response.
    pub fn without_status(source: ApiError) -> Self {
        Self::new(UNKNOWN_STATUS, source)
    }

    /// The HTTP status code, or [`UNKNOWN_STATUS`].
    pub fn status(&self) -> i32 {
        self.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The underlying pipeline error.
    pub fn source_error(&self) -> &ApiError {
        &self.source
    }

    /// Unwraps back into the underlying pipeline error.
    pub fn into_source(self) -> ApiError {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    #[test]
    fn test_display_includes_status_and_cause() {
        let error = HttpError::new(503, TransportError::Timeout.into());
        assert_eq!(format!("{}", error), "HTTP error (503): request timed out");
    }

    #[test]
    fn test_is_success_bounds() {
        let cause = || ApiError::from(TransportError::Timeout);
        assert!(HttpError::new(200, cause()).is_success());
        assert!(HttpError::new(299, cause()).is_success());
        assert!(!HttpError::new(199, cause()).is_success());
        assert!(!HttpError::new(300, cause()).is_success());
        assert!(!HttpError::without_status(cause()).is_success());
    }

    #[test]
    fn test_without_status_uses_sentinel() {
        let error = HttpError::without_status(TransportError::Timeout.into());
        assert_eq!(error.status(), UNKNOWN_STATUS);
    }
}
