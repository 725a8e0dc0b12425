//! Top-level error type.

use thiserror::Error;

use super::http_error::HttpError;
use super::materialization_error::MaterializationError;
use super::template_error::UnresolvedTemplateError;
use super::transport_error::TransportError;
use super::validation_error::ValidationError;

/// Umbrella error for every failure a send pipeline can produce.
///
/// Each arm is transparent: callers match on the concern they care about
/// and the display text comes straight from the underlying error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Descriptor validation failed at build time.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The computed endpoint still contained template placeholders.
    #[error(transparent)]
    UnresolvedTemplate(#[from] UnresolvedTemplateError),
    /// The transport layer failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The response could not be materialized into the declared type.
    #[error(transparent)]
    Materialization(#[from] MaterializationError),
}

impl ApiError {
    /// Wraps this error together with an HTTP status code.
    ///
    /// Convenience for callers (typically inside `on_exception` hooks) that
    /// prefer the single status-bearing [`HttpError`] object.
    pub fn with_status(self, status: i32) -> HttpError {
        HttpError::new(status, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_display() {
        let error = ApiError::from(TransportError::Timeout);
        assert_eq!(format!("{}", error), "request timed out");
    }

    #[test]
    fn test_from_validation() {
        let error: ApiError = ValidationError::MissingMethod.into();
        assert!(matches!(error, ApiError::Validation(_)));
    }
}
