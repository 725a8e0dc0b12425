//! Build-time validation errors.

use thiserror::Error;

/// Errors raised while validating a request descriptor at build time.
///
/// These are never subject to the exception-rethrow policy: a descriptor
/// that fails validation is never produced, so there is nothing to send.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No endpoint template was supplied.
    #[error("request endpoint is required")]
    MissingEndpoint,
    /// No HTTP method was supplied.
    #[error("request method is required")]
    MissingMethod,
    /// A path parameter id contains `{` or `}`.
    ///
    /// Ids are substituted as the literal text `{id}`; braces inside the id
    /// would make the placeholder ambiguous.
    #[error("path parameter id `{id}` must not contain '{{' or '}}'")]
    InvalidPathParameterId {
        /// The offending id.
        id: String,
    },
}
