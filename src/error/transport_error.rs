//! Transport-level errors.

use thiserror::Error;

/// Errors produced while handing a request to the wire or reading the
/// response back.
///
/// Transport errors are always routed through the API definition's
/// `on_exception` hook before the rethrow policy decides whether the caller
/// sees them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The assembled base-URL + endpoint concatenation did not parse.
    #[error("invalid request URL `{url}`: {source}")]
    InvalidUrl {
        /// The string that failed to parse.
        url: String,
        /// The underlying parse failure.
        #[source]
        source: url::ParseError,
    },
    /// A custom verb was not a valid HTTP method token.
    #[error("invalid request method `{name}`")]
    InvalidMethod {
        /// The rejected verb.
        name: String,
    },
    /// Connection-level failure (refused, reset, DNS, TLS).
    #[error("connection error: {0}")]
    Connection(String),
    /// The request exceeded the API definition's timeout.
    #[error("request timed out")]
    Timeout,
    /// The scheduling unit running an async send died before reporting.
    #[error("request task interrupted")]
    Interrupted,
    /// The backend client could not be constructed.
    #[error("client build error: {0}")]
    Build(String),
    /// Any other backend failure.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else if err.is_builder() {
            TransportError::Build(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}
