//! Response materialization errors.

use thiserror::Error;

/// Errors raised while turning a raw transport response into the declared
/// response type.
///
/// Routed through `on_exception` and then subject to the rethrow policy,
/// exactly like transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterializationError {
    /// A capability required a text body but the response was read as
    /// something else.
    #[error("response body is not text ({actual})")]
    NonTextBody {
        /// What the body actually was (`bytes` or `empty`).
        actual: &'static str,
    },
    /// The body was text but did not deserialize as JSON.
    #[error("JSON deserialization failed: {0}")]
    Json(String),
    /// A custom deserialization capability rejected the response.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for MaterializationError {
    fn from(err: serde_json::Error) -> Self {
        MaterializationError::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_text_body_display() {
        let error = MaterializationError::NonTextBody { actual: "bytes" };
        assert_eq!(format!("{}", error), "response body is not text (bytes)");
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let error = MaterializationError::from(err);
        assert!(matches!(error, MaterializationError::Json(_)));
    }
}
