//! Built-in JSON deserialization.

use serde::de::DeserializeOwned;

use crate::error::MaterializationError;
use crate::transport::{RawResponse, ResponseBody};

/// Decodes a JSON value from a raw response body.
///
/// The body must have been read as text (the default response reader);
/// any other representation is rejected before a parser runs. Typical use
/// is delegating a `deserialize` capability to it:
///
/// ```rust,ignore
/// fn deserialize(
///     self,
///     _request: &RequestParts,
///     raw: &RawResponse,
/// ) -> Result<Self, MaterializationError> {
///     json::decode(raw)
/// }
/// ```
///
/// ## Errors
///
/// - [`MaterializationError::NonTextBody`] when the body was read as
///   bytes or discarded.
/// - [`MaterializationError::Json`] when the text is not valid JSON for
///   `T`.
pub fn decode<T: DeserializeOwned>(raw: &RawResponse) -> Result<T, MaterializationError> {
    match raw.body() {
        ResponseBody::Text(text) => Ok(serde_json::from_str(text)?),
        other => Err(MaterializationError::NonTextBody {
            actual: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Greeting {
        message: String,
    }

    #[test]
    fn test_decode_parses_text_body() {
        let raw = RawResponse::new(
            200,
            ResponseBody::Text(r#"{"message":"hello"}"#.to_string()),
        );
        let greeting: Greeting = decode(&raw).unwrap();
        assert_eq!(greeting.message, "hello");
    }

    #[test]
    fn test_decode_rejects_bytes_body() {
        let raw = RawResponse::new(200, ResponseBody::Bytes(Bytes::from_static(b"{}")));
        let error = decode::<Greeting>(&raw).unwrap_err();
        assert_eq!(error, MaterializationError::NonTextBody { actual: "bytes" });
    }

    #[test]
    fn test_decode_rejects_discarded_body() {
        let raw = RawResponse::new(200, ResponseBody::Empty);
        let error = decode::<Greeting>(&raw).unwrap_err();
        assert_eq!(error, MaterializationError::NonTextBody { actual: "empty" });
    }

    #[test]
    fn test_decode_reports_malformed_json() {
        let raw = RawResponse::new(200, ResponseBody::Text("{oops".to_string()));
        let error = decode::<Greeting>(&raw).unwrap_err();
        assert!(matches!(error, MaterializationError::Json(_)));
    }
}
