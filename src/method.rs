//! HTTP method types for request descriptors.

use strum::{Display, EnumString};

use crate::error::TransportError;

/// HTTP methods for API requests.
///
/// Covers the standard verbs plus an escape hatch for APIs that use
/// non-standard ones. Parsing falls back to [`RequestMethod::Custom`] for
/// anything outside the standard set, so `parse` never fails.
///
/// ## Examples
///
/// ```rust
/// use wrapi::RequestMethod;
///
/// let method = RequestMethod::Get;
/// assert!(!method.has_body());
/// assert!(method.is_idempotent());
///
/// // Parse from string
/// let parsed: RequestMethod = "POST".parse().unwrap();
/// assert_eq!(parsed, RequestMethod::Post);
///
/// // Unknown verbs become custom methods
/// let custom: RequestMethod = "FETCH".parse().unwrap();
/// assert_eq!(custom, RequestMethod::Custom("FETCH".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RequestMethod {
    /// HTTP GET - Retrieve a resource.
    Get,
    /// HTTP POST - Create a resource or trigger an action.
    Post,
    /// HTTP PUT - Replace a resource entirely.
    Put,
    /// HTTP PATCH - Partially update a resource.
    Patch,
    /// HTTP DELETE - Remove a resource.
    Delete,
    /// HTTP HEAD - Retrieve headers only.
    Head,
    /// HTTP OPTIONS - Query supported methods.
    Options,
    /// HTTP TRACE - Echo the request for debugging.
    Trace,
    /// A non-standard verb, sent exactly as given.
    #[strum(default)]
    Custom(String),
}

impl RequestMethod {
    /// Returns `true` if this method typically has a request body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns `true` if this method is idempotent.
    ///
    /// Custom verbs are treated as non-idempotent since nothing is known
    /// about them.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch | Self::Custom(_))
    }

    /// Returns `true` if this method is safe (read-only).
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options | Self::Trace)
    }

    /// Converts to the equivalent `reqwest::Method`.
    ///
    /// ## Errors
    ///
    /// Fails with [`TransportError::InvalidMethod`] when a custom verb is
    /// not a valid HTTP method token.
    pub fn to_reqwest(&self) -> Result<reqwest::Method, TransportError> {
        match self {
            Self::Get => Ok(reqwest::Method::GET),
            Self::Post => Ok(reqwest::Method::POST),
            Self::Put => Ok(reqwest::Method::PUT),
            Self::Patch => Ok(reqwest::Method::PATCH),
            Self::Delete => Ok(reqwest::Method::DELETE),
            Self::Head => Ok(reqwest::Method::HEAD),
            Self::Options => Ok(reqwest::Method::OPTIONS),
            Self::Trace => Ok(reqwest::Method::TRACE),
            Self::Custom(name) => reqwest::Method::from_bytes(name.as_bytes()).map_err(|_| {
                TransportError::InvalidMethod { name: name.clone() }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_uppercase() {
        assert_eq!(RequestMethod::Get.to_string(), "GET");
        assert_eq!(RequestMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_custom_display_is_verbatim() {
        let method = RequestMethod::Custom("Fetch".to_string());
        assert_eq!(method.to_string(), "Fetch");
    }

    #[test]
    fn test_parse_standard_verbs() {
        let parsed: RequestMethod = "PUT".parse().unwrap();
        assert_eq!(parsed, RequestMethod::Put);
    }

    #[test]
    fn test_parse_unknown_verb_falls_back_to_custom() {
        let parsed: RequestMethod = "PURGE".parse().unwrap();
        assert_eq!(parsed, RequestMethod::Custom("PURGE".to_string()));
    }

    #[test]
    fn test_has_body() {
        assert!(!RequestMethod::Get.has_body());
        assert!(RequestMethod::Post.has_body());
        assert!(RequestMethod::Put.has_body());
        assert!(RequestMethod::Patch.has_body());
        assert!(!RequestMethod::Custom("PURGE".to_string()).has_body());
    }

    #[test]
    fn test_is_idempotent() {
        assert!(RequestMethod::Get.is_idempotent());
        assert!(!RequestMethod::Post.is_idempotent());
        assert!(RequestMethod::Put.is_idempotent());
        assert!(!RequestMethod::Custom("PURGE".to_string()).is_idempotent());
    }

    #[test]
    fn test_is_safe() {
        assert!(RequestMethod::Get.is_safe());
        assert!(RequestMethod::Head.is_safe());
        assert!(!RequestMethod::Post.is_safe());
        assert!(!RequestMethod::Custom("PURGE".to_string()).is_safe());
    }

    #[test]
    fn test_to_reqwest() {
        assert_eq!(RequestMethod::Get.to_reqwest().unwrap(), reqwest::Method::GET);
        let custom = RequestMethod::Custom("PURGE".to_string());
        assert_eq!(custom.to_reqwest().unwrap().as_str(), "PURGE");
    }

    #[test]
    fn test_to_reqwest_rejects_invalid_token() {
        let bad = RequestMethod::Custom("NOT A TOKEN".to_string());
        assert!(matches!(
            bad.to_reqwest(),
            Err(TransportError::InvalidMethod { .. })
        ));
    }
}
