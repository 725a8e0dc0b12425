//! Unresolved endpoint template errors.

use thiserror::Error;

/// A computed endpoint still contains `{` or `}` after substitution.
///
/// Raised before any transport activity and always propagated to the
/// caller directly, regardless of the API definition's rethrow policy:
/// an unresolved template is a programming error, not a send failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("computed endpoint contains unresolved path parameters: {endpoint}")]
pub struct UnresolvedTemplateError {
    /// The computed endpoint, with the leftover placeholders intact.
    pub endpoint: String,
}

impl UnresolvedTemplateError {
    /// Creates an error for the given computed endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_endpoint() {
        let error = UnresolvedTemplateError::new("/users/{id}");
        assert_eq!(
            format!("{}", error),
            "computed endpoint contains unresolved path parameters: /users/{id}"
        );
    }
}
