//! Value types carried by request descriptors.

use std::fmt;

use crate::error::ValidationError;

/// A named path parameter substituted into an endpoint template.
///
/// Substitution replaces every occurrence of the literal text `{id}` in the
/// template with the replacement. The id itself may not contain braces.
///
/// ## Examples
///
/// ```rust
/// use wrapi::PathParameter;
///
/// let param = PathParameter::new("user", "42").unwrap();
/// assert_eq!(param.placeholder(), "{user}");
/// assert_eq!(param.replacement(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathParameter {
    id: String,
    replacement: String,
}

impl PathParameter {
    /// Creates a path parameter from an id and its replacement text.
    ///
    /// ## Errors
    ///
    /// Fails with [`ValidationError::InvalidPathParameterId`] when the id
    /// contains `{` or `}`.
    pub fn new<I, R>(id: I, replacement: R) -> Result<Self, ValidationError>
    where
        I: Into<String>,
        R: Into<String>,
    {
        let id = id.into();
        if id.contains('{') || id.contains('}') {
            return Err(ValidationError::InvalidPathParameterId { id });
        }
        Ok(Self {
            id,
            replacement: replacement.into(),
        })
    }

    /// The parameter id, without braces.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The text substituted for the placeholder.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// The placeholder form this parameter replaces, `{id}`.
    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.id)
    }
}

impl fmt::Display for PathParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.id)
    }
}

/// A query-string parameter.
///
/// Rendered as `name=value`, appended to the computed endpoint joined by
/// `?` and `&`. Values pass through verbatim; callers pre-encode when the
/// value needs percent-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParameter {
    name: String,
    value: String,
}

impl QueryParameter {
    /// Creates a query parameter.
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter value, exactly as supplied.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for QueryParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// A request header.
///
/// Headers are sent in the order supplied and never deduplicated, so
/// repeated keys reach the wire as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Header {
    key: String,
    value: String,
}

impl Header {
    /// Creates a header.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a `Content-Type` header.
    pub fn content_type<V: Into<String>>(value: V) -> Self {
        Self::new("Content-Type", value)
    }

    /// The header key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The header value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_parameter_rejects_braces_in_id() {
        assert!(matches!(
            PathParameter::new("user{", "42"),
            Err(ValidationError::InvalidPathParameterId { .. })
        ));
        assert!(matches!(
            PathParameter::new("}user", "42"),
            Err(ValidationError::InvalidPathParameterId { .. })
        ));
    }

    #[test]
    fn test_path_parameter_display_is_placeholder() {
        let param = PathParameter::new("id", "7").unwrap();
        assert_eq!(param.to_string(), "{id}");
    }

    #[test]
    fn test_path_parameter_allows_braces_in_replacement() {
        // Only the id is constrained; replacements are free-form.
        let param = PathParameter::new("raw", "{literal}").unwrap();
        assert_eq!(param.replacement(), "{literal}");
    }

    #[test]
    fn test_query_parameter_display() {
        let query = QueryParameter::new("limit", "10");
        assert_eq!(query.to_string(), "limit=10");
    }

    #[test]
    fn test_query_parameter_value_is_verbatim() {
        let query = QueryParameter::new("q", "a b&c");
        assert_eq!(query.to_string(), "q=a b&c");
    }

    #[test]
    fn test_header_content_type_convenience() {
        let header = Header::content_type("application/json");
        assert_eq!(header.key(), "Content-Type");
        assert_eq!(header.value(), "application/json");
    }
}
