//! Builder for request descriptors.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::api::WrappedApi;
use crate::error::ValidationError;
use crate::method::RequestMethod;
use crate::param::{Header, PathParameter, QueryParameter};
use crate::transport::{RequestBody, ResponseReader};

use super::{ApiRequest, RequestParts};

/// Accumulates the fields of an [`ApiRequest`] and validates them on
/// [`build`](Self::build).
///
/// Setters follow the consuming-chain style; `build` borrows, so one
/// builder can produce several descriptors and later changes to the
/// builder never affect descriptors already built (every collection is
/// copied into the descriptor).
pub struct ApiRequestBuilder<T> {
    api: Arc<dyn WrappedApi>,
    url: Option<String>,
    endpoint: Option<String>,
    method: Option<RequestMethod>,
    path_parameters: Vec<(String, String)>,
    query_parameters: Vec<QueryParameter>,
    headers: Vec<Header>,
    body: RequestBody,
    reader: ResponseReader,
    _response: PhantomData<fn() -> T>,
}

impl<T> ApiRequestBuilder<T> {
    /// Starts an empty builder for the given API definition.
    pub fn new(api: Arc<dyn WrappedApi>) -> Self {
        Self {
            api,
            url: None,
            endpoint: None,
            method: None,
            path_parameters: Vec::new(),
            query_parameters: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            reader: ResponseReader::Text,
            _response: PhantomData,
        }
    }

    /// Overrides the API definition's default URL for this request.
    ///
    /// A single trailing `/` is stripped at build time so the URL joins
    /// cleanly with the endpoint's leading `/`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the endpoint template, e.g. `/users/{id}`.
    ///
    /// A leading `/` is prepended at build time when missing.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the request verb.
    pub fn method(mut self, method: RequestMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Adds a path parameter substituted into the endpoint template.
    ///
    /// Parameters apply in the order added; each replaces every occurrence
    /// of its `{id}` placeholder. The id is validated at build time.
    pub fn path_parameter(
        mut self,
        id: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.path_parameters.push((id.into(), replacement.into()));
        self
    }

    /// Adds a query parameter.
    ///
    /// Values are appended verbatim — no percent-encoding is applied, so
    /// pre-encode values that need it.
    pub fn query_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters
            .push(QueryParameter::new(name, value));
        self
    }

    /// Adds a request header. Repeated keys are all sent.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(key, value));
        self
    }

    /// Sets the body producer. Defaults to no body.
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets how the response body is read. Defaults to text.
    pub fn response_reader(mut self, reader: ResponseReader) -> Self {
        self.reader = reader;
        self
    }

    /// Validates the accumulated fields and produces an immutable
    /// descriptor.
    ///
    /// ## Errors
    ///
    /// - [`ValidationError::MissingEndpoint`] when no endpoint was set.
    /// - [`ValidationError::MissingMethod`] when no method was set.
    /// - [`ValidationError::InvalidPathParameterId`] when a path parameter
    ///   id contains `{` or `}`.
    pub fn build(&self) -> Result<ApiRequest<T>, ValidationError> {
        let endpoint = self
            .endpoint
            .clone()
            .ok_or(ValidationError::MissingEndpoint)?;
        let method = self.method.clone().ok_or(ValidationError::MissingMethod)?;

        let endpoint = if endpoint.starts_with('/') {
            endpoint
        } else {
            format!("/{endpoint}")
        };

        let url = self.url.clone().map(|u| match u.strip_suffix('/') {
            Some(stripped) => stripped.to_string(),
            None => u,
        });

        let mut path_parameters = Vec::with_capacity(self.path_parameters.len());
        for (id, replacement) in &self.path_parameters {
            path_parameters.push(PathParameter::new(id.clone(), replacement.clone())?);
        }

        Ok(ApiRequest::from_parts(RequestParts {
            api: Arc::clone(&self.api),
            url,
            endpoint,
            method,
            path_parameters,
            query_parameters: self.query_parameters.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            reader: self.reader,
        }))
    }
}

impl<T> fmt::Debug for ApiRequestBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequestBuilder")
            .field("url", &self.url)
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("path_parameters", &self.path_parameters)
            .field("query_parameters", &self.query_parameters)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("reader", &self.reader)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestApi;

    impl WrappedApi for TestApi {
        fn default_url(&self) -> String {
            "http://api.test".to_string()
        }
    }

    fn api() -> Arc<dyn WrappedApi> {
        Arc::new(TestApi)
    }

    #[test]
    fn test_round_trip_returns_supplied_values() {
        let request = ApiRequest::<String>::builder(api())
            .url("http://override.test")
            .endpoint("/things/{id}")
            .method(RequestMethod::Post)
            .path_parameter("id", "3")
            .query_parameter("full", "true")
            .header("X-One", "1")
            .body(RequestBody::Text("payload".to_string()))
            .response_reader(ResponseReader::Bytes)
            .build()
            .unwrap();

        assert_eq!(request.url(), Some("http://override.test"));
        assert_eq!(request.endpoint(), "/things/{id}");
        assert_eq!(request.method(), &RequestMethod::Post);
        assert_eq!(request.path_parameters().len(), 1);
        assert_eq!(request.path_parameters()[0].id(), "id");
        assert_eq!(request.path_parameters()[0].replacement(), "3");
        assert_eq!(
            request.query_parameters(),
            &[QueryParameter::new("full", "true")]
        );
        assert_eq!(request.headers(), &[Header::new("X-One", "1")]);
        assert_eq!(request.body().to_bytes().as_ref(), b"payload");
        assert_eq!(request.response_reader(), ResponseReader::Bytes);
    }

    #[test]
    fn test_defaults_are_documented_ones() {
        let request = ApiRequest::<String>::builder(api())
            .endpoint("/d")
            .method(RequestMethod::Get)
            .build()
            .unwrap();

        assert_eq!(request.url(), None);
        assert!(request.body().is_none());
        assert_eq!(request.response_reader(), ResponseReader::Text);
        assert!(request.path_parameters().is_empty());
        assert!(request.query_parameters().is_empty());
        assert!(request.headers().is_empty());
    }

    #[test]
    fn test_missing_endpoint_fails() {
        let result = ApiRequest::<String>::builder(api())
            .method(RequestMethod::Get)
            .build();
        assert_eq!(result.unwrap_err(), ValidationError::MissingEndpoint);
    }

    #[test]
    fn test_missing_method_fails() {
        let result = ApiRequest::<String>::builder(api()).endpoint("/x").build();
        assert_eq!(result.unwrap_err(), ValidationError::MissingMethod);
    }

    #[test]
    fn test_leading_slash_is_prepended() {
        let request = ApiRequest::<String>::builder(api())
            .endpoint("relative")
            .method(RequestMethod::Get)
            .build()
            .unwrap();
        assert_eq!(request.endpoint(), "/relative");
    }

    #[test]
    fn test_trailing_slash_is_stripped_from_url() {
        let request = ApiRequest::<String>::builder(api())
            .url("http://override.test/")
            .endpoint("/x")
            .method(RequestMethod::Get)
            .build()
            .unwrap();
        assert_eq!(request.url(), Some("http://override.test"));
    }

    #[test]
    fn test_invalid_path_parameter_id_fails_on_build() {
        let result = ApiRequest::<String>::builder(api())
            .endpoint("/x/{bad}")
            .method(RequestMethod::Get)
            .path_parameter("ba{d", "1")
            .build();
        assert!(matches!(
            result,
            Err(ValidationError::InvalidPathParameterId { .. })
        ));
    }

    #[test]
    fn test_builder_changes_do_not_affect_built_descriptor() {
        let builder = ApiRequest::<String>::builder(api())
            .endpoint("/items")
            .method(RequestMethod::Get);

        let first = builder.build().unwrap();
        let builder = builder.query_parameter("page", "2").header("X-Late", "yes");
        let second = builder.build().unwrap();

        assert!(first.query_parameters().is_empty());
        assert!(first.headers().is_empty());
        assert_eq!(second.query_parameters().len(), 1);
        assert_eq!(second.headers().len(), 1);
    }

    #[test]
    fn test_builder_produces_multiple_descriptors() {
        let builder = ApiRequest::<String>::builder(api())
            .endpoint("/twice")
            .method(RequestMethod::Get);

        let one = builder.build().unwrap();
        let two = builder.build().unwrap();
        assert_eq!(one.endpoint(), two.endpoint());
    }
}
