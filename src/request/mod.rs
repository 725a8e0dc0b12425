//! Immutable request descriptors.
//!
//! A descriptor is everything needed to send one request: the endpoint
//! template, verb, parameters, headers, body producer, and a handle to the
//! owning API definition. Descriptors are built through
//! [`ApiRequestBuilder`], are immutable afterwards, and can be sent any
//! number of times.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::api::WrappedApi;
use crate::method::RequestMethod;
use crate::param::{Header, PathParameter, QueryParameter};
use crate::transport::{RequestBody, ResponseReader};

mod builder;

pub use builder::ApiRequestBuilder;

/// The type-erased core of a request descriptor.
///
/// This is the view hook implementations and overridable API-definition
/// steps observe; it carries every field except the declared response type.
#[derive(Clone)]
pub struct RequestParts {
    pub(crate) api: Arc<dyn WrappedApi>,
    pub(crate) url: Option<String>,
    pub(crate) endpoint: String,
    pub(crate) method: RequestMethod,
    pub(crate) path_parameters: Vec<PathParameter>,
    pub(crate) query_parameters: Vec<QueryParameter>,
    pub(crate) headers: Vec<Header>,
    pub(crate) body: RequestBody,
    pub(crate) reader: ResponseReader,
}

impl RequestParts {
    /// The owning API definition.
    pub fn api(&self) -> &Arc<dyn WrappedApi> {
        &self.api
    }

    /// The per-request URL override, when one was supplied.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// The endpoint template. Always starts with `/`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The request verb.
    pub fn method(&self) -> &RequestMethod {
        &self.method
    }

    /// Path parameters, in the order supplied.
    pub fn path_parameters(&self) -> &[PathParameter] {
        &self.path_parameters
    }

    /// Query parameters, in the order supplied.
    pub fn query_parameters(&self) -> &[QueryParameter] {
        &self.query_parameters
    }

    /// Request headers, in the order supplied.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// The body producer.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// How the response body should be read.
    pub fn response_reader(&self) -> ResponseReader {
        self.reader
    }

    /// Renders the endpoint with the default algorithm.
    ///
    /// Each path parameter replaces every occurrence of its `{id}`
    /// placeholder, in the order the parameters were supplied (a later
    /// parameter sees the results of earlier substitutions). Query
    /// parameters are then appended as `?name=value&name=value`. Values
    /// pass through verbatim with no percent-encoding.
    ///
    /// This is the default behind `WrappedApi::compute_endpoint`; custom
    /// overrides can call it and post-process the result.
    pub fn render_endpoint(&self) -> String {
        let mut computed = self.endpoint.clone();
        for parameter in &self.path_parameters {
            computed = computed.replace(&parameter.placeholder(), parameter.replacement());
        }
        if !self.query_parameters.is_empty() {
            let rendered: Vec<String> = self
                .query_parameters
                .iter()
                .map(ToString::to_string)
                .collect();
            computed.push('?');
            computed.push_str(&rendered.join("&"));
        }
        computed
    }

    /// Merges headers with the default algorithm: descriptor headers
    /// first, then the API definition's defaults, duplicates intact.
    ///
    /// This is the default behind `WrappedApi::assemble_headers`.
    pub fn merged_headers(&self) -> Vec<Header> {
        let mut merged = self.headers.clone();
        merged.extend(self.api.default_headers());
        merged
    }
}

impl fmt::Debug for RequestParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestParts")
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

/// An immutable, typed request descriptor.
///
/// `T` is the declared response type the send pipeline materializes. The
/// descriptor itself is cheap to clone and safe to send concurrently; every
/// send re-runs the full pipeline.
///
/// ## Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use wrapi::{ApiRequest, RequestMethod, WrappedApi};
///
/// struct PetStore;
///
/// impl WrappedApi for PetStore {
///     fn default_url(&self) -> String {
///         "https://petstore.example.com".to_string()
///     }
/// }
///
/// # fn run() -> Result<(), wrapi::ApiError> {
/// let api: Arc<dyn WrappedApi> = Arc::new(PetStore);
/// let request = ApiRequest::<String>::builder(Arc::clone(&api))
///     .endpoint("/pets/{id}")
///     .method(RequestMethod::Get)
///     .path_parameter("id", "17")
///     .build()?;
///
/// assert_eq!(request.computed_endpoint(), "/pets/17");
/// # Ok(())
/// # }
/// ```
pub struct ApiRequest<T> {
    parts: RequestParts,
    _response: PhantomData<fn() -> T>,
}

impl<T> ApiRequest<T> {
    /// Starts a builder for a request against the given API definition.
    pub fn builder(api: Arc<dyn WrappedApi>) -> ApiRequestBuilder<T> {
        ApiRequestBuilder::new(api)
    }

    pub(crate) fn from_parts(parts: RequestParts) -> Self {
        Self {
            parts,
            _response: PhantomData,
        }
    }

    /// The type-erased descriptor core.
    pub fn parts(&self) -> &RequestParts {
        &self.parts
    }

    /// The owning API definition.
    pub fn api(&self) -> &Arc<dyn WrappedApi> {
        self.parts.api()
    }

    /// The per-request URL override, when one was supplied.
    pub fn url(&self) -> Option<&str> {
        self.parts.url()
    }

    /// The endpoint template.
    pub fn endpoint(&self) -> &str {
        self.parts.endpoint()
    }

    /// The request verb.
    pub fn method(&self) -> &RequestMethod {
        self.parts.method()
    }

    /// Path parameters, in the order supplied.
    pub fn path_parameters(&self) -> &[PathParameter] {
        self.parts.path_parameters()
    }

    /// Query parameters, in the order supplied.
    pub fn query_parameters(&self) -> &[QueryParameter] {
        self.parts.query_parameters()
    }

    /// Request headers, in the order supplied.
    pub fn headers(&self) -> &[Header] {
        self.parts.headers()
    }

    /// The body producer.
    pub fn body(&self) -> &RequestBody {
        self.parts.body()
    }

    /// How the response body should be read.
    pub fn response_reader(&self) -> ResponseReader {
        self.parts.response_reader()
    }

    /// The endpoint with all substitutions and query parameters applied.
    ///
    /// Dispatches through the API definition, so an overridden
    /// `compute_endpoint` is honored here as well as during sends.
    pub fn computed_endpoint(&self) -> String {
        self.parts.api.compute_endpoint(&self.parts)
    }
}

impl<T> Clone for ApiRequest<T> {
    fn clone(&self) -> Self {
        Self {
            parts: self.parts.clone(),
            _response: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ApiRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("parts", &self.parts)
            .finish()
    }
}
