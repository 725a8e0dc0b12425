//! Typed request layer for wrapping HTTP APIs.
//!
//! This library turns a remote HTTP API into a typed Rust surface: an API
//! definition supplies the stable facts (base URL, default headers,
//! transport, policies), immutable request descriptors describe individual
//! calls, and the send pipeline assembles, executes, and materializes each
//! call into a declared response type.
//!
//! ## API Definitions
//!
//! - [`WrappedApi`] - Trait describing one remote API: defaults, policies,
//!   overridable assembly steps, and lifecycle hooks
//!
//! ## Request Descriptors
//!
//! - [`ApiRequest`] - An immutable, reusable descriptor typed by its
//!   response
//! - [`ApiRequestBuilder`] - Validating builder for descriptors
//! - [`RequestParts`] - Type-erased descriptor core seen by hooks
//! - [`PathParameter`], [`QueryParameter`], [`Header`] - Descriptor value
//!   types
//! - [`RequestMethod`] - HTTP verbs, including custom ones
//!
//! ## Sending
//!
//! - [`ApiRequest::send`] - Runs the pipeline in place
//! - [`ApiRequest::send_spawned`] - Runs the pipeline on a new unit of
//!   work, yielding a [`ResponseFuture`]
//!
//! ## Responses
//!
//! - [`ApiResponse`] - Trait for materializable response types
//! - [`ResponseEnvelope`] - Embeddable status and API back-reference
//! - [`response::json`] - JSON decoding helper for `deserialize` impls
//!
//! ## Transports
//!
//! - [`HttpTransport`] - Backend trait the pipeline hands wire requests to
//! - [`ReqwestTransport`] - Default `reqwest`-backed implementation
//! - [`WireRequest`], [`RawResponse`], [`RequestBody`], [`ResponseReader`] -
//!   Wire-level contracts
//!
//! ## Errors
//!
//! - [`ApiError`] - Umbrella error for the whole pipeline
//! - [`ValidationError`], [`UnresolvedTemplateError`], [`TransportError`],
//!   [`MaterializationError`] - Per-concern errors
//! - [`HttpError`] - Caller-side pairing of a status code with a cause
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wrapi::{ApiRequest, Header, RequestMethod, WrappedApi};
//!
//! struct HttpBin;
//!
//! impl WrappedApi for HttpBin {
//!     fn default_url(&self) -> String {
//!         "https://httpbin.org".to_string()
//!     }
//!
//!     fn default_headers(&self) -> Vec<Header> {
//!         vec![Header::new("User-Agent", "wrapi")]
//!     }
//! }
//!
//! # async fn run() -> Result<(), wrapi::ApiError> {
//! let api: Arc<dyn WrappedApi> = Arc::new(HttpBin);
//! let request = ApiRequest::<String>::builder(api)
//!     .endpoint("/anything/{name}")
//!     .method(RequestMethod::Get)
//!     .path_parameter("name", "biscuit")
//!     .build()?;
//!
//! if let Some(body) = request.send().await? {
//!     println!("{body}");
//! }
//! # Ok(())
//! # }
//! ```

mod api;
pub mod error;
mod executor;
mod method;
mod param;
mod request;
pub mod response;
mod transport;

pub use api::{WrappedApi, DEFAULT_TIMEOUT_SECS};
pub use error::{
    ApiError, HttpError, MaterializationError, TransportError, UnresolvedTemplateError,
    ValidationError, UNKNOWN_STATUS,
};
pub use executor::ResponseFuture;
pub use method::RequestMethod;
pub use param::{Header, PathParameter, QueryParameter};
pub use request::{ApiRequest, ApiRequestBuilder, RequestParts};
pub use response::{ApiResponse, ResponseEnvelope};
pub use transport::{
    HttpTransport, RawResponse, RequestBody, ReqwestTransport, ResponseBody, ResponseReader,
    WireRequest,
};
