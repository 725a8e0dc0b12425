//! Response materialization.
//!
//! The declared response type of a request controls how a raw transport
//! response becomes a value:
//!
//! - [`ApiResponse`] - Capability trait every declared response type implements
//! - [`ResponseEnvelope`] - Embeddable carrier for the status code and API handle
//! - [`json`] - Built-in JSON deserialization helper

use std::fmt;
use std::sync::Arc;

use crate::api::WrappedApi;
use crate::error::MaterializationError;
use crate::request::RequestParts;
use crate::transport::{RawResponse, ResponseBody};

pub mod json;

/// Implemented by declared response types so the send pipeline can
/// materialize them.
///
/// The `Default` bound is the factory: materialization always starts from
/// `T::default()`, the placeholder. Both methods are optional capabilities
/// with working defaults:
///
/// - [`bind`](Self::bind) receives the HTTP status code and the owning API
///   definition. The default ignores them; embed a [`ResponseEnvelope`]
///   and forward to it to keep them.
/// - [`deserialize`](Self::deserialize) consumes the placeholder and
///   produces the final value from the raw response. The default returns
///   the placeholder unchanged, so a type with no deserialization
///   capability materializes as its `Default` value.
///
/// The pipeline binds the placeholder before deserialization (so
/// deserialization logic observes a consistent status) and binds again
/// whatever instance `deserialize` returns, so the final value always
/// carries the raw status code.
///
/// ## Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use serde::Deserialize;
/// use wrapi::response::json;
/// use wrapi::{
///     ApiResponse, MaterializationError, RawResponse, RequestParts, ResponseEnvelope,
///     WrappedApi,
/// };
///
/// #[derive(Debug, Default, Deserialize)]
/// struct UserResponse {
///     name: String,
///     #[serde(skip)]
///     envelope: ResponseEnvelope,
/// }
///
/// impl ApiResponse for UserResponse {
///     fn bind(&mut self, status: i32, api: &Arc<dyn WrappedApi>) {
///         self.envelope.bind(status, api);
///     }
///
///     fn deserialize(
///         self,
///         _request: &RequestParts,
///         raw: &RawResponse,
///     ) -> Result<Self, MaterializationError> {
///         json::decode(raw)
///     }
/// }
/// ```
pub trait ApiResponse: Default + Send + 'static {
    /// Status/api-binding capability.
    ///
    /// Called with the raw HTTP status code and the API definition the
    /// request belonged to. The default drops both.
    fn bind(&mut self, _status: i32, _api: &Arc<dyn WrappedApi>) {}

    /// Deserialization capability.
    ///
    /// Consumes the placeholder and produces the final value from the raw
    /// response. May return a brand-new instance; the pipeline re-binds
    /// the result. The default keeps the placeholder.
    ///
    /// ## Errors
    ///
    /// Implementations reject unusable responses with
    /// [`MaterializationError`]; the pipeline routes that through
    /// `on_exception` like a transport failure.
    fn deserialize(
        self,
        _request: &RequestParts,
        _raw: &RawResponse,
    ) -> Result<Self, MaterializationError> {
        Ok(self)
    }
}

/// Carrier for the HTTP status code and owning API definition of a
/// materialized response.
///
/// Embed one in a response type (marked `#[serde(skip)]` when the type is
/// deserializable) and forward [`ApiResponse::bind`] to it. The status
/// starts at [`ResponseEnvelope::UNBOUND`] and the API handle is a shared
/// reference used for lookups only; the response never manages the
/// definition's lifetime.
#[derive(Clone)]
pub struct ResponseEnvelope {
    status: i32,
    api: Option<Arc<dyn WrappedApi>>,
}

impl ResponseEnvelope {
    /// Status value before any binding happened.
    pub const UNBOUND: i32 = -1;

    /// Creates an unbound envelope. Equivalent to `Default::default()`.
    pub fn new() -> Self {
        Self {
            status: Self::UNBOUND,
            api: None,
        }
    }

    /// Records the status code and API definition.
    pub fn bind(&mut self, status: i32, api: &Arc<dyn WrappedApi>) {
        self.status = status;
        self.api = Some(Arc::clone(api));
    }

    /// The bound HTTP status code, or [`ResponseEnvelope::UNBOUND`].
    pub fn http_status_code(&self) -> i32 {
        self.status
    }

    /// Whether a status has been bound.
    pub fn is_bound(&self) -> bool {
        self.status != Self::UNBOUND
    }

    /// Whether the bound status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The API definition this response came from, once bound.
    pub fn api(&self) -> Option<&Arc<dyn WrappedApi>> {
        self.api.as_ref()
    }
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResponseEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseEnvelope")
            .field("status", &self.status)
            .field("bound_to_api", &self.api.is_some())
            .finish()
    }
}

impl PartialEq for ResponseEnvelope {
    fn eq(&self, other: &Self) -> bool {
        let same_api = match (&self.api, &other.api) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        };
        self.status == other.status && same_api
    }
}

/// Fire-and-forget: materializes as `()` whatever the response carried.
impl ApiResponse for () {}

/// Materializes as the response body text.
impl ApiResponse for String {
    /// ## Errors
    ///
    /// Fails with [`MaterializationError::NonTextBody`] when the body was
    /// read as anything other than text.
    fn deserialize(
        self,
        _request: &RequestParts,
        raw: &RawResponse,
    ) -> Result<Self, MaterializationError> {
        match raw.body() {
            ResponseBody::Text(text) => Ok(text.clone()),
            other => Err(MaterializationError::NonTextBody {
                actual: other.kind(),
            }),
        }
    }
}

/// Materializes as the response body bytes, whatever representation was
/// read. A discarded body yields an empty vector.
impl ApiResponse for Vec<u8> {
    fn deserialize(
        self,
        _request: &RequestParts,
        raw: &RawResponse,
    ) -> Result<Self, MaterializationError> {
        Ok(raw.bytes().map(<[u8]>::to_vec).unwrap_or_default())
    }
}
