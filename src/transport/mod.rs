//! Wire-level contracts between the send pipeline and HTTP backends.
//!
//! The pipeline does all assembly work (templating, URL building, header
//! merging, body production, timeout stamping) before anything here runs;
//! a backend only has to move one [`WireRequest`] across the network and
//! read the body back in the representation the request asks for.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use url::Url;

use crate::error::TransportError;
use crate::method::RequestMethod;
use crate::param::Header;

mod reqwest_backend;

pub use reqwest_backend::ReqwestTransport;

/// Deferred producer for request body bytes.
///
/// The pipeline asks the producer for bytes once per send, so a single
/// descriptor can be sent any number of times.
#[derive(Clone, Default)]
pub enum RequestBody {
    /// No body (the default).
    #[default]
    Empty,
    /// A UTF-8 text body.
    Text(String),
    /// Raw bytes.
    Bytes(Bytes),
    /// A producer invoked at each send.
    Deferred(Arc<dyn Fn() -> Bytes + Send + Sync>),
}

impl RequestBody {
    /// Creates a text body holding the JSON serialization of `value`.
    ///
    /// The serialization happens eagerly, once. This does not set a
    /// `Content-Type` header; pair it with [`Header::content_type`].
    ///
    /// ## Errors
    ///
    /// Returns the underlying `serde_json` error when `value` cannot be
    /// serialized.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::Text(serde_json::to_string(value)?))
    }

    /// Creates a deferred producer evaluated at each send.
    pub fn deferred<F>(producer: F) -> Self
    where
        F: Fn() -> Bytes + Send + Sync + 'static,
    {
        Self::Deferred(Arc::new(producer))
    }

    /// Produces the bytes for one send attempt.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Self::Empty => Bytes::new(),
            Self::Text(text) => Bytes::copy_from_slice(text.as_bytes()),
            Self::Bytes(bytes) => bytes.clone(),
            Self::Deferred(producer) => producer(),
        }
    }

    /// Whether this is the no-body producer.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Deferred(_) => f.debug_struct("Deferred").finish_non_exhaustive(),
        }
    }
}

/// Selects the body representation the transport must produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseReader {
    /// Read the entire body as text (the default).
    #[default]
    Text,
    /// Read the entire body as raw bytes.
    Bytes,
    /// Drop the body unread.
    Discard,
}

/// A response body in the representation the reader selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// The body read as text.
    Text(String),
    /// The body read as raw bytes.
    Bytes(Bytes),
    /// No body was read.
    Empty,
}

impl ResponseBody {
    /// A short name for this representation, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Empty => "empty",
        }
    }
}

/// The transport's answer: a status code plus the body representation the
/// response reader produced.
///
/// Publicly constructible so tests can fabricate responses without a
/// network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    body: ResponseBody,
}

impl RawResponse {
    /// Creates a raw response.
    pub fn new(status: u16, body: ResponseBody) -> Self {
        Self { status, body }
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the status is in the 4xx range.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Whether the status is in the 5xx range.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// The body as text, when it was read as text.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Text(text) => Some(text),
            _ => None,
        }
    }

    /// A byte view of the body, whatever its representation.
    ///
    /// `None` only when the body was discarded.
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.body {
            ResponseBody::Text(text) => Some(text.as_bytes()),
            ResponseBody::Bytes(bytes) => Some(bytes),
            ResponseBody::Empty => None,
        }
    }

    /// The body representation.
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// Consumes the response, yielding the body.
    pub fn into_body(self) -> ResponseBody {
        self.body
    }
}

/// An assembled request, ready for a backend.
#[derive(Debug, Clone)]
pub struct WireRequest {
    /// The fully assembled, parsed request URL.
    pub url: Url,
    /// The verb to send.
    pub method: RequestMethod,
    /// Final header list: descriptor headers first, then API defaults,
    /// duplicates intact.
    pub headers: Vec<Header>,
    /// Body bytes for this attempt; empty means "no body".
    pub body: Bytes,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// How the backend must read the response body.
    pub reader: ResponseReader,
}

/// An HTTP backend the pipeline hands assembled requests to.
///
/// The default backend is [`ReqwestTransport`]; tests inject scripted
/// implementations to drive the pipeline deterministically.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes one request and reads the response body as instructed by
    /// `request.reader`.
    async fn execute(&self, request: WireRequest) -> Result<RawResponse, TransportError>;
}
