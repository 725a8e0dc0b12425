//! The API-definition extension point.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

use crate::error::ApiError;
use crate::param::Header;
use crate::request::RequestParts;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Default whole-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Describes one HTTP API: its default URL, defaults applied to every
/// request, and the policies the send pipeline consults.
///
/// Implementations are long-lived, caller-owned objects shared behind an
/// `Arc`; request descriptors and materialized responses hold handles back
/// to the definition that produced them. Only
/// [`default_url`](Self::default_url) is required — everything else has a
/// working default.
///
/// ## Examples
///
/// ```rust
/// use wrapi::{Header, WrappedApi};
///
/// struct HttpBin;
///
/// impl WrappedApi for HttpBin {
///     fn default_url(&self) -> String {
///         "https://httpbin.org".to_string()
///     }
///
///     fn default_headers(&self) -> Vec<Header> {
///         vec![Header::new("User-Agent", "wrapi")]
///     }
/// }
/// ```
///
/// ## Hooks
///
/// The four `on_*` methods are pure observation points called by the send
/// pipeline in a fixed order: `on_before_send` after URL and header
/// assembly, `on_after_send` after the transport returns, and
/// `on_after_handled` after materialization. `on_exception` fires exactly
/// once per failed send — for the transport arm or the materialization
/// arm, never both — before [`rethrow_exceptions`](Self::rethrow_exceptions)
/// decides whether the caller sees the error. The pipeline ignores
/// anything a hook does and does not guard against panics inside one.
pub trait WrappedApi: Send + Sync {
    /// The base URL requests default to, e.g. `https://api.example.com`.
    ///
    /// Expected without a trailing `/`; the endpoint's leading `/` supplies
    /// the separator.
    fn default_url(&self) -> String;

    /// Headers appended to every request, after the descriptor's own.
    fn default_headers(&self) -> Vec<Header> {
        Vec::new()
    }

    /// Whole-request timeout stamped onto every wire request.
    fn timeout(&self) -> Duration {
        Duration::from_secs(DEFAULT_TIMEOUT_SECS)
    }

    /// The transport each send uses.
    ///
    /// Called once per send. The default constructs a fresh
    /// [`ReqwestTransport`] every time; override to share one transport
    /// (and its connection pool) across sends, or to inject a scripted
    /// transport in tests.
    fn transport(&self) -> Arc<dyn HttpTransport> {
        Arc::new(ReqwestTransport::new())
    }

    /// Whether transport and materialization failures propagate to the
    /// caller (`true`, the default) or are converted into the no-result
    /// outcome after `on_exception` has run (`false`).
    ///
    /// Validation and unresolved-template errors always propagate; this
    /// policy never applies to them.
    fn rethrow_exceptions(&self) -> bool {
        true
    }

    /// Computes the endpoint for a request.
    ///
    /// Defaults to [`RequestParts::render_endpoint`]: literal `{id}`
    /// substitution in supplied order, then `?name=value&...` query
    /// rendering, no percent-encoding. Override to customize templating
    /// for every request of this API.
    fn compute_endpoint(&self, request: &RequestParts) -> String {
        request.render_endpoint()
    }

    /// Assembles the final wire header list for a request.
    ///
    /// Defaults to [`RequestParts::merged_headers`]: descriptor headers
    /// first, then [`default_headers`](Self::default_headers), duplicates
    /// intact.
    fn assemble_headers(&self, request: &RequestParts) -> Vec<Header> {
        request.merged_headers()
    }

    /// Schedules the unit of work behind an async send.
    ///
    /// `send_spawned` packages the whole pipeline into `task` and hands it
    /// here; the default starts one new Tokio task per call (and therefore
    /// must run inside a Tokio runtime). Override to pin sends onto a
    /// specific runtime or scheduler. Dropping the caller's future never
    /// cancels the scheduled work.
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        tokio::spawn(task);
    }

    /// Observation point: the request is assembled and about to be sent.
    fn on_before_send(&self, _request: &RequestParts) {}

    /// Observation point: the transport returned a response.
    fn on_after_send(&self, _request: &RequestParts) {}

    /// Observation point: the response was materialized.
    ///
    /// The response arrives type-erased; downcast to the concrete types
    /// this API serves:
    ///
    /// ```rust,ignore
    /// fn on_after_handled(&self, _request: &RequestParts, response: &dyn Any) {
    ///     if let Some(user) = response.downcast_ref::<UserResponse>() {
    ///         tracing::debug!(id = user.id, "fetched user");
    ///     }
    /// }
    /// ```
    fn on_after_handled(&self, _request: &RequestParts, _response: &dyn Any) {}

    /// Observation point: a send failed in the transport or
    /// materialization step.
    ///
    /// Fires exactly once per failed send, before the rethrow policy is
    /// applied.
    fn on_exception(&self, _request: &RequestParts, _error: &ApiError) {}
}
