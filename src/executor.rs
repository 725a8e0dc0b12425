//! The send pipeline.
//!
//! [`ApiRequest::send`] runs the whole pipeline in place: compute the
//! endpoint, assemble the URL and headers, hand the wire request to the
//! API definition's transport, and materialize the declared response type,
//! with the definition's hooks observing each stage.
//! [`ApiRequest::send_spawned`] schedules exactly the same pipeline onto a
//! new unit of work and returns a future for its outcome.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::{instrument, Span};
use url::Url;

use crate::api::WrappedApi;
use crate::error::{ApiError, TransportError, UnresolvedTemplateError};
use crate::request::ApiRequest;
use crate::response::ApiResponse;
use crate::transport::{RawResponse, WireRequest};

impl<T: ApiResponse> ApiRequest<T> {
    /// Sends this request and waits for the outcome.
    ///
    /// `Ok(Some(response))` is a completed send. `Ok(None)` is the
    /// no-result outcome: the send failed, `on_exception` ran, and the API
    /// definition's rethrow policy suppressed the error. `Err` carries
    /// validation-class errors unconditionally and transport or
    /// materialization errors when the policy rethrows (the default).
    ///
    /// ## Errors
    ///
    /// - [`UnresolvedTemplateError`] when the computed endpoint still
    ///   contains `{` or `}`. Raised before any transport activity and
    ///   never routed through `on_exception`.
    /// - [`TransportError`] / [`MaterializationError`] after their single
    ///   `on_exception` call, when the policy rethrows.
    ///
    /// [`MaterializationError`]: crate::error::MaterializationError
    #[instrument(
        name = "api_request",
        skip(self),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn send(&self) -> Result<Option<T>, ApiError> {
        let parts = self.parts();
        let api = Arc::clone(parts.api());

        // Record the method in the span
        Span::current().record("http.method", parts.method().to_string().as_str());

        // Unresolved placeholders propagate immediately, before the
        // transport is ever consulted and without touching on_exception.
        let computed = api.compute_endpoint(parts);
        if computed.contains('{') || computed.contains('}') {
            return Err(UnresolvedTemplateError::new(computed).into());
        }

        let base = match parts.url() {
            Some(url) => url.to_string(),
            None => api.default_url(),
        };
        let full = format!("{base}{computed}");

        // A concatenation that does not parse is routed like any other
        // transport failure.
        let url = match Url::parse(&full) {
            Ok(url) => url,
            Err(source) => {
                let error = ApiError::from(TransportError::InvalidUrl { url: full, source });
                return self.failed(&api, error);
            }
        };

        // Record the full URL in the span
        Span::current().record("http.url", url.as_str());

        let wire = WireRequest {
            url,
            method: parts.method().clone(),
            headers: api.assemble_headers(parts),
            body: parts.body().to_bytes(),
            timeout: api.timeout(),
            reader: parts.response_reader(),
        };

        api.on_before_send(parts);

        let raw = match api.transport().execute(wire).await {
            Ok(raw) => raw,
            Err(error) => return self.failed(&api, error.into()),
        };

        // Record status in span
        Span::current().record("http.status_code", raw.status());
        tracing::debug!(status = raw.status(), "response received");

        api.on_after_send(parts);

        let response = match materialize(self, &api, &raw) {
            Ok(response) => response,
            Err(error) => return self.failed(&api, error),
        };

        api.on_after_handled(parts, &response);

        Span::current().record("otel.status_code", "OK");
        Ok(Some(response))
    }

    /// Sends this request on a new unit of work and returns a future for
    /// the outcome.
    ///
    /// The whole pipeline — hooks, error routing, policy — runs on the
    /// spawned unit exactly as [`send`](Self::send) would run it, and the
    /// returned future completes with the same value or error. Scheduling
    /// goes through `WrappedApi::spawn` (one new Tokio task per call by
    /// default). Dropping the future detaches it: the send keeps running
    /// and cannot be cancelled, so fire-and-forget is simply
    /// `drop(request.send_spawned())`.
    pub fn send_spawned(&self) -> ResponseFuture<T> {
        let (tx, rx) = oneshot::channel();
        let request = self.clone();
        let api = Arc::clone(self.api());
        api.spawn(Box::pin(async move {
            let result = request.send().await;
            // The receiver may already be gone; the send itself still ran.
            let _ = tx.send(result);
        }));
        ResponseFuture { receiver: rx }
    }

    /// Routes a failure through `on_exception`, then applies the rethrow
    /// policy.
    fn failed(&self, api: &Arc<dyn WrappedApi>, error: ApiError) -> Result<Option<T>, ApiError> {
        Span::current().record("otel.status_code", "ERROR");
        api.on_exception(self.parts(), &error);
        if api.rethrow_exceptions() {
            Err(error)
        } else {
            tracing::warn!(%error, "send failed; result suppressed by policy");
            Ok(None)
        }
    }
}

/// Runs the materialization steps for a raw response.
fn materialize<T: ApiResponse>(
    request: &ApiRequest<T>,
    api: &Arc<dyn WrappedApi>,
    raw: &RawResponse,
) -> Result<T, ApiError> {
    let status = i32::from(raw.status());

    let mut placeholder = T::default();
    placeholder.bind(status, api);

    let mut response = placeholder.deserialize(request.parts(), raw)?;

    // deserialize may have produced a brand-new instance; bind whichever
    // one survived so the final value always carries the raw status.
    response.bind(status, api);

    Ok(response)
}

/// Future for a spawned send.
///
/// Completes with exactly the result the pipeline produced on its unit of
/// work. If that unit dies before reporting (runtime shutdown, panic), the
/// future resolves to [`TransportError::Interrupted`].
pub struct ResponseFuture<T> {
    receiver: oneshot::Receiver<Result<Option<T>, ApiError>>,
}

impl<T> Future for ResponseFuture<T> {
    type Output = Result<Option<T>, ApiError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let receiver = &mut self.get_mut().receiver;
        match Pin::new(receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(TransportError::Interrupted.into())),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> std::fmt::Debug for ResponseFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseFuture").finish_non_exhaustive()
    }
}
