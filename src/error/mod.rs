//! Layered error types for the request pipeline.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type for all send operations
//! - [`ValidationError`] - Descriptor build-time validation errors
//! - [`UnresolvedTemplateError`] - Leftover `{id}` placeholders in a computed endpoint
//! - [`TransportError`] - Wire-level and backend errors
//! - [`MaterializationError`] - Response-to-type conversion errors
//! - [`HttpError`] - Caller-side wrapper pairing a status code with a cause

mod api_error;
mod http_error;
mod materialization_error;
mod template_error;
mod transport_error;
mod validation_error;

pub use api_error::ApiError;
pub use http_error::{HttpError, UNKNOWN_STATUS};
pub use materialization_error::MaterializationError;
pub use template_error::UnresolvedTemplateError;
pub use transport_error::TransportError;
pub use validation_error::ValidationError;
