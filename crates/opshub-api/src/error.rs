//! Maps domain `AppError` to HTTP responses.

// The `IntoResponse` impl lives next to `AppError` in `opshub-core` because
// the orphan rule requires it to be in the crate that defines the type.
pub use opshub_core::error::ApiErrorResponse;
