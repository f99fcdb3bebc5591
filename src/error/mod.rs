//! Error types for the collection sync core.
//!
//! This module provides the error handling for the controller and its
//! boundary contracts. Errors use `thiserror` for ergonomic definitions with
//! automatic `Display` and `Error` trait implementations, and `#[from]`
//! conversions so call sites can propagate with `?`.
//!
//! No error here is fatal to a controller: every failure leaves the
//! controller usable for subsequent operations, with optimistic state rolled
//! back where it was applied.

pub mod service;

use thiserror::Error;

pub use service::ServiceError;

/// Main error type for the collection sync core.
///
/// Aggregates boundary errors (remote data service, realtime subscription)
/// and internal serialization failures into a single unified error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Remote data service error (fetch or mutation failure).
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// Failed to serialize query parameters into a cache key.
    #[error("Failed to serialize query parameters for cache key: {0}")]
    CacheKey(#[from] serde_json::Error),
    /// Realtime subscription could not be established or was torn down.
    #[error("Realtime subscription error: {0}")]
    Subscription(String),
}
