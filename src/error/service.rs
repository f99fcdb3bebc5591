//! Remote data service error types.
//!
//! These errors cross the `RemoteDataService` boundary. Implementations must
//! report failures through this type rather than panicking or swallowing
//! them, so the controller can surface an error value and roll back any
//! optimistic state.

use thiserror::Error;

/// Error reported by a remote data service implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The backing service could not be reached or returned a transport
    /// failure. The message carries whatever detail the transport provided.
    #[error("Remote service unavailable: {0}")]
    Unavailable(String),

    /// No record with the given id exists on the server.
    #[error("No {resource} record found with id {id}")]
    NotFound {
        /// Resource collection name, e.g. `transactions`.
        resource: &'static str,
        /// The id that failed to resolve.
        id: String,
    },

    /// The server refused the request (validation, permissions, conflict).
    #[error("Request rejected by remote service: {0}")]
    Rejected(String),
}
