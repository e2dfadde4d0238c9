//! REST API module for the remote blob server.
//!
//! Successful responses carry the stored document itself, unwrapped, so any client
//! that speaks plain `GET`/`PUT` JSON can use the server. Errors use the
//! [`crate::errors::ErrorResponse`] envelope.

mod blobs;

pub use blobs::*;

use crate::errors::AppError;

/// Response type for blob handlers.
pub type ApiResult<T> = Result<T, AppError>;
