//! Boundary types shared by the API handlers

pub mod error;

pub use error::{ApiError, ApiErrorResponse};
