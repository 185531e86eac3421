//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the crate.
//! It centralizes error management, providing a consistent way to represent the
//! error conditions the core can raise: missing resources, insufficient
//! privileges, bad input, and malformed stored credentials.
//!
//! The crate is transport-agnostic, so `AppError` carries no HTTP machinery of
//! its own; instead `AppError::status_code` exposes the status the consuming
//! request layer should map each variant to. `From` implementations for
//! `validator::ValidationErrors` and `bcrypt::BcryptError` allow conversion
//! with the `?` operator.
//!
//! Two deliberate properties of the error model:
//! - A resource in another organization is reported as `NotFound`, never as
//!   `Forbidden`, so a caller can never confirm that the resource exists.
//! - A structurally invalid stored hash and a hash the bcrypt primitive fails
//!   to decode both surface as `InvalidHashFormat`; the two cases are not
//!   distinguishable to the caller.

use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the core.
///
/// Each variant corresponds to a specific failure condition, usually carrying
/// a message detailing the issue.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed: unknown login, wrong password, or a
    /// deactivated account (HTTP 401).
    Unauthorized(String),
    /// The resource exists and is in-tenant, but the caller's role or
    /// ownership is insufficient for the operation (HTTP 403).
    Forbidden(String),
    /// The resource is absent, or it belongs to another organization.
    /// The two cases are intentionally indistinguishable (HTTP 404).
    NotFound(String),
    /// The operation conflicts with current state, e.g. the active-user
    /// quota is exhausted or a username is already taken (HTTP 409).
    Conflict(String),
    /// Malformed input that failed validation rules (HTTP 400).
    ValidationError(String),
    /// A stored credential hash does not have the expected structure and
    /// cannot be verified against (HTTP 500).
    InvalidHashFormat,
    /// An unexpected internal failure (HTTP 500).
    InternalServerError(String),
}

impl AppError {
    /// The HTTP status code the consuming request layer should respond with.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Unauthorized(_) => 401,
            AppError::Forbidden(_) => 403,
            AppError::NotFound(_) => 404,
            AppError::Conflict(_) => 409,
            AppError::ValidationError(_) => 400,
            AppError::InvalidHashFormat => 500,
            AppError::InternalServerError(_) => 500,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InvalidHashFormat => write!(f, "Invalid hash format"),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
///
/// This covers failures while hashing a new password. Verification failures
/// are handled separately and normalize to `InvalidHashFormat`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Unauthorized("no token".into()).status_code(), 401);
        assert_eq!(AppError::Forbidden("admin only".into()).status_code(), 403);
        assert_eq!(AppError::NotFound("task".into()).status_code(), 404);
        assert_eq!(AppError::Conflict("quota".into()).status_code(), 409);
        assert_eq!(AppError::ValidationError("title".into()).status_code(), 400);
        assert_eq!(AppError::InvalidHashFormat.status_code(), 500);
        assert_eq!(
            AppError::InternalServerError("oops".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_display_messages() {
        let error = AppError::NotFound("Task not found".into());
        assert_eq!(error.to_string(), "Not Found: Task not found");

        let error = AppError::InvalidHashFormat;
        assert_eq!(error.to_string(), "Invalid hash format");
    }
}
