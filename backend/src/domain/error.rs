//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! status codes and JSON envelopes; the domain only records a stable kind
//! and a human-readable message.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested record does not exist.
    NotFound,
    /// A record with the same unique attribute already exists.
    DuplicateEntity,
    /// The student is already enrolled in the target subject.
    DuplicateEnrollment,
    /// The student is not enrolled in the target subject.
    NotEnrolled,
    /// The storage backend could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload carried to the boundary: a kind plus a message,
/// enough for the adapter to produce a deterministic response.
///
/// # Examples
/// ```
/// use classroom_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("No subject were found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "not_found")]
    code: ErrorCode,
    #[schema(example = "No subject were found")]
    message: String,
}

impl Error {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateEntity`].
    pub fn duplicate_entity(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateEntity, message)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateEnrollment`].
    pub fn duplicate_enrollment(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateEnrollment, message)
    }

    /// Convenience constructor for [`ErrorCode::NotEnrolled`].
    pub fn not_enrolled(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotEnrolled, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[test]
    fn constructors_set_the_matching_code() {
        assert_eq!(
            Error::duplicate_entity("taken").code(),
            ErrorCode::DuplicateEntity
        );
        assert_eq!(
            Error::duplicate_enrollment("again").code(),
            ErrorCode::DuplicateEnrollment
        );
        assert_eq!(Error::not_enrolled("missing").code(), ErrorCode::NotEnrolled);
        assert_eq!(Error::not_found("gone").code(), ErrorCode::NotFound);
    }

    #[test]
    fn display_shows_the_message() {
        let err = Error::not_found("No subject were found");
        assert_eq!(err.to_string(), "No subject were found");
    }

    #[test]
    fn serialises_code_as_snake_case() {
        let err = Error::duplicate_enrollment("Student already enrolled to this subject");
        let json = serde_json::to_value(&err).expect("serialisable");
        assert_eq!(json["code"], "duplicate_enrollment");
    }
}
