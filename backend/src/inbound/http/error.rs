//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing actix
//! handlers to turn domain failures into consistent JSON responses and
//! status codes.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::{TraceId, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::DuplicateEntity | ErrorCode::DuplicateEnrollment | ErrorCode::NotEnrolled => {
            StatusCode::CONFLICT
        }
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Internal failure details stay in the logs, not in the response body.
fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(trace_id) = TraceId::current() {
            builder.insert_header((TRACE_ID_HEADER, trace_id.to_string()));
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use actix_web::body::to_bytes;

    use super::*;

    #[actix_web::test]
    async fn duplicate_kinds_map_to_conflict() {
        for error in [
            Error::duplicate_entity("taken"),
            Error::duplicate_enrollment("again"),
            Error::not_enrolled("missing"),
        ] {
            assert_eq!(error.status_code(), StatusCode::CONFLICT);
        }
    }

    #[actix_web::test]
    async fn not_found_maps_to_404_with_payload() {
        let error = Error::not_found("No subject were found");
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);

        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: serde_json::Value =
            serde_json::from_slice(&bytes).expect("json payload");
        assert_eq!(payload["code"], "not_found");
        assert_eq!(payload["message"], "No subject were found");
    }

    #[actix_web::test]
    async fn internal_messages_are_redacted() {
        let error = Error::internal("connection string leaked");
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let payload: serde_json::Value =
            serde_json::from_slice(&bytes).expect("json payload");
        assert_eq!(payload["message"], "Internal server error");
    }
}
