//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every HTTP endpoint from the inbound layer, the response
//! schemas, and the session-cookie security scheme. The generated document
//! backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::error::{Error, ErrorCode};
use crate::inbound::http::presenters::{
    MessageResponse, ProfileResponse, RoomResponse, SpecificationResponse, StudentResponse,
    SubjectResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/profiles/auth.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Classroom backend API",
        description = "HTTP interface for profiles, subjects, rooms, specifications and enrollment."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::profiles::create,
        crate::inbound::http::profiles::authenticate,
        crate::inbound::http::profiles::me,
        crate::inbound::http::profiles::list_profiles,
        crate::inbound::http::profiles::delete_profile,
        crate::inbound::http::subjects::create,
        crate::inbound::http::subjects::create_student_subject_enrollment,
        crate::inbound::http::subjects::cancel_student_subject_enrollment,
        crate::inbound::http::subjects::get_one,
        crate::inbound::http::subjects::list_subjects,
        crate::inbound::http::rooms::create,
        crate::inbound::http::rooms::get_one,
        crate::inbound::http::rooms::list_rooms,
        crate::inbound::http::specifications::create,
        crate::inbound::http::specifications::delete_specification,
        crate::inbound::http::specifications::list_specifications,
    ),
    components(schemas(
        Error,
        ErrorCode,
        ProfileResponse,
        StudentResponse,
        SubjectResponse,
        RoomResponse,
        SpecificationResponse,
        MessageResponse,
    )),
    tags(
        (name = "profiles", description = "Account management and authentication"),
        (name = "subjects", description = "Subjects and student enrollment"),
        (name = "rooms", description = "Room management"),
        (name = "specifications", description = "Room amenity management")
    )
)]
pub struct ApiDoc;
