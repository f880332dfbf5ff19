//! HTTP inbound adapter.
//!
//! Actix handlers, request DTOs, presenters and session helpers. Handlers
//! depend on [`state::HttpState`] only, so the whole surface is testable
//! against the in-memory repositories.

pub mod error;
pub mod presenters;
pub mod profiles;
pub mod rooms;
pub mod session;
pub mod specifications;
pub mod state;
pub mod subjects;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web::ServiceConfig;

/// Register every HTTP handler on the given service config.
///
/// The caller owns the scope (`/api/v1`) and the session middleware; this
/// only wires the routes.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(profiles::create)
        .service(profiles::authenticate)
        .service(profiles::me)
        .service(profiles::list_profiles)
        .service(profiles::delete_profile)
        .service(subjects::create)
        .service(subjects::create_student_subject_enrollment)
        .service(subjects::cancel_student_subject_enrollment)
        .service(subjects::get_one)
        .service(subjects::list_subjects)
        .service(rooms::create)
        .service(rooms::get_one)
        .service(rooms::list_rooms)
        .service(specifications::create)
        .service(specifications::delete_specification)
        .service(specifications::list_specifications);
}
