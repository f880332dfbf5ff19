//! Subject HTTP handlers, including the enrollment endpoints.
//!
//! ```text
//! POST /api/v1/subjects
//! POST /api/v1/subjects/enroll/{subject_id}
//! POST /api/v1/subjects/enroll/{subject_id}/cancel
//! GET  /api/v1/subjects/{id}
//! GET  /api/v1/subjects
//! ```
//!
//! Enrollment endpoints are role-gated to STUDENT accounts and always act
//! on the caller's own student record, resolved from the session.

use actix_web::{get, post, web, HttpResponse};
use pagination::PageParams;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{AccountType, NewSubject};
use crate::inbound::http::presenters::{
    present_subject, present_subjects, MessageResponse, SubjectResponse,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_non_empty;
use crate::inbound::http::ApiResult;

/// Request payload for subject creation.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectBody {
    /// Unique subject name.
    pub name: String,
    /// Instructor identifier.
    pub taught_by: String,
    /// Optional room to link (1:1).
    #[serde(default)]
    pub room_id: Option<Uuid>,
}

/// Create a subject, admin only.
#[utoipa::path(
    post,
    path = "/api/v1/subjects",
    request_body = CreateSubjectBody,
    responses(
        (status = 201, description = "Subject created", body = SubjectResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an admin"),
        (status = 409, description = "Name already taken")
    ),
    tags = ["subjects"],
    operation_id = "createSubject"
)]
#[post("/subjects")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<CreateSubjectBody>,
) -> ApiResult<HttpResponse> {
    session.require_account(AccountType::Admin)?;
    let body = body.into_inner();
    require_non_empty(&body.name, "name")?;
    require_non_empty(&body.taught_by, "taughtBy")?;

    let subject = state
        .subjects
        .create(NewSubject {
            name: body.name,
            taught_by: body.taught_by,
            room_id: body.room_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(present_subject(subject)))
}

/// Enroll the calling student into a subject.
#[utoipa::path(
    post,
    path = "/api/v1/subjects/enroll/{subject_id}",
    params(("subject_id" = Uuid, Path, description = "Subject to enroll into")),
    responses(
        (status = 201, description = "Enrollment created", body = SubjectResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not a student"),
        (status = 404, description = "Unknown subject"),
        (status = 409, description = "Already enrolled")
    ),
    tags = ["subjects"],
    operation_id = "createStudentSubjectEnrollment"
)]
#[post("/subjects/enroll/{subject_id}")]
pub async fn create_student_subject_enrollment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let student = session.require_student()?;
    let subject = state
        .subjects
        .create_student_subject_enrollment(student.student_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(present_subject(subject)))
}

/// Cancel the calling student's enrollment in a subject.
#[utoipa::path(
    post,
    path = "/api/v1/subjects/enroll/{subject_id}/cancel",
    params(("subject_id" = Uuid, Path, description = "Subject to leave")),
    responses(
        (status = 200, description = "Enrollment cancelled", body = MessageResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not a student"),
        (status = 404, description = "Unknown subject"),
        (status = 409, description = "Not enrolled")
    ),
    tags = ["subjects"],
    operation_id = "cancelStudentSubjectEnrollment"
)]
#[post("/subjects/enroll/{subject_id}/cancel")]
pub async fn cancel_student_subject_enrollment(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<MessageResponse>> {
    let student = session.require_student()?;
    state
        .subjects
        .cancel_student_subject_enrollment(student.student_id, path.into_inner())
        .await?;
    Ok(web::Json(MessageResponse::ok(
        "Enrollment successfully canceled",
    )))
}

/// Fetch one subject by id.
#[utoipa::path(
    get,
    path = "/api/v1/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject identifier")),
    responses(
        (status = 200, description = "Subject", body = SubjectResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 404, description = "Unknown subject")
    ),
    tags = ["subjects"],
    operation_id = "getSubject"
)]
#[get("/subjects/{id}")]
pub async fn get_one(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<SubjectResponse>> {
    session.require_identity()?;
    let subject = state.subjects.find_by_id(path.into_inner()).await?;
    Ok(web::Json(present_subject(subject)))
}

/// List subjects.
#[utoipa::path(
    get,
    path = "/api/v1/subjects",
    params(
        ("skip" = Option<u32>, Query, description = "Rows to skip"),
        ("take" = Option<u32>, Query, description = "Rows to return")
    ),
    responses(
        (status = 200, description = "Subjects", body = [SubjectResponse]),
        (status = 401, description = "Unauthenticated")
    ),
    tags = ["subjects"],
    operation_id = "listSubjects"
)]
#[get("/subjects")]
pub async fn list_subjects(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<SubjectResponse>>> {
    session.require_identity()?;
    let subjects = state.subjects.list(params.window()).await?;
    Ok(web::Json(present_subjects(subjects)))
}
