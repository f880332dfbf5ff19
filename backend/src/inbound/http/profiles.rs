//! Profile HTTP handlers.
//!
//! ```text
//! POST   /api/v1/profiles
//! POST   /api/v1/profiles/auth
//! GET    /api/v1/profiles/me
//! GET    /api/v1/profiles
//! DELETE /api/v1/profiles
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use pagination::PageParams;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{AccountType, NewProfile};
use crate::inbound::http::presenters::{
    present_profile, present_profiles, MessageResponse, ProfileResponse,
};
use crate::inbound::http::session::{SessionContext, SessionIdentity};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_non_empty;
use crate::inbound::http::ApiResult;

/// Request payload for profile creation.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileBody {
    /// Display name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Requested account category.
    pub account_type: AccountType,
}

/// Request payload for authentication.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthBody {
    /// Login e-mail.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Create a profile. Open endpoint: this is how accounts come to exist.
#[utoipa::path(
    post,
    path = "/api/v1/profiles",
    request_body = CreateProfileBody,
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "E-mail already registered")
    ),
    tags = ["profiles"],
    operation_id = "createProfile"
)]
#[post("/profiles")]
pub async fn create(
    state: web::Data<HttpState>,
    body: web::Json<CreateProfileBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    require_non_empty(&body.name, "name")?;
    require_non_empty(&body.email, "email")?;
    require_non_empty(&body.password, "password")?;

    let profile = state
        .profiles
        .create(NewProfile {
            name: body.name,
            email: body.email,
            password: body.password,
            account_type: body.account_type,
        })
        .await?;
    Ok(HttpResponse::Created().json(present_profile(profile)))
}

/// Authenticate and start a cookie session.
#[utoipa::path(
    post,
    path = "/api/v1/profiles/auth",
    request_body = AuthBody,
    responses(
        (status = 200, description = "Authenticated", body = ProfileResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tags = ["profiles"],
    operation_id = "authenticateProfile"
)]
#[post("/profiles/auth")]
pub async fn authenticate(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<AuthBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let profile = state.profiles.authenticate(&body.email, &body.password).await?;

    session.persist_identity(&SessionIdentity {
        profile_id: profile.id,
        account_type: profile.account_type,
        student_id: profile.student.as_ref().map(|student| student.id),
    })?;
    Ok(HttpResponse::Ok().json(present_profile(profile)))
}

/// Return the caller's own profile.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/me",
    responses(
        (status = 200, description = "Own profile", body = ProfileResponse),
        (status = 401, description = "Unauthenticated")
    ),
    tags = ["profiles"],
    operation_id = "ownProfile"
)]
#[get("/profiles/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let identity = session.require_identity()?;
    let profile = state.profiles.find_by_id(identity.profile_id).await?;
    Ok(web::Json(present_profile(profile)))
}

/// List profiles, admin only.
#[utoipa::path(
    get,
    path = "/api/v1/profiles",
    params(
        ("skip" = Option<u32>, Query, description = "Rows to skip"),
        ("take" = Option<u32>, Query, description = "Rows to return")
    ),
    responses(
        (status = 200, description = "Profiles", body = [ProfileResponse]),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an admin")
    ),
    tags = ["profiles"],
    operation_id = "listProfiles"
)]
#[get("/profiles")]
pub async fn list_profiles(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<ProfileResponse>>> {
    session.require_account(AccountType::Admin)?;
    let profiles = state.profiles.list(params.window()).await?;
    Ok(web::Json(present_profiles(profiles)))
}

/// Delete the caller's own profile and end the session.
#[utoipa::path(
    delete,
    path = "/api/v1/profiles",
    responses(
        (status = 200, description = "Profile deleted", body = MessageResponse),
        (status = 401, description = "Unauthenticated")
    ),
    tags = ["profiles"],
    operation_id = "deleteProfile"
)]
#[delete("/profiles")]
pub async fn delete_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MessageResponse>> {
    let identity = session.require_identity()?;
    state.profiles.delete(identity.profile_id).await?;
    session.purge();
    Ok(web::Json(MessageResponse::ok("Profile successfully deleted")))
}
