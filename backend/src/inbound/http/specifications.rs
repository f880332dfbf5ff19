//! Specification HTTP handlers, admin only.
//!
//! ```text
//! POST   /api/v1/specifications
//! DELETE /api/v1/specifications/{specification_id}
//! GET    /api/v1/specifications
//! ```

use actix_web::{delete, get, post, web, HttpResponse};
use pagination::PageParams;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::AccountType;
use crate::inbound::http::presenters::{
    present_specification, present_specifications, MessageResponse, SpecificationResponse,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_non_empty;
use crate::inbound::http::ApiResult;

/// Request payload for specification creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSpecificationBody {
    /// Amenity name.
    pub name: String,
}

/// Create a specification.
#[utoipa::path(
    post,
    path = "/api/v1/specifications",
    request_body = CreateSpecificationBody,
    responses(
        (status = 201, description = "Specification created", body = SpecificationResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an admin")
    ),
    tags = ["specifications"],
    operation_id = "createSpecification"
)]
#[post("/specifications")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<CreateSpecificationBody>,
) -> ApiResult<HttpResponse> {
    session.require_account(AccountType::Admin)?;
    let body = body.into_inner();
    require_non_empty(&body.name, "name")?;

    let specification = state.specifications.create(body.name).await?;
    Ok(HttpResponse::Created().json(present_specification(specification)))
}

/// Delete a specification.
#[utoipa::path(
    delete,
    path = "/api/v1/specifications/{specification_id}",
    params(("specification_id" = Uuid, Path, description = "Specification identifier")),
    responses(
        (status = 200, description = "Specification deleted", body = MessageResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Unknown specification")
    ),
    tags = ["specifications"],
    operation_id = "deleteSpecification"
)]
#[delete("/specifications/{specification_id}")]
pub async fn delete_specification(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<MessageResponse>> {
    session.require_account(AccountType::Admin)?;
    state.specifications.delete(path.into_inner()).await?;
    Ok(web::Json(MessageResponse::ok(
        "Specification successfully deleted",
    )))
}

/// List specifications.
#[utoipa::path(
    get,
    path = "/api/v1/specifications",
    params(
        ("skip" = Option<u32>, Query, description = "Rows to skip"),
        ("take" = Option<u32>, Query, description = "Rows to return")
    ),
    responses(
        (status = 200, description = "Specifications", body = [SpecificationResponse]),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an admin")
    ),
    tags = ["specifications"],
    operation_id = "listSpecifications"
)]
#[get("/specifications")]
pub async fn list_specifications(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<SpecificationResponse>>> {
    session.require_account(AccountType::Admin)?;
    let specifications = state.specifications.list(params.window()).await?;
    Ok(web::Json(present_specifications(specifications)))
}
