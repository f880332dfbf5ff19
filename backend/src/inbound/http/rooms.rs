//! Room HTTP handlers, admin only.
//!
//! ```text
//! POST /api/v1/rooms
//! GET  /api/v1/rooms/{id}
//! GET  /api/v1/rooms
//! ```

use actix_web::{get, post, web, HttpResponse};
use pagination::PageParams;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{AccountType, NewRoom};
use crate::inbound::http::presenters::{present_room, present_rooms, RoomResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Request payload for room creation.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomBody {
    /// Room number.
    pub number: i32,
    /// Seating capacity; defaults to 40 when omitted.
    #[serde(default)]
    pub capacity: Option<i32>,
    /// Specifications to attach.
    #[serde(default)]
    pub specification_ids: Vec<Uuid>,
}

/// Create a room.
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    request_body = CreateRoomBody,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Unknown specification")
    ),
    tags = ["rooms"],
    operation_id = "createRoom"
)]
#[post("/rooms")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Json<CreateRoomBody>,
) -> ApiResult<HttpResponse> {
    session.require_account(AccountType::Admin)?;
    let body = body.into_inner();
    let room = state
        .rooms
        .create(NewRoom {
            number: body.number,
            capacity: body.capacity,
            specification_ids: body.specification_ids,
        })
        .await?;
    Ok(HttpResponse::Created().json(present_room(room)))
}

/// Fetch one room by id.
#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room identifier")),
    responses(
        (status = 200, description = "Room", body = RoomResponse),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Unknown room")
    ),
    tags = ["rooms"],
    operation_id = "getRoom"
)]
#[get("/rooms/{id}")]
pub async fn get_one(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<RoomResponse>> {
    session.require_account(AccountType::Admin)?;
    let room = state.rooms.find_by_id(path.into_inner()).await?;
    Ok(web::Json(present_room(room)))
}

/// List rooms.
#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    params(
        ("skip" = Option<u32>, Query, description = "Rows to skip"),
        ("take" = Option<u32>, Query, description = "Rows to return")
    ),
    responses(
        (status = 200, description = "Rooms", body = [RoomResponse]),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Not an admin")
    ),
    tags = ["rooms"],
    operation_id = "listRooms"
)]
#[get("/rooms")]
pub async fn list_rooms(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<RoomResponse>>> {
    session.require_account(AccountType::Admin)?;
    let rooms = state.rooms.list(params.window()).await?;
    Ok(web::Json(present_rooms(rooms)))
}
