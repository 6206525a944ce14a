//! Room CRUD routes.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::room::{self, Room, RoomInput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoomQuery {
    pub floor: Option<String>,
}

/// `GET /api/rooms?floor=` — list rooms, optionally for one floor.
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<RoomQuery>,
) -> Result<Json<Vec<Room>>, ApiError> {
    let rooms = room::list_rooms(state.db()?, query.floor.as_deref()).await?;
    Ok(Json(rooms))
}

/// `POST /api/rooms` — create a room.
pub async fn create_room(
    State(state): State<AppState>,
    body: Result<Json<RoomInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    let Json(body) = body?;
    let pool = state.db()?;
    let created = room::create_room(pool, body.into_new()?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/rooms/{id}`
pub async fn get_room(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Room>, ApiError> {
    Ok(Json(room::get_room(state.db()?, id).await?))
}

/// `PUT /api/rooms/{id}` — update the provided fields.
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<RoomInput>, JsonRejection>,
) -> Result<Json<Room>, ApiError> {
    let Json(body) = body?;
    Ok(Json(room::update_room(state.db()?, id, body).await?))
}

/// `DELETE /api/rooms/{id}`
pub async fn delete_room(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    room::delete_room(state.db()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
