//! Contract CRUD routes. Every response carries the status derived from
//! today's date.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::contract::{self, ContractInput, ContractView};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContractQuery {
    pub room_id: Option<Uuid>,
}

/// `GET /api/contracts?room_id=`
pub async fn list_contracts(
    State(state): State<AppState>,
    Query(query): Query<ContractQuery>,
) -> Result<Json<Vec<ContractView>>, ApiError> {
    let contracts = contract::list_contracts(state.db()?, query.room_id).await?;
    let today = contract::today();
    Ok(Json(contracts.into_iter().map(|c| c.view(today)).collect()))
}

/// `POST /api/contracts`
pub async fn create_contract(
    State(state): State<AppState>,
    body: Result<Json<ContractInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ContractView>), ApiError> {
    let Json(body) = body?;
    let pool = state.db()?;
    let created = contract::create_contract(pool, body.into_new()?).await?;
    Ok((StatusCode::CREATED, Json(created.view(contract::today()))))
}

/// `GET /api/contracts/{id}`
pub async fn get_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContractView>, ApiError> {
    let found = contract::get_contract(state.db()?, id).await?;
    Ok(Json(found.view(contract::today())))
}

/// `PUT /api/contracts/{id}` — update the provided fields.
pub async fn update_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Result<Json<ContractInput>, JsonRejection>,
) -> Result<Json<ContractView>, ApiError> {
    let Json(body) = body?;
    let updated = contract::update_contract(state.db()?, id, body).await?;
    Ok(Json(updated.view(contract::today())))
}

/// `DELETE /api/contracts/{id}`
pub async fn delete_contract(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    contract::delete_contract(state.db()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
