//! GET /powers, GET|PATCH|DELETE /powers/:id.

use super::{body_to_map, parse_id};
use crate::error::AppError;
use crate::service::{PowerService, POWER_NOT_FOUND};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let powers = PowerService::list(state.store.as_ref()).await?;
    Ok(Json(powers))
}

pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, POWER_NOT_FOUND)?;
    let power = PowerService::get(state.store.as_ref(), id).await?;
    Ok(Json(power))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, POWER_NOT_FOUND)?;
    let power = PowerService::update(state.store.as_ref(), id, body_to_map(body)).await?;
    Ok(Json(power))
}

pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, POWER_NOT_FOUND)?;
    PowerService::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
