//! POST /hero_powers, GET /hero_powers/:id.

use super::{body_to_map, parse_id};
use crate::error::AppError;
use crate::service::{HeroPowerService, HERO_POWER_NOT_FOUND};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// Responds 200 (not 201) with the nested view.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = body_to_map(body)?;
    let hero_power = HeroPowerService::create_from_body(state.store.as_ref(), &body).await?;
    Ok(Json(hero_power))
}

pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, HERO_POWER_NOT_FOUND)?;
    let hero_power = HeroPowerService::get(state.store.as_ref(), id).await?;
    Ok(Json(hero_power))
}
