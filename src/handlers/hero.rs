//! GET /heroes, GET /heroes/:id, DELETE /heroes/:id.

use super::parse_id;
use crate::error::AppError;
use crate::service::{HeroService, HERO_NOT_FOUND};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let heroes = HeroService::list(state.store.as_ref()).await?;
    Ok(Json(heroes))
}

pub async fn read(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, HERO_NOT_FOUND)?;
    let hero = HeroService::get(state.store.as_ref(), id).await?;
    Ok(Json(hero))
}

pub async fn delete(State(state): State<AppState>, Path(id_str): Path<String>) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, HERO_NOT_FOUND)?;
    HeroService::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
