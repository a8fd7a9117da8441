//! Resource routes for heroes, powers and hero_powers.

use crate::handlers::{hero, hero_power, power};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/heroes", get(hero::list))
        .route("/heroes/:id", get(hero::read).delete(hero::delete))
        .route("/powers", get(power::list))
        .route("/powers/:id", get(power::read).patch(power::update).delete(power::delete))
        .route("/hero_powers", post(hero_power::create))
        .route("/hero_powers/:id", get(hero_power::read))
        .with_state(state)
}
