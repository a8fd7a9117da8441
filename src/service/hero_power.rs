use crate::error::AppError;
use crate::model::NewHeroPower;
use crate::service::RequestValidator;
use crate::store::Store;
use crate::view::hero_power_view;
use serde_json::Value;
use std::collections::HashMap;

pub const HERO_POWER_NOT_FOUND: &str = "HeroPower not found";

pub struct HeroPowerService;

impl HeroPowerService {
    /// Validate a raw POST body and create the association.
    pub async fn create_from_body(store: &dyn Store, body: &HashMap<String, Value>) -> Result<Value, AppError> {
        let new = RequestValidator::hero_power(body)?;
        Self::create(store, &new).await
    }

    /// Missing hero or power is reported as a validation failure, same as a bad strength.
    pub async fn create(store: &dyn Store, new: &NewHeroPower) -> Result<Value, AppError> {
        let detail = store.insert_hero_power(new).await?.ok_or_else(AppError::validation)?;
        tracing::info!(
            hero_power_id = detail.hero_power.id,
            hero_id = new.hero_id,
            power_id = new.power_id,
            strength = %new.strength,
            "hero_power created"
        );
        Ok(hero_power_view(&detail, None))
    }

    pub async fn get(store: &dyn Store, id: i64) -> Result<Value, AppError> {
        let detail = store
            .get_hero_power(id)
            .await?
            .ok_or_else(|| AppError::NotFound(HERO_POWER_NOT_FOUND.into()))?;
        Ok(hero_power_view(&detail, None))
    }
}
