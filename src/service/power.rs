use crate::error::AppError;
use crate::model::{NewPower, Power};
use crate::service::{validate_description, RequestValidator};
use crate::store::Store;
use crate::view::power_view;
use serde_json::Value;
use std::collections::HashMap;

pub const POWER_NOT_FOUND: &str = "Power not found";

pub struct PowerService;

impl PowerService {
    pub async fn list(store: &dyn Store) -> Result<Vec<Value>, AppError> {
        let powers = store.list_powers().await?;
        Ok(powers.iter().map(|p| power_view(p, None)).collect())
    }

    pub async fn get(store: &dyn Store, id: i64) -> Result<Value, AppError> {
        let power = store
            .get_power(id)
            .await?
            .ok_or_else(|| AppError::NotFound(POWER_NOT_FOUND.into()))?;
        Ok(power_view(&power, None))
    }

    /// PATCH semantics: only `description` is read from the body. A missing power is reported
    /// before anything about the body, including a body that failed to parse.
    pub async fn update(
        store: &dyn Store,
        id: i64,
        body: Result<HashMap<String, Value>, AppError>,
    ) -> Result<Value, AppError> {
        if store.get_power(id).await?.is_none() {
            return Err(AppError::NotFound(POWER_NOT_FOUND.into()));
        }
        let description = RequestValidator::description(&body?)?;
        let power = Self::set_description(store, id, &description).await?;
        Ok(power_view(&power, None))
    }

    /// Validate then write a new description; on failure the stored row is untouched.
    pub async fn set_description(store: &dyn Store, id: i64, description: &str) -> Result<Power, AppError> {
        validate_description(description)?;
        let power = store
            .update_power_description(id, description)
            .await?
            .ok_or_else(|| AppError::NotFound(POWER_NOT_FOUND.into()))?;
        tracing::info!(power_id = id, "power description updated");
        Ok(power)
    }

    pub async fn create(store: &dyn Store, new: &NewPower) -> Result<Power, AppError> {
        RequestValidator::new_power(new)?;
        let power = store.insert_power(new).await?;
        tracing::info!(power_id = power.id, "power created");
        Ok(power)
    }

    /// Removes the power and every hero_power that references it.
    pub async fn delete(store: &dyn Store, id: i64) -> Result<(), AppError> {
        if !store.delete_power(id).await? {
            return Err(AppError::NotFound(POWER_NOT_FOUND.into()));
        }
        tracing::info!(power_id = id, "power deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    const FLIGHT: &str = "gives the wielder the ability to fly through the skies at supersonic speed";

    async fn flight(store: &MemoryStore) -> Power {
        PowerService::create(
            store,
            &NewPower {
                name: "flight".into(),
                description: FLIGHT.into(),
            },
        )
        .await
        .unwrap()
    }

    fn body(v: Value) -> HashMap<String, Value> {
        match v {
            Value::Object(m) => m.into_iter().collect(),
            _ => panic!("object expected"),
        }
    }

    #[tokio::test]
    async fn short_description_leaves_power_unchanged() {
        let store = MemoryStore::new();
        let power = flight(&store).await;
        for short in ["", "short", "nineteen characters"] {
            let r = PowerService::update(&store, power.id, Ok(body(json!({"description": short})))).await;
            assert!(matches!(r, Err(AppError::Validation(_))), "{short:?} accepted");
        }
        let stored = store.get_power(power.id).await.unwrap().unwrap();
        assert_eq!(stored.description, FLIGHT);
    }

    #[tokio::test]
    async fn update_returns_new_view() {
        let store = MemoryStore::new();
        let power = flight(&store).await;
        let v = PowerService::update(&store, power.id, Ok(body(json!({"description": "twenty characters!!!"}))))
            .await
            .unwrap();
        assert_eq!(v, json!({"id": power.id, "name": "flight", "description": "twenty characters!!!"}));
        assert_eq!(PowerService::get(&store, power.id).await.unwrap(), v);
    }

    #[tokio::test]
    async fn update_missing_power_is_not_found_even_with_bad_body() {
        let store = MemoryStore::new();
        let r = PowerService::update(&store, 3, Ok(body(json!({"description": "x"})))).await;
        match r {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Power not found"),
            other => panic!("unexpected: {other:?}"),
        }
        let r = PowerService::update(&store, 3, Err(AppError::validation())).await;
        assert!(matches!(r, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_enforces_description_length() {
        let store = MemoryStore::new();
        let r = PowerService::create(
            &store,
            &NewPower {
                name: "blink".into(),
                description: "teleports".into(),
            },
        )
        .await;
        assert!(matches!(r, Err(AppError::Validation(_))));
        assert!(PowerService::list(&store).await.unwrap().is_empty());
    }
}
