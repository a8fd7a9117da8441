use crate::error::AppError;
use crate::model::{Hero, NewHero};
use crate::service::RequestValidator;
use crate::store::Store;
use crate::view::{hero_view, HERO_SUMMARY_FIELDS};
use serde_json::Value;

pub const HERO_NOT_FOUND: &str = "Hero not found";

pub struct HeroService;

impl HeroService {
    /// All heroes as `{id, name, super_name}`, ordered by id.
    pub async fn list(store: &dyn Store) -> Result<Vec<Value>, AppError> {
        let heroes = store.list_heroes().await?;
        Ok(heroes
            .iter()
            .map(|h| hero_view(h, None, Some(HERO_SUMMARY_FIELDS)))
            .collect())
    }

    /// One hero with its nested `hero_powers`.
    pub async fn get(store: &dyn Store, id: i64) -> Result<Value, AppError> {
        let hero = store
            .get_hero(id)
            .await?
            .ok_or_else(|| AppError::NotFound(HERO_NOT_FOUND.into()))?;
        let entries = store.hero_powers_of(hero.id).await?;
        Ok(hero_view(&hero, Some(entries.as_slice()), None))
    }

    pub async fn create(store: &dyn Store, new: &NewHero) -> Result<Hero, AppError> {
        RequestValidator::new_hero(new)?;
        let hero = store.insert_hero(new).await?;
        tracing::info!(hero_id = hero.id, "hero created");
        Ok(hero)
    }

    /// Removes the hero and every hero_power that references it.
    pub async fn delete(store: &dyn Store, id: i64) -> Result<(), AppError> {
        if !store.delete_hero(id).await? {
            return Err(AppError::NotFound(HERO_NOT_FOUND.into()));
        }
        tracing::info!(hero_id = id, "hero deleted");
        Ok(())
    }
}
