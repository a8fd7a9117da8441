//! Persistence seam. `PgStore` is the production backend; `MemoryStore` serves tests and local runs.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{Hero, HeroPowerDetail, HeroPowerEntry, NewHero, NewHeroPower, NewPower, Power};
use async_trait::async_trait;

/// Row-level access to heroes, powers and hero_powers. Every method is a single transaction.
/// Deleting a hero or power also removes every hero_power referencing it.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError>;
    async fn get_hero(&self, id: i64) -> Result<Option<Hero>, AppError>;
    /// Associations of a hero, each with its power, ordered by association id.
    async fn hero_powers_of(&self, hero_id: i64) -> Result<Vec<HeroPowerEntry>, AppError>;
    async fn insert_hero(&self, hero: &NewHero) -> Result<Hero, AppError>;
    /// Returns false when no hero had that id.
    async fn delete_hero(&self, id: i64) -> Result<bool, AppError>;

    async fn list_powers(&self) -> Result<Vec<Power>, AppError>;
    async fn get_power(&self, id: i64) -> Result<Option<Power>, AppError>;
    async fn insert_power(&self, power: &NewPower) -> Result<Power, AppError>;
    /// Returns None when no power had that id.
    async fn update_power_description(&self, id: i64, description: &str) -> Result<Option<Power>, AppError>;
    async fn delete_power(&self, id: i64) -> Result<bool, AppError>;

    /// Inserts the association if both referenced rows exist; returns None (and writes nothing) otherwise.
    async fn insert_hero_power(&self, new: &NewHeroPower) -> Result<Option<HeroPowerDetail>, AppError>;
    async fn get_hero_power(&self, id: i64) -> Result<Option<HeroPowerDetail>, AppError>;

    /// Readiness check for the backing database.
    async fn ping(&self) -> Result<(), AppError>;
}
