//! In-process store. Cascading deletes are done by hand here since there is no database to do them.

use super::Store;
use crate::error::AppError;
use crate::model::{Hero, HeroPower, HeroPowerDetail, HeroPowerEntry, NewHero, NewHeroPower, NewPower, Power};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    heroes: BTreeMap<i64, Hero>,
    powers: BTreeMap<i64, Power>,
    hero_powers: BTreeMap<i64, HeroPower>,
    last_hero_id: i64,
    last_power_id: i64,
    last_hero_power_id: i64,
}

impl Tables {
    fn detail(&self, hp: &HeroPower) -> Option<HeroPowerDetail> {
        Some(HeroPowerDetail {
            hero_power: hp.clone(),
            hero: self.heroes.get(&hp.hero_id)?.clone(),
            power: self.powers.get(&hp.power_id)?.clone(),
        })
    }
}

/// Ids are assigned sequentially from 1 per table and never reused.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables.read().map_err(|_| AppError::Internal("store lock".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables.write().map_err(|_| AppError::Internal("store lock".into()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError> {
        Ok(self.read()?.heroes.values().cloned().collect())
    }

    async fn get_hero(&self, id: i64) -> Result<Option<Hero>, AppError> {
        Ok(self.read()?.heroes.get(&id).cloned())
    }

    async fn hero_powers_of(&self, hero_id: i64) -> Result<Vec<HeroPowerEntry>, AppError> {
        let t = self.read()?;
        Ok(t.hero_powers
            .values()
            .filter(|hp| hp.hero_id == hero_id)
            .filter_map(|hp| {
                t.powers.get(&hp.power_id).map(|power| HeroPowerEntry {
                    hero_power: hp.clone(),
                    power: power.clone(),
                })
            })
            .collect())
    }

    async fn insert_hero(&self, hero: &NewHero) -> Result<Hero, AppError> {
        let mut t = self.write()?;
        t.last_hero_id += 1;
        let row = Hero {
            id: t.last_hero_id,
            name: hero.name.clone(),
            super_name: hero.super_name.clone(),
        };
        t.heroes.insert(row.id, row.clone());
        Ok(row)
    }

    async fn delete_hero(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.write()?;
        if t.heroes.remove(&id).is_none() {
            return Ok(false);
        }
        t.hero_powers.retain(|_, hp| hp.hero_id != id);
        Ok(true)
    }

    async fn list_powers(&self) -> Result<Vec<Power>, AppError> {
        Ok(self.read()?.powers.values().cloned().collect())
    }

    async fn get_power(&self, id: i64) -> Result<Option<Power>, AppError> {
        Ok(self.read()?.powers.get(&id).cloned())
    }

    async fn insert_power(&self, power: &NewPower) -> Result<Power, AppError> {
        let mut t = self.write()?;
        t.last_power_id += 1;
        let row = Power {
            id: t.last_power_id,
            name: power.name.clone(),
            description: power.description.clone(),
        };
        t.powers.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_power_description(&self, id: i64, description: &str) -> Result<Option<Power>, AppError> {
        let mut t = self.write()?;
        Ok(t.powers.get_mut(&id).map(|p| {
            p.description = description.to_string();
            p.clone()
        }))
    }

    async fn delete_power(&self, id: i64) -> Result<bool, AppError> {
        let mut t = self.write()?;
        if t.powers.remove(&id).is_none() {
            return Ok(false);
        }
        t.hero_powers.retain(|_, hp| hp.power_id != id);
        Ok(true)
    }

    async fn insert_hero_power(&self, new: &NewHeroPower) -> Result<Option<HeroPowerDetail>, AppError> {
        let mut t = self.write()?;
        let hero = t.heroes.get(&new.hero_id).cloned();
        let power = t.powers.get(&new.power_id).cloned();
        let (Some(hero), Some(power)) = (hero, power) else {
            return Ok(None);
        };
        t.last_hero_power_id += 1;
        let hero_power = HeroPower {
            id: t.last_hero_power_id,
            strength: new.strength,
            hero_id: new.hero_id,
            power_id: new.power_id,
        };
        t.hero_powers.insert(hero_power.id, hero_power.clone());
        Ok(Some(HeroPowerDetail { hero_power, hero, power }))
    }

    async fn get_hero_power(&self, id: i64) -> Result<Option<HeroPowerDetail>, AppError> {
        let t = self.read()?;
        Ok(t.hero_powers.get(&id).and_then(|hp| t.detail(hp)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
