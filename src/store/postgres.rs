//! PostgreSQL store. Cascading deletes come from the `ON DELETE CASCADE` foreign keys created by migrations.

use super::Store;
use crate::error::AppError;
use crate::model::{Hero, HeroPower, HeroPowerDetail, HeroPowerEntry, NewHero, NewHeroPower, NewPower, Power};
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const SELECT_HEROES: &str = "SELECT id, name, super_name FROM heroes ORDER BY id";
const SELECT_HERO: &str = "SELECT id, name, super_name FROM heroes WHERE id = $1";
const SELECT_POWERS: &str = "SELECT id, name, description FROM powers ORDER BY id";
const SELECT_POWER: &str = "SELECT id, name, description FROM powers WHERE id = $1";

const SELECT_HERO_POWERS_OF: &str = r#"
    SELECT hp.id, hp.strength, hp.hero_id, hp.power_id,
           p.name AS power_name, p.description AS power_description
    FROM hero_powers hp
    JOIN powers p ON p.id = hp.power_id
    WHERE hp.hero_id = $1
    ORDER BY hp.id
"#;

const SELECT_HERO_POWER_DETAIL: &str = r#"
    SELECT hp.id, hp.strength, hp.hero_id, hp.power_id,
           h.name AS hero_name, h.super_name AS hero_super_name,
           p.name AS power_name, p.description AS power_description
    FROM hero_powers hp
    JOIN heroes h ON h.id = hp.hero_id
    JOIN powers p ON p.id = hp.power_id
    WHERE hp.id = $1
"#;

#[derive(sqlx::FromRow)]
struct HeroPowerRow {
    id: i64,
    strength: String,
    hero_id: i64,
    power_id: i64,
}

impl TryFrom<HeroPowerRow> for HeroPower {
    type Error = AppError;

    fn try_from(row: HeroPowerRow) -> Result<Self, Self::Error> {
        let strength = row
            .strength
            .parse()
            .map_err(|_| AppError::Internal(format!("hero_power {} has invalid strength '{}'", row.id, row.strength)))?;
        Ok(HeroPower {
            id: row.id,
            strength,
            hero_id: row.hero_id,
            power_id: row.power_id,
        })
    }
}

#[derive(sqlx::FromRow)]
struct HeroPowerEntryRow {
    #[sqlx(flatten)]
    hero_power: HeroPowerRow,
    power_name: String,
    power_description: String,
}

#[derive(sqlx::FromRow)]
struct HeroPowerDetailRow {
    #[sqlx(flatten)]
    hero_power: HeroPowerRow,
    hero_name: String,
    hero_super_name: String,
    power_name: String,
    power_description: String,
}

impl TryFrom<HeroPowerEntryRow> for HeroPowerEntry {
    type Error = AppError;

    fn try_from(row: HeroPowerEntryRow) -> Result<Self, Self::Error> {
        let hero_power = HeroPower::try_from(row.hero_power)?;
        let power = Power {
            id: hero_power.power_id,
            name: row.power_name,
            description: row.power_description,
        };
        Ok(HeroPowerEntry { hero_power, power })
    }
}

impl TryFrom<HeroPowerDetailRow> for HeroPowerDetail {
    type Error = AppError;

    fn try_from(row: HeroPowerDetailRow) -> Result<Self, Self::Error> {
        let hero_power = HeroPower::try_from(row.hero_power)?;
        let hero = Hero {
            id: hero_power.hero_id,
            name: row.hero_name,
            super_name: row.hero_super_name,
        };
        let power = Power {
            id: hero_power.power_id,
            name: row.power_name,
            description: row.power_description,
        };
        Ok(HeroPowerDetail { hero_power, hero, power })
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_heroes(&self) -> Result<Vec<Hero>, AppError> {
        tracing::debug!(sql = %SELECT_HEROES, "query");
        let rows = sqlx::query_as::<_, Hero>(SELECT_HEROES).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_hero(&self, id: i64) -> Result<Option<Hero>, AppError> {
        tracing::debug!(sql = %SELECT_HERO, id, "query");
        let row = sqlx::query_as::<_, Hero>(SELECT_HERO)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn hero_powers_of(&self, hero_id: i64) -> Result<Vec<HeroPowerEntry>, AppError> {
        tracing::debug!(sql = %SELECT_HERO_POWERS_OF, hero_id, "query");
        let rows = sqlx::query_as::<_, HeroPowerEntryRow>(SELECT_HERO_POWERS_OF)
            .bind(hero_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(HeroPowerEntry::try_from).collect()
    }

    async fn insert_hero(&self, hero: &NewHero) -> Result<Hero, AppError> {
        let sql = "INSERT INTO heroes (name, super_name) VALUES ($1, $2) RETURNING id, name, super_name";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Hero>(sql)
            .bind(&hero.name)
            .bind(&hero.super_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_hero(&self, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM heroes WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }

    async fn list_powers(&self) -> Result<Vec<Power>, AppError> {
        tracing::debug!(sql = %SELECT_POWERS, "query");
        let rows = sqlx::query_as::<_, Power>(SELECT_POWERS).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_power(&self, id: i64) -> Result<Option<Power>, AppError> {
        tracing::debug!(sql = %SELECT_POWER, id, "query");
        let row = sqlx::query_as::<_, Power>(SELECT_POWER)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_power(&self, power: &NewPower) -> Result<Power, AppError> {
        let sql = "INSERT INTO powers (name, description) VALUES ($1, $2) RETURNING id, name, description";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Power>(sql)
            .bind(&power.name)
            .bind(&power.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_power_description(&self, id: i64, description: &str) -> Result<Option<Power>, AppError> {
        let sql = "UPDATE powers SET description = $2 WHERE id = $1 RETURNING id, name, description";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Power>(sql)
            .bind(id)
            .bind(description)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_power(&self, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM powers WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let done = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(done.rows_affected() > 0)
    }

    async fn insert_hero_power(&self, new: &NewHeroPower) -> Result<Option<HeroPowerDetail>, AppError> {
        let mut tx = self.pool.begin().await?;
        // FOR SHARE keeps both parents alive until commit.
        let hero = sqlx::query_as::<_, Hero>("SELECT id, name, super_name FROM heroes WHERE id = $1 FOR SHARE")
            .bind(new.hero_id)
            .fetch_optional(&mut *tx)
            .await?;
        let power = sqlx::query_as::<_, Power>("SELECT id, name, description FROM powers WHERE id = $1 FOR SHARE")
            .bind(new.power_id)
            .fetch_optional(&mut *tx)
            .await?;
        let (Some(hero), Some(power)) = (hero, power) else {
            tracing::debug!(hero_id = new.hero_id, power_id = new.power_id, "hero_power references missing row");
            tx.rollback().await?;
            return Ok(None);
        };
        let sql = "INSERT INTO hero_powers (strength, hero_id, power_id) VALUES ($1, $2, $3) RETURNING id, strength, hero_id, power_id";
        tracing::debug!(sql = %sql, "query (tx)");
        let row = sqlx::query_as::<_, HeroPowerRow>(sql)
            .bind(new.strength.as_str())
            .bind(new.hero_id)
            .bind(new.power_id)
            .fetch_one(&mut *tx)
            .await?;
        let hero_power = HeroPower::try_from(row)?;
        tx.commit().await?;
        Ok(Some(HeroPowerDetail { hero_power, hero, power }))
    }

    async fn get_hero_power(&self, id: i64) -> Result<Option<HeroPowerDetail>, AppError> {
        tracing::debug!(sql = %SELECT_HERO_POWER_DETAIL, id, "query");
        let row = sqlx::query_as::<_, HeroPowerDetailRow>(SELECT_HERO_POWER_DETAIL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(HeroPowerDetail::try_from).transpose()
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create the database named in `database_url` if it does not exist (connects to the `postgres` admin db).
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_swaps_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/hero_powers?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "hero_powers");
    }

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn invalid_strength_row_is_internal_error() {
        let row = HeroPowerRow {
            id: 3,
            strength: "Mighty".into(),
            hero_id: 1,
            power_id: 1,
        };
        assert!(matches!(HeroPower::try_from(row), Err(AppError::Internal(_))));
    }
}
