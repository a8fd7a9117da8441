//! Versioned schema migrations. Applied versions are recorded in `_sys_migrations`; each step runs in its own transaction.

use crate::error::AppError;
use sqlx::PgPool;

pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub statements: &'static [&'static str],
}

/// Ordered, append-only. Never edit an applied step; add a new one.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create heroes and powers",
        statements: &[
            r#"
            CREATE TABLE IF NOT EXISTS heroes (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL CHECK (name <> ''),
                super_name TEXT NOT NULL CHECK (super_name <> '')
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS powers (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL CHECK (name <> ''),
                description TEXT NOT NULL
            )
            "#,
        ],
    },
    Migration {
        version: 2,
        name: "create hero_powers",
        statements: &[
            r#"
            CREATE TABLE IF NOT EXISTS hero_powers (
                id BIGSERIAL PRIMARY KEY,
                strength TEXT NOT NULL,
                hero_id BIGINT NOT NULL,
                power_id BIGINT NOT NULL,
                CONSTRAINT fk_hero_powers_hero_id_heroes FOREIGN KEY (hero_id) REFERENCES heroes (id) ON DELETE CASCADE,
                CONSTRAINT fk_hero_powers_power_id_powers FOREIGN KEY (power_id) REFERENCES powers (id) ON DELETE CASCADE
            )
            "#,
            "CREATE INDEX IF NOT EXISTS ix_hero_powers_hero_id ON hero_powers (hero_id)",
            "CREATE INDEX IF NOT EXISTS ix_hero_powers_power_id ON hero_powers (power_id)",
        ],
    },
    Migration {
        version: 3,
        name: "field constraints",
        statements: &[
            "ALTER TABLE powers DROP CONSTRAINT IF EXISTS ck_powers_description_length",
            "ALTER TABLE powers ADD CONSTRAINT ck_powers_description_length CHECK (char_length(description) >= 20) NOT VALID",
            "ALTER TABLE hero_powers DROP CONSTRAINT IF EXISTS ck_hero_powers_strength",
            "ALTER TABLE hero_powers ADD CONSTRAINT ck_hero_powers_strength CHECK (strength IN ('Strong', 'Weak', 'Average')) NOT VALID",
        ],
    },
];

const CREATE_MIGRATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS _sys_migrations (
        version BIGINT PRIMARY KEY,
        name TEXT NOT NULL,
        applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Apply every migration newer than the highest recorded version. Returns the versions applied now.
pub async fn apply_migrations(pool: &PgPool) -> Result<Vec<i64>, AppError> {
    sqlx::query(CREATE_MIGRATIONS_TABLE).execute(pool).await?;
    let (current,): (Option<i64>,) = sqlx::query_as("SELECT MAX(version) FROM _sys_migrations")
        .fetch_one(pool)
        .await?;
    let mut applied = Vec::new();
    for m in pending(MIGRATIONS, current.unwrap_or(0)) {
        let mut tx = pool.begin().await?;
        for sql in m.statements {
            tracing::debug!(sql = %sql, version = m.version, "migration");
            sqlx::query(sql).execute(&mut *tx).await?;
        }
        sqlx::query("INSERT INTO _sys_migrations (version, name) VALUES ($1, $2)")
            .bind(m.version)
            .bind(m.name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(version = m.version, name = m.name, "migration applied");
        applied.push(m.version);
    }
    Ok(applied)
}

fn pending(migrations: &[Migration], current: i64) -> impl Iterator<Item = &Migration> {
    migrations.iter().filter(move |m| m.version > current)
}
