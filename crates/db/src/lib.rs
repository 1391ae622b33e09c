//! PostgreSQL persistence for the movie catalog.
//!
//! [`create_pool`] is the connection provider: every repository call checks
//! a connection out of the pool for the duration of that call only.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Default upper bound on pooled connections.
const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Load database settings from the environment.
    ///
    /// | Env Var              | Required | Default |
    /// |----------------------|----------|---------|
    /// | `DATABASE_URL`       | **yes**  | --      |
    /// | `DB_MAX_CONNECTIONS` | no       | `20`    |
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is missing or `DB_MAX_CONNECTIONS` is not a number.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| DEFAULT_MAX_CONNECTIONS.to_string())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            database_url,
            max_connections,
        }
    }
}

/// Create a connection pool from the given settings.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
