use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        let database = Self { pool };
        database.ensure_schema().await?;

        Ok(database)
    }

    /// Private in-memory store. A single connection that never expires, since
    /// each SQLite memory connection is its own database.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let database = Self { pool };
        database.ensure_schema().await?;

        Ok(database)
    }

    /// Creates the tables if they are absent.
    async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        log::info!("🔧 Ensuring database schema...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                username      TEXT    NOT NULL UNIQUE,
                email         TEXT    NOT NULL UNIQUE,
                password_hash TEXT    NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT    NOT NULL,
                description TEXT    NOT NULL,
                price       REAL    NOT NULL CHECK (price >= 0),
                image_url   TEXT    NOT NULL,
                stock       INTEGER NOT NULL DEFAULT 10
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS orders (
                id                 INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id            INTEGER NOT NULL REFERENCES users (id),
                total_amount       REAL    NOT NULL,
                shipping_info_json TEXT    NOT NULL,
                products_json      TEXT    NOT NULL,
                payment_status     TEXT    NOT NULL DEFAULT 'pending',
                order_date         TEXT    NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        log::info!("✅ Database schema ready");

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
