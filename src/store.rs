//! Database bootstrap: create the database if missing, open the pool, create tables.

use crate::config::AppConfig;
use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Application tables, in foreign-key dependency order.
const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS categories_name_key ON categories (upper(btrim(name)))",
    r#"
    CREATE TABLE IF NOT EXISTS countries (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    "CREATE UNIQUE INDEX IF NOT EXISTS countries_name_key ON countries (upper(btrim(name)))",
    r#"
    CREATE TABLE IF NOT EXISTS owners (
        id SERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        gym TEXT NOT NULL,
        country_id INTEGER NOT NULL REFERENCES countries (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pokemon (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        birth_date TIMESTAMP NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pokemon_owners (
        pokemon_id INTEGER NOT NULL REFERENCES pokemon (id) ON DELETE CASCADE,
        owner_id INTEGER NOT NULL REFERENCES owners (id) ON DELETE CASCADE,
        PRIMARY KEY (pokemon_id, owner_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pokemon_categories (
        pokemon_id INTEGER NOT NULL REFERENCES pokemon (id) ON DELETE CASCADE,
        category_id INTEGER NOT NULL REFERENCES categories (id) ON DELETE CASCADE,
        PRIMARY KEY (pokemon_id, category_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviewers (
        id SERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id SERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        text TEXT NOT NULL,
        rating INTEGER NOT NULL,
        pokemon_id INTEGER NOT NULL REFERENCES pokemon (id),
        reviewer_id INTEGER NOT NULL REFERENCES reviewers (id)
    )
    "#,
];

/// Open the pool with `search_path` pinned to the configured schema.
pub async fn connect(config: &AppConfig) -> Result<PgPool, AppError> {
    let opts = PgConnectOptions::from_str(&config.database_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?
        .options([("search_path", config.schema.as_str())]);
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Create the schema and every application table if missing. Idempotent.
pub async fn ensure_tables(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(schema = %schema, tables = TABLES.len(), "tables ensured");
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if it does not exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let Some(db_name) = target_database(&opts) else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = opts.database("postgres").connect().await?;
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

/// True when the error is a PostgreSQL unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|e| e.code())
        .map(|code| code == UNIQUE_VIOLATION)
        .unwrap_or(false)
}

/// Database named in the URL path, unless absent or the maintenance database itself.
fn target_database(opts: &PgConnectOptions) -> Option<String> {
    opts.get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "postgres")
        .map(str::to_owned)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
