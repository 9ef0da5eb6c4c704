use super::{saved, OWNER_COLUMNS};
use crate::error::AppError;
use crate::model::{Country, Owner};
use crate::store::is_unique_violation;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Country>, AppError>;
    async fn get(&self, id: i32) -> Result<Option<Country>, AppError>;
    async fn exists(&self, id: i32) -> Result<bool, AppError>;
    /// Country the owner belongs to; `None` when the owner is unknown.
    async fn country_by_owner(&self, owner_id: i32) -> Result<Option<Country>, AppError>;
    async fn owners_from_country(&self, country_id: i32) -> Result<Vec<Owner>, AppError>;
    async fn create(&self, country: &Country) -> Result<bool, AppError>;
    async fn update(&self, country: &Country) -> Result<bool, AppError>;
    async fn delete(&self, country: &Country) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgCountryRepository {
    pool: PgPool,
}

impl PgCountryRepository {
    pub fn new(pool: PgPool) -> Self {
        PgCountryRepository { pool }
    }
}

fn name_conflict(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::unprocessable("Country already exists")
    } else {
        AppError::Db(e)
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn list(&self) -> Result<Vec<Country>, AppError> {
        let sql = "SELECT id, name FROM countries ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Country>(sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Country>, AppError> {
        let sql = "SELECT id, name FROM countries WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Country>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM countries WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn country_by_owner(&self, owner_id: i32) -> Result<Option<Country>, AppError> {
        let sql = "SELECT c.id, c.name FROM countries c JOIN owners o ON o.country_id = c.id WHERE o.id = $1";
        tracing::debug!(sql = %sql, owner_id, "query");
        Ok(sqlx::query_as::<_, Country>(sql)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn owners_from_country(&self, country_id: i32) -> Result<Vec<Owner>, AppError> {
        let sql = format!(
            "SELECT {} FROM owners o WHERE o.country_id = $1 ORDER BY o.id",
            OWNER_COLUMNS
        );
        tracing::debug!(sql = %sql, country_id, "query");
        Ok(sqlx::query_as::<_, Owner>(&sql)
            .bind(country_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create(&self, country: &Country) -> Result<bool, AppError> {
        let sql = "INSERT INTO countries (name) VALUES ($1)";
        tracing::debug!(sql = %sql, name = %country.name, "execute");
        let result = sqlx::query(sql)
            .bind(&country.name)
            .execute(&self.pool)
            .await
            .map_err(name_conflict)?;
        Ok(saved(result))
    }

    async fn update(&self, country: &Country) -> Result<bool, AppError> {
        let sql = "UPDATE countries SET name = $2 WHERE id = $1";
        tracing::debug!(sql = %sql, id = country.id, "execute");
        let result = sqlx::query(sql)
            .bind(country.id)
            .bind(&country.name)
            .execute(&self.pool)
            .await
            .map_err(name_conflict)?;
        Ok(saved(result))
    }

    async fn delete(&self, country: &Country) -> Result<bool, AppError> {
        let sql = "DELETE FROM countries WHERE id = $1";
        tracing::debug!(sql = %sql, id = country.id, "execute");
        let result = sqlx::query(sql).bind(country.id).execute(&self.pool).await?;
        Ok(saved(result))
    }
}
