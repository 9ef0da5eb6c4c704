use super::{saved, POKEMON_COLUMNS};
use crate::error::AppError;
use crate::model::{Category, Pokemon};
use crate::store::is_unique_violation;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>, AppError>;
    async fn get(&self, id: i32) -> Result<Option<Category>, AppError>;
    async fn exists(&self, id: i32) -> Result<bool, AppError>;
    /// Pokemon linked to the category through `pokemon_categories`.
    async fn pokemon_by_category(&self, category_id: i32) -> Result<Vec<Pokemon>, AppError>;
    async fn create(&self, category: &Category) -> Result<bool, AppError>;
    async fn update(&self, category: &Category) -> Result<bool, AppError>;
    async fn delete(&self, category: &Category) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        PgCategoryRepository { pool }
    }
}

fn name_conflict(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::unprocessable("Category already exists")
    } else {
        AppError::Db(e)
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, AppError> {
        let sql = "SELECT id, name FROM categories ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Category>(sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Category>, AppError> {
        let sql = "SELECT id, name FROM categories WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Category>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn pokemon_by_category(&self, category_id: i32) -> Result<Vec<Pokemon>, AppError> {
        let sql = format!(
            "SELECT {} FROM pokemon p JOIN pokemon_categories pc ON pc.pokemon_id = p.id \
             WHERE pc.category_id = $1 ORDER BY p.id",
            POKEMON_COLUMNS
        );
        tracing::debug!(sql = %sql, category_id, "query");
        Ok(sqlx::query_as::<_, Pokemon>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create(&self, category: &Category) -> Result<bool, AppError> {
        let sql = "INSERT INTO categories (name) VALUES ($1)";
        tracing::debug!(sql = %sql, name = %category.name, "execute");
        let result = sqlx::query(sql)
            .bind(&category.name)
            .execute(&self.pool)
            .await
            .map_err(name_conflict)?;
        Ok(saved(result))
    }

    async fn update(&self, category: &Category) -> Result<bool, AppError> {
        let sql = "UPDATE categories SET name = $2 WHERE id = $1";
        tracing::debug!(sql = %sql, id = category.id, "execute");
        let result = sqlx::query(sql)
            .bind(category.id)
            .bind(&category.name)
            .execute(&self.pool)
            .await
            .map_err(name_conflict)?;
        Ok(saved(result))
    }

    async fn delete(&self, category: &Category) -> Result<bool, AppError> {
        let sql = "DELETE FROM categories WHERE id = $1";
        tracing::debug!(sql = %sql, id = category.id, "execute");
        let result = sqlx::query(sql).bind(category.id).execute(&self.pool).await?;
        Ok(saved(result))
    }
}
